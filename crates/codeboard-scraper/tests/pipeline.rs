//! End-to-end aggregation against `wiremock` stand-ins for all four platforms.

use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use codeboard_core::roster::parse_roster;
use codeboard_core::{Platform, ProfileUrls};
use codeboard_scraper::{
    CodeChefSource, Dispatcher, FailureKind, GfgSource, HackerRankSource, LeetCodeSource,
    ProfilePipeline, SourceSet,
};

const UA: &str = "codeboard-test/0.1";

fn sources(server: &MockServer) -> SourceSet {
    SourceSet::new()
        .with_source(std::sync::Arc::new(GfgSource::new(5, UA)))
        .with_source(std::sync::Arc::new(CodeChefSource::new(5, UA)))
        .with_source(std::sync::Arc::new(HackerRankSource::new(5, UA)))
        .with_source(std::sync::Arc::new(LeetCodeSource::new(
            5,
            UA,
            &format!("{}/graphql", server.uri()),
        )))
}

async fn mount_page(server: &MockServer, route: &str, body: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body.to_string(), "text/html")
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

async fn mount_all(server: &MockServer, delay: Duration) {
    mount_page(
        server,
        "/gfg/asha",
        r#"<div class="profilePicSection_head_userHandle__oOfFy">asha</div>
           <div class="scoreCard_head_left--score__oSi_x">88</div>
           <div class="problemNavbar_head_nav--text__UaGCx">EASY (3)</div>
           <div class="problemNavbar_head_nav--text__UaGCx">MEDIUM (2)</div>
           <div class="problemNavbar_head_nav--text__UaGCx">HARD (1)</div>"#,
        delay,
    )
    .await;
    mount_page(
        server,
        "/codechef/asha",
        r#"<span class="m-username--link">asha</span><span class="rating">1&#9733;</span>
           <div class="rating-number">1200</div>
           <div class="contest-participated-count"><b>7</b></div>"#,
        delay,
    )
    .await;
    mount_page(
        server,
        "/hackerrank/asha",
        r#"<svg class="hexagon"><text class="badge-title">SQL</text>
           <g class="star-section"><svg class="badge-star"></svg></g></svg>"#,
        delay,
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {
                    "matchedUser": {"submitStats": {"acSubmissionNum": [
                        {"difficulty": "Easy", "count": 5},
                        {"difficulty": "Medium", "count": 4},
                        {"difficulty": "Hard", "count": 1}
                    ]}},
                    "userContestRanking": {"attendedContestsCount": 3, "rating": 1500.0}
                }}))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

fn roster(base: &str) -> String {
    format!(
        "students:
  - Roll Number: 21A01
    Name: Asha
    GeeksforGeeks: {base}/gfg/asha
    CodeChef: {base}/codechef/asha
    HackerRank: {base}/hackerrank/asha
    LeetCode: https://leetcode.com/u/asha/
  - Roll Number: 21A02
    Name: Blank
    GeeksforGeeks: ''
    CodeChef: '   '
"
    )
}

#[tokio::test]
async fn roster_aggregates_every_source_per_student() {
    let server = MockServer::start().await;
    mount_all(&server, Duration::ZERO).await;
    let roster = parse_roster(&roster(&server.uri())).expect("valid roster");
    let pipeline = ProfilePipeline::new(Dispatcher::new(sources(&server)), 2);

    let report = pipeline.run(&roster.students).await;

    let asha = &report.students["21A01"];
    assert!(asha.degraded.is_empty(), "unexpected degraded: {:?}", asha.degraded);
    assert_eq!(asha.combined_score(), 10 + 14 + 1 + 22);
    assert_eq!(
        serde_json::to_value(asha.get(Platform::LeetCode).unwrap()).unwrap()["Total_Score"],
        json!(22)
    );

    assert_eq!(
        serde_json::to_value(&report.students["21A02"]).unwrap(),
        json!({"Profiles": {
            "GeeksForGeeks": {"Total_Score": 0},
            "CodeChef": {"Total_Score": 0},
            "HackerRank": {"Total_Score": 0},
            "LeetCode": {"Total_Score": 0}
        }})
    );
    assert_eq!(report.degraded_count(), 0);
}

#[tokio::test]
async fn failures_are_isolated_to_their_source() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/hackerrank/asha",
        r#"<h2 class="certificate_v3-heading">Go (Basic)</h2>"#,
        Duration::ZERO,
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    // GeeksforGeeks and CodeChef routes are left unmounted and answer 404.

    let urls = ProfileUrls::new()
        .with(Platform::GeeksForGeeks, &format!("{}/gfg/asha", server.uri()))
        .with(Platform::CodeChef, &format!("{}/codechef/asha", server.uri()))
        .with(Platform::HackerRank, &format!("{}/hackerrank/asha", server.uri()))
        .with(Platform::LeetCode, "https://leetcode.com/asha");

    let set = Dispatcher::new(sources(&server)).dispatch(&urls).await;

    assert_eq!(
        serde_json::to_value(&set).unwrap(),
        json!({"Profiles": {
            "GeeksForGeeks": {"Error": "Invalid or inaccessible URL", "Total_Score": 0},
            "CodeChef": {"error": "Failed to fetch profile", "Total_Score": 0},
            "HackerRank": {"Badges": [], "Certifications": ["Go (Basic)"], "Total_Score": 0},
            "LeetCode": {
                "Username": "asha",
                "Problems": {"Easy": 0, "Medium": 0, "Hard": 0, "Total": 0},
                "Total_Score": 0,
                "Contests_Attended": 0,
                "Rating": 0
            }
        }})
    );
    assert_eq!(set.degraded.len(), 3);
    assert_eq!(set.degraded.get(&Platform::LeetCode), Some(&FailureKind::Status));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn slow_sources_overlap_within_one_student() {
    let server = MockServer::start().await;
    mount_all(&server, Duration::from_millis(500)).await;
    let urls = ProfileUrls::new()
        .with(Platform::GeeksForGeeks, &format!("{}/gfg/asha", server.uri()))
        .with(Platform::CodeChef, &format!("{}/codechef/asha", server.uri()))
        .with(Platform::HackerRank, &format!("{}/hackerrank/asha", server.uri()))
        .with(Platform::LeetCode, "https://leetcode.com/u/asha/");

    let started = Instant::now();
    let set = Dispatcher::new(sources(&server)).dispatch(&urls).await;
    let elapsed = started.elapsed();

    assert_eq!(set.profiles.len(), 4);
    assert!(set.degraded.is_empty());
    assert!(
        elapsed < Duration::from_millis(1_500),
        "four 500ms sources took {elapsed:?}; expected them to overlap"
    );
}
