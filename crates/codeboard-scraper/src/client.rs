//! HTTP and HTML helpers shared by the sources.
//!
//! Every source call builds its own `reqwest::Client`, so no connection pool
//! outlives a single fetch.

use std::time::Duration;

use reqwest::Client;
use scraper::{ElementRef, Selector};

use crate::error::SourceError;

const MAX_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Builds a client bounded by `timeout_secs` for the whole request.
pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, SourceError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(
            timeout_secs.min(MAX_CONNECT_TIMEOUT_SECS),
        ))
        .user_agent(user_agent)
        .pool_max_idle_per_host(0)
        .build()?;
    Ok(client)
}

/// Issues a single GET and returns the body of a 2xx response.
///
/// # Errors
///
/// - [`SourceError::Http`] on network, timeout, or body-read failure.
/// - [`SourceError::UnexpectedStatus`] on any non-2xx status.
pub(crate) async fn fetch_page(client: &Client, url: &str) -> Result<String, SourceError> {
    let response = client
        .get(url)
        .header(
            reqwest::header::ACCEPT,
            "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
        )
        .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    Ok(response.text().await?)
}

pub(crate) fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Selector {
        css: css.to_owned(),
        reason: e.to_string(),
    })
}

/// Concatenated descendant text, trimmed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
