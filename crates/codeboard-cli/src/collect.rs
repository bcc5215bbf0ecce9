//! `collect`: roster in, aggregate JSON file out.
//!
//! Only roster and output-file problems fail the command. Individual source
//! failures are already folded into degraded records by the pipeline.

use std::path::Path;

use anyhow::Context;
use codeboard_core::{AppConfig, StudentRow};
use codeboard_scraper::{ProfilePipeline, RosterReport};
use serde::Serialize;

/// Load the roster, aggregate every student, and persist the result.
///
/// When `dry_run` is `true` the roster is validated and the per-student plan
/// is printed; nothing is fetched or written.
///
/// # Errors
///
/// Returns an error if the roster cannot be read or validated, or the output
/// file cannot be written.
pub(crate) async fn run_collect(
    config: &AppConfig,
    roster_path: &Path,
    output_path: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let roster = codeboard_core::load_roster(roster_path)
        .with_context(|| format!("failed to load roster {}", roster_path.display()))?;

    if dry_run {
        println!(
            "dry-run: would collect profiles for {} students:",
            roster.students.len()
        );
        for student in &roster.students {
            println!("  {}", plan_line(student));
        }
        return Ok(());
    }

    println!(
        "Collecting profiles for {} students...",
        roster.students.len()
    );

    let pipeline = ProfilePipeline::from_config(config);
    let report = pipeline.run(&roster.students).await;

    write_report(&report, output_path)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    let degraded = report.degraded_count();
    if degraded > 0 {
        tracing::warn!(degraded, "some profile records are degraded");
    }
    tracing::info!(
        students = report.len(),
        degraded,
        output = %output_path.display(),
        "collection complete"
    );
    println!(
        "Wrote {} students to {} ({degraded} degraded records)",
        report.len(),
        output_path.display()
    );

    Ok(())
}

fn plan_line(student: &StudentRow) -> String {
    let platforms = student.profile_urls().provided();
    let targets = if platforms.is_empty() {
        "no profiles".to_string()
    } else {
        platforms
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let name = student.name.as_deref().unwrap_or("");
    format!("{:<14}{:<20}{targets}", student.roll_number, name)
}

/// Pretty JSON with four-space indentation and a trailing newline.
pub(crate) fn render_report(report: &RosterReport) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    report.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

fn write_report(report: &RosterReport, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_report(report)?)?;
    Ok(())
}
