//! Run report rendering.
//!
//! Renders the aggregated [`RunReport`] either as a human-readable
//! summary or as JSON for scripting.

use crate::cli::args::OutputFormat;
use crate::models::{FilerType, RunReport};
use colored::*;

/// Render the run report in the requested format.
pub fn render_report(format: &OutputFormat, report: &RunReport) {
    match format {
        OutputFormat::Human => render_human(report),
        OutputFormat::Json => render_json(report),
    }
}

/// Records written per filer category across the whole run.
fn records_per_category(report: &RunReport) -> [(FilerType, usize); 3] {
    let mut totals = [0usize; 3];
    for outcome in &report.outcomes {
        for partition in &outcome.partitions {
            totals[partition.filer_type.index()] += partition.records;
        }
    }
    [
        (FilerType::Y9c, totals[0]),
        (FilerType::Y9lp, totals[1]),
        (FilerType::Y9sp, totals[2]),
    ]
}

fn render_human(report: &RunReport) {
    println!("\n{}", "Conversion Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        report.files_processed.to_string().bright_white()
    );

    if let Some((first, last)) = report.period_range() {
        println!(
            "  {} {} to {}",
            "Quarters:".bright_cyan(),
            first.label().bright_white(),
            last.label().bright_white()
        );
    }

    println!(
        "  {} {}",
        "Partitions written:".bright_cyan(),
        report.partitions_written.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Records written:".bright_cyan(),
        report.records_written.to_string().bright_white().bold()
    );

    for (filer, records) in records_per_category(report) {
        if records > 0 {
            println!(
                "    {} {} records",
                format!("{}:", filer.dir_name()).bright_cyan(),
                records
            );
        }
    }

    println!(
        "  {} {:.2}s",
        "Time elapsed:".bright_cyan(),
        report.processing_time.as_secs_f64()
    );

    if report.archives_extracted + report.archives_skipped > 0 {
        println!(
            "  {} {} extracted, {} already present",
            "Archives:".bright_cyan(),
            report.archives_extracted,
            report.archives_skipped
        );
    }

    let dropped_records =
        report.records_unclassified + report.records_missing_id + report.rows_skipped;
    if dropped_records > 0 {
        println!(
            "  {} {} unclassifiable, {} missing identifier, {} undecodable rows",
            "Records dropped:".bright_yellow(),
            report.records_unclassified,
            report.records_missing_id,
            report.rows_skipped
        );
    }

    if report.partitions_failed > 0 {
        println!(
            "  {} {}",
            "Partitions failed:".bright_red(),
            report.partitions_failed.to_string().bright_red().bold()
        );
    }

    if !report.files_skipped.is_empty() {
        println!(
            "\n{} {}",
            "Skipped files:".bright_red().bold(),
            report.files_skipped.len()
        );
        for (path, reason) in &report.files_skipped {
            println!("  {} - {}", path.display().to_string().bright_red(), reason);
        }
    }

    if !report.archives_failed.is_empty() {
        println!(
            "\n{} {}",
            "Skipped archives:".bright_red().bold(),
            report.archives_failed.len()
        );
        for (path, reason) in &report.archives_failed {
            println!("  {} - {}", path.display().to_string().bright_red(), reason);
        }
    }

    println!();
}

fn render_json(report: &RunReport) {
    let per_category: Vec<_> = records_per_category(report)
        .iter()
        .map(|(filer, records)| {
            serde_json::json!({
                "filer_type": filer.dir_name(),
                "records_written": records,
            })
        })
        .collect();

    let json_report = serde_json::json!({
        "files_processed": report.files_processed,
        "files_skipped": report.files_skipped.iter().map(|(path, reason)| {
            serde_json::json!({"file": path.display().to_string(), "reason": reason})
        }).collect::<Vec<_>>(),
        "archives": {
            "extracted": report.archives_extracted,
            "already_present": report.archives_skipped,
            "failed": report.archives_failed.iter().map(|(path, reason)| {
                serde_json::json!({"file": path.display().to_string(), "reason": reason})
            }).collect::<Vec<_>>(),
        },
        "partitions_written": report.partitions_written,
        "partitions_failed": report.partitions_failed,
        "records_written": report.records_written,
        "records_per_category": per_category,
        "records_unclassified": report.records_unclassified,
        "records_missing_id": report.records_missing_id,
        "rows_skipped": report.rows_skipped,
        "processing_time_seconds": report.processing_time.as_secs_f64(),
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&json_report).unwrap_or_else(|_| "{}".to_string())
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileOutcome, PartitionSummary, ReportingPeriod};
    use std::path::PathBuf;

    fn sample_report() -> RunReport {
        let mut report = RunReport::default();
        report.absorb(FileOutcome {
            file: PathBuf::from("bhcf8603.csv"),
            period: ReportingPeriod::new(1986, 1).unwrap(),
            partitions: vec![PartitionSummary {
                filer_type: FilerType::Y9c,
                records: 100,
                variables: 40,
                path: PathBuf::from("out/y_9c/1986Q1.parquet"),
            }],
            write_failures: vec![],
            records_unclassified: 3,
            records_missing_id: 1,
            rows_skipped: 0,
        });
        report.record_skip(PathBuf::from("bhcfXXXX.csv"), "bad name".to_string());
        report
    }

    #[test]
    fn test_records_per_category() {
        let report = sample_report();
        let totals = records_per_category(&report);
        assert_eq!(totals[0], (FilerType::Y9c, 100));
        assert_eq!(totals[1], (FilerType::Y9lp, 0));
        assert_eq!(totals[2], (FilerType::Y9sp, 0));
    }

    #[test]
    fn test_render_does_not_panic() {
        let report = sample_report();
        render_human(&report);
        render_json(&report);
    }
}
