//! JSON report output writer.
//!
//! Writes AnalyticsReport structs to JSON files with proper formatting.

use super::validate_path;
use crate::parser::schema::AnalyticsReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(
    report: &AnalyticsReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_path(output_path)?;
    super::ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    // Serialize to JSON with pretty printing
    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!("Report written successfully ({} bytes)", calculate_file_size(output_path));

    Ok(())
}

/// Serialize a report to a pretty JSON string
pub fn report_to_string(report: &AnalyticsReport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report).map_err(OutputError::SerializationFailed)
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a report from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<AnalyticsReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let report: AnalyticsReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!("Report loaded: version {}, source {}", report.version, report.source);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{FunnelStageRow, LogOverview};
    use tempfile::NamedTempFile;

    fn create_test_report() -> AnalyticsReport {
        AnalyticsReport {
            version: "1.0.0".to_string(),
            source: "events.csv".to_string(),
            generated_at: "2024-01-01T00:00:00Z".to_string(),
            overview: LogOverview {
                events: 3,
                users: 2,
                sessions: 2,
                first_day: None,
                last_day: None,
            },
            funnel: vec![
                FunnelStageRow {
                    stage: "Visit".to_string(),
                    users: 0,
                    conversion_rate: Some(100.0),
                },
                FunnelStageRow {
                    stage: "Browse Products".to_string(),
                    users: 0,
                    conversion_rate: None,
                },
            ],
            time_on_page: vec![],
            page_duration_ranking: vec![],
            session_duration_by_page: vec![],
            duration_trends: vec![],
            exit_rates: vec![],
            exit_distribution: vec![],
            exit_rate_over_time: vec![],
            bounce_rates: vec![],
            daily_bounce_rates: vec![],
            top_journeys: vec![],
            purchase_paths: vec![],
            loyal_users: vec![],
            daily_interactions: vec![],
            daily_add_to_cart: vec![],
            interaction_heatmap: vec![],
            cart_products_before_exit: vec![],
        }
    }

    #[test]
    fn test_write_and_read_report() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&report, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.source, report.source);
        assert_eq!(loaded.funnel, report.funnel);
    }

    #[test]
    fn test_undefined_rate_serializes_as_null() {
        let json = report_to_string(&create_test_report()).unwrap();
        assert!(json.contains("\"conversion_rate\": null"));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_report(&create_test_report(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_read_missing_file_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = read_report(temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(OutputError::WriteFailed(_))));
    }
}
