use std::path::PathBuf;
use crate::charts::ChartConfig;
use crate::utils::config::AnalyticsConfig;

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// CSV event log to analyse
    pub input: PathBuf,

    /// Output path for JSON report
    pub output_json: PathBuf,

    /// Directory for SVG charts (optional)
    pub charts_dir: Option<PathBuf>,

    /// Funnel labels and top-N sizes
    pub config: AnalyticsConfig,

    /// Base chart configuration (size; titles are set per chart)
    pub chart_config: ChartConfig,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_json: PathBuf::from("report.json"),
            charts_dir: None,
            config: AnalyticsConfig::default(),
            chart_config: ChartConfig::default(),
            print_summary: false,
        }
    }
}
