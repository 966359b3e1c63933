//! Output formatting module
//! Renders match, dashboard and profile reports as console text, JSON or Markdown

pub mod formatter;
pub mod report;

pub use formatter::{save_report_to_file, suggest_filename, OutputFormatter, ReportGenerator};
pub use report::{DashboardReport, MatchReport, ReportMetadata};
