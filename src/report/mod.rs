pub mod csv;
pub mod json;
pub mod md;

use crate::error::MaturityError;
use crate::types::report::ScoreReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
    Csv,
}

pub fn render(report: &ScoreReport, format: OutputFormat) -> Result<String, MaturityError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(MaturityError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
        OutputFormat::Csv => csv::to_csv(report),
    }
}

/// Missing scores print as `-`, never as zero.
pub(crate) fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| "-".to_string(), |value| format!("{value:.1}"))
}
