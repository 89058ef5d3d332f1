use crate::error::MaturityError;
use serde::Deserialize;
use std::path::{Component, Path};

pub const DEFAULT_TARGET: f64 = 45.0;
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurveyConfig {
    pub storage: Option<StorageConfig>,
    pub catalog: Option<CatalogConfig>,
    pub scoring: Option<ScoringConfig>,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub topics_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub target: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub top_n: Option<usize>,
}

impl SurveyConfig {
    pub fn data_dir(&self) -> &str {
        self.storage
            .as_ref()
            .and_then(|storage| storage.data_dir.as_deref())
            .unwrap_or("data")
    }

    pub fn topics_file(&self) -> &str {
        self.catalog
            .as_ref()
            .and_then(|catalog| catalog.topics_file.as_deref())
            .unwrap_or("topics.json")
    }

    pub fn target(&self) -> f64 {
        self.scoring
            .as_ref()
            .and_then(|scoring| scoring.target)
            .unwrap_or(DEFAULT_TARGET)
    }

    pub fn top_n(&self) -> usize {
        self.report
            .as_ref()
            .and_then(|report| report.top_n)
            .unwrap_or(DEFAULT_TOP_N)
    }

    pub fn validate(&self) -> Result<(), MaturityError> {
        let target = self.target();
        if !(0.0..=100.0).contains(&target) {
            return Err(MaturityError::ConfigParse(format!(
                "scoring.target must be between 0 and 100 (found {target})"
            )));
        }
        if self.top_n() == 0 {
            return Err(MaturityError::ConfigParse(
                "report.top_n must be greater than 0".to_string(),
            ));
        }
        validate_relative_path("storage.data_dir", self.data_dir())?;
        validate_relative_path("catalog.topics_file", self.topics_file())?;
        Ok(())
    }
}

fn validate_relative_path(key: &str, value: &str) -> Result<(), MaturityError> {
    if value.trim().is_empty() {
        return Err(MaturityError::ConfigParse(format!("{key} must not be empty")));
    }
    let path = Path::new(value);
    if path.is_absolute()
        || path
            .components()
            .any(|component| matches!(component, Component::ParentDir))
    {
        return Err(MaturityError::ConfigParse(format!(
            "{key} must stay inside the survey workspace: {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: SurveyConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.data_dir(), "data");
        assert_eq!(cfg.topics_file(), "topics.json");
        assert_eq!(cfg.target(), DEFAULT_TARGET);
        assert_eq!(cfg.top_n(), DEFAULT_TOP_N);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let cfg: SurveyConfig = toml::from_str(
            r#"
[storage]
data_dir = "responses"

[catalog]
topics_file = "catalog/topics.json"

[scoring]
target = 60.0

[report]
top_n = 5
"#,
        )
        .expect("full config should parse");
        assert_eq!(cfg.data_dir(), "responses");
        assert_eq!(cfg.topics_file(), "catalog/topics.json");
        assert_eq!(cfg.target(), 60.0);
        assert_eq!(cfg.top_n(), 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_target_out_of_scale() {
        let cfg: SurveyConfig = toml::from_str(
            r#"
[scoring]
target = 120.0
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("scoring.target"));
    }

    #[test]
    fn validate_rejects_zero_top_n() {
        let cfg: SurveyConfig = toml::from_str(
            r#"
[report]
top_n = 0
"#,
        )
        .expect("config should parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_escaping_data_dir() {
        let cfg: SurveyConfig = toml::from_str(
            r#"
[storage]
data_dir = "../elsewhere"
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("inside the survey workspace"));
    }

    #[test]
    fn validate_rejects_absolute_topics_file() {
        let cfg: SurveyConfig = toml::from_str(
            r#"
[catalog]
topics_file = "/etc/topics.json"
"#,
        )
        .expect("config should parse");
        assert!(cfg.validate().is_err());
    }
}
