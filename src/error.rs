use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaturityError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("company name is required")]
    MissingCompany,

    #[error("role is required")]
    MissingRole,

    #[error("all {expected} topics must be answered (missing: {missing})")]
    IncompleteAnswers { expected: usize, missing: String },

    #[error("invalid answer: {0}")]
    InvalidAnswer(String),

    #[error("invalid topic range: {0}")]
    InvalidTopicRange(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("no responses stored for company: {0}")]
    CompanyNotFound(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl MaturityError {
    /// Rejections caused by caller input rather than by storage or parsing.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingCompany
                | Self::MissingRole
                | Self::IncompleteAnswers { .. }
                | Self::InvalidAnswer(_)
                | Self::InvalidTopicRange(_)
                | Self::UnknownRole(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MaturityError>;
