use crate::error::MaturityError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ROLE_COUNT: usize = 5;

/// Organizational tier a respondent answers as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Senior Managers")]
    SeniorManagers,
    #[serde(rename = "Executives")]
    Executives,
    #[serde(rename = "Supervisors/Sr Experts")]
    Supervisors,
    #[serde(rename = "Technical Experts")]
    TechnicalExperts,
    #[serde(rename = "Non-Technical Experts")]
    NonTechnicalExperts,
}

impl Role {
    pub const ALL: [Role; ROLE_COUNT] = [
        Role::SeniorManagers,
        Role::Executives,
        Role::Supervisors,
        Role::TechnicalExperts,
        Role::NonTechnicalExperts,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SeniorManagers => "Senior Managers",
            Self::Executives => "Executives",
            Self::Supervisors => "Supervisors/Sr Experts",
            Self::TechnicalExperts => "Technical Experts",
            Self::NonTechnicalExperts => "Non-Technical Experts",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::SeniorManagers => "senior-managers",
            Self::Executives => "executives",
            Self::Supervisors => "supervisors",
            Self::TechnicalExperts => "technical-experts",
            Self::NonTechnicalExperts => "non-technical-experts",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::SeniorManagers => 0,
            Self::Executives => 1,
            Self::Supervisors => 2,
            Self::TechnicalExperts => 3,
            Self::NonTechnicalExperts => 4,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = MaturityError;

    /// Accepts either the stored label or the command-line slug.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Role::ALL
            .into_iter()
            .find(|role| {
                role.label().eq_ignore_ascii_case(trimmed) || role.slug().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| MaturityError::UnknownRole(trimmed.to_string()))
    }
}
