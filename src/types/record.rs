use crate::error::{MaturityError, Result};
use crate::types::role::Role;
use crate::types::topic::{topic_index, TopicId, TOPIC_COUNT};
use serde::{Deserialize, Serialize};

/// Highest possible adjusted score: maturity 4 at relevance 10.
pub const MAX_ADJUSTED: u8 = 40;

/// Factor that maps an adjusted score onto the 0..100 reporting scale.
pub const RESCALE_FACTOR: f64 = 100.0 / MAX_ADJUSTED as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MaturityLevel {
    Unaware,
    Recognised,
    Developing,
    Implemented,
    Optimised,
}

impl MaturityLevel {
    pub const ALL: [MaturityLevel; 5] = [
        MaturityLevel::Unaware,
        MaturityLevel::Recognised,
        MaturityLevel::Developing,
        MaturityLevel::Implemented,
        MaturityLevel::Optimised,
    ];

    pub fn value(self) -> u8 {
        match self {
            Self::Unaware => 0,
            Self::Recognised => 1,
            Self::Developing => 2,
            Self::Implemented => 3,
            Self::Optimised => 4,
        }
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.value() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unaware => "I have no knowledge of this",
            Self::Recognised => "The need is recognised but details are unknown",
            Self::Developing => "Guidelines are being drafted; activities happen ad hoc",
            Self::Implemented => "Fully implemented to a standard",
            Self::Optimised => {
                "Results have been assessed against standard indicators for years and feed continual improvement"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Relevance {
    None,
    Low,
    Partial,
    High,
    Full,
}

impl Relevance {
    pub const ALL: [Relevance; 5] = [
        Relevance::None,
        Relevance::Low,
        Relevance::Partial,
        Relevance::High,
        Relevance::Full,
    ];

    pub fn value(self) -> u8 {
        match self {
            Self::None => 1,
            Self::Low => 3,
            Self::Partial => 5,
            Self::High => 7,
            Self::Full => 10,
        }
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|relevance| relevance.value() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Not related",
            Self::Low => "Slightly related",
            Self::Partial => "Somewhat related",
            Self::High => "Highly related",
            Self::Full => "Fully related",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicAnswer {
    pub maturity: MaturityLevel,
    pub relevance: Relevance,
}

impl TopicAnswer {
    pub fn new(maturity: MaturityLevel, relevance: Relevance) -> Self {
        Self {
            maturity,
            relevance,
        }
    }

    /// Builds an answer from raw scale values; anything off either scale is rejected.
    pub fn from_values(maturity: i64, relevance: i64) -> Result<Self> {
        let maturity = u8::try_from(maturity)
            .ok()
            .and_then(MaturityLevel::from_value)
            .ok_or_else(|| {
                MaturityError::InvalidAnswer(format!(
                    "maturity must be one of 0..=4 (got {maturity})"
                ))
            })?;
        let relevance = u8::try_from(relevance)
            .ok()
            .and_then(Relevance::from_value)
            .ok_or_else(|| {
                MaturityError::InvalidAnswer(format!(
                    "relevance must be one of 1, 3, 5, 7, 10 (got {relevance})"
                ))
            })?;
        Ok(Self::new(maturity, relevance))
    }

    pub fn adjusted(&self) -> u8 {
        self.maturity.value() * self.relevance.value()
    }
}

/// Maps a raw adjusted score (0..=40) onto the 0..=100 scale.
pub fn rescale(adjusted: u8) -> f64 {
    f64::from(adjusted) * RESCALE_FACTOR
}

/// One respondent's submission. Answers are indexed by topic id minus one.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRecord {
    pub timestamp: String,
    pub company: String,
    pub respondent: Option<String>,
    pub role: Option<Role>,
    pub answers: [Option<TopicAnswer>; TOPIC_COUNT],
}

impl ResponseRecord {
    pub fn new(company: &str, respondent: Option<&str>, role: Option<Role>) -> Self {
        Self {
            timestamp: chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
            company: company.to_string(),
            respondent: respondent
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
            role,
            answers: [None; TOPIC_COUNT],
        }
    }

    pub fn with_answers(mut self, answers: [TopicAnswer; TOPIC_COUNT]) -> Self {
        self.answers = answers.map(Some);
        self
    }

    pub fn set_answer(&mut self, topic: TopicId, answer: TopicAnswer) -> Result<()> {
        let index = topic_index(topic).ok_or_else(|| {
            MaturityError::InvalidAnswer(format!("topic must be within 1..={TOPIC_COUNT} (got {topic})"))
        })?;
        self.answers[index] = Some(answer);
        Ok(())
    }

    pub fn missing_topics(&self) -> Vec<TopicId> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, answer)| answer.is_none())
            .map(|(index, _)| (index + 1) as TopicId)
            .collect()
    }

    /// Checks the submission gate: company, role and every topic answered.
    pub fn validate(&self) -> Result<()> {
        if self.company.trim().is_empty() {
            return Err(MaturityError::MissingCompany);
        }
        if self.role.is_none() {
            return Err(MaturityError::MissingRole);
        }
        let missing = self.missing_topics();
        if !missing.is_empty() {
            return Err(MaturityError::IncompleteAnswers {
                expected: TOPIC_COUNT,
                missing: missing
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
        Ok(())
    }
}

/// One entry of an answers file. Values stay wide so that numbers outside the
/// scales are reported as answer errors rather than as file parse errors.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnswerEntry {
    pub topic: i64,
    pub maturity: i64,
    pub relevance: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnswerSheet {
    #[serde(default)]
    pub answers: Vec<AnswerEntry>,
}

impl AnswerSheet {
    /// Applies every entry to `record`, rejecting out-of-scale values and repeated topics.
    pub fn apply_to(&self, record: &mut ResponseRecord) -> Result<()> {
        let mut seen = [false; TOPIC_COUNT];
        for entry in &self.answers {
            let (topic, index) = TopicId::try_from(entry.topic)
                .ok()
                .and_then(|topic| topic_index(topic).map(|index| (topic, index)))
                .ok_or_else(|| {
                    MaturityError::InvalidAnswer(format!(
                        "topic must be within 1..={TOPIC_COUNT} (got {})",
                        entry.topic
                    ))
                })?;
            if seen[index] {
                return Err(MaturityError::InvalidAnswer(format!(
                    "topic {topic} answered more than once"
                )));
            }
            seen[index] = true;
            let answer =
                TopicAnswer::from_values(entry.maturity, entry.relevance).map_err(|err| match err {
                    MaturityError::InvalidAnswer(reason) => {
                        MaturityError::InvalidAnswer(format!("topic {topic}: {reason}"))
                    }
                    other => other,
                })?;
            record.set_answer(topic, answer)?;
        }
        Ok(())
    }
}
