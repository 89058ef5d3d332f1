use crate::error::MaturityError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const TOPIC_COUNT: usize = 40;

pub type TopicId = u8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
}

/// Every topic id the questionnaire defines, in order.
pub fn topic_ids() -> impl Iterator<Item = TopicId> {
    1..=TOPIC_COUNT as TopicId
}

pub fn topic_index(id: TopicId) -> Option<usize> {
    let index = usize::from(id).checked_sub(1)?;
    (index < TOPIC_COUNT).then_some(index)
}

/// Inclusive range of topic ids selected for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicRange {
    pub start: TopicId,
    pub end: TopicId,
}

impl TopicRange {
    pub fn new(start: TopicId, end: TopicId) -> Result<Self, MaturityError> {
        if start == 0 || usize::from(end) > TOPIC_COUNT || start > end {
            return Err(MaturityError::InvalidTopicRange(format!(
                "{start}..{end} (expected 1 <= start <= end <= {TOPIC_COUNT})"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn full() -> Self {
        Self {
            start: 1,
            end: TOPIC_COUNT as TopicId,
        }
    }

    pub fn indices(&self) -> std::ops::Range<usize> {
        usize::from(self.start) - 1..usize::from(self.end)
    }

    pub fn ids(&self) -> impl Iterator<Item = TopicId> {
        self.start..=self.end
    }
}

impl FromStr for TopicRange {
    type Err = MaturityError;

    /// Parses `a..b`, `a-b` or a single id `a`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (start, end) = match trimmed.split_once("..").or_else(|| trimmed.split_once('-')) {
            Some((start, end)) => (start, end),
            None => (trimmed, trimmed),
        };
        let parse = |part: &str| {
            part.trim()
                .parse::<TopicId>()
                .map_err(|_| MaturityError::InvalidTopicRange(trimmed.to_string()))
        };
        Self::new(parse(start)?, parse(end)?)
    }
}
