use crate::types::role::Role;
use crate::types::topic::{TopicId, TopicRange, TOPIC_COUNT};
use serde::Serialize;
use std::collections::BTreeMap;

pub type Score = f64;

/// One nullable score per topic, indexed by topic id minus one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TopicSeries(Vec<Option<Score>>);

impl TopicSeries {
    pub fn from_values(values: Vec<Option<Score>>) -> Self {
        let mut values = values;
        values.resize(TOPIC_COUNT, None);
        Self(values)
    }

    pub fn get(&self, topic: TopicId) -> Option<Score> {
        usize::from(topic)
            .checked_sub(1)
            .and_then(|index| self.0.get(index).copied().flatten())
    }

    pub fn values(&self) -> &[Option<Score>] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    pub fn slice(&self, range: TopicRange) -> Vec<Option<Score>> {
        self.0[range.indices()].to_vec()
    }
}

pub type RoleMeans = BTreeMap<Role, TopicSeries>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicScore {
    pub topic: TopicId,
    pub name: String,
    pub score: Score,
}

/// Headline figures shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub organization_average: Score,
    pub pass_rate: Score,
    pub target: Score,
    pub best_topic: Option<TopicScore>,
    pub worst_topic: Option<TopicScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participation {
    pub total: usize,
    pub by_role: BTreeMap<Role, usize>,
}
