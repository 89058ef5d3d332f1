//! Per-topic role weights used for the organization-wide composite.
//!
//! Each topic ranks the five roles by how authoritative their view is for
//! that topic; the five ranks map onto fixed fuzzy weights.

use crate::types::role::{Role, ROLE_COUNT};
use crate::types::topic::{topic_ids, topic_index, TopicId, TOPIC_COUNT};
use std::collections::BTreeMap;

const W1: f64 = 0.3846;
const W2: f64 = 0.2692;
const W3: f64 = 0.1923;
const W4: f64 = 0.1154;
const W5: f64 = 0.0385;

/// Rows follow `Role::ALL`: senior managers, executives, supervisors,
/// technical experts, non-technical experts.
const BUILTIN: [[f64; ROLE_COUNT]; TOPIC_COUNT] = [
    [W1, W2, W3, W4, W5], // 1 purpose & context
    [W2, W1, W3, W4, W5],
    [W1, W2, W3, W4, W5],
    [W1, W2, W3, W4, W5],
    [W2, W1, W3, W4, W5], // 5
    [W3, W2, W4, W5, W1],
    [W5, W3, W2, W1, W4], // 7 technical standards
    [W1, W2, W3, W4, W5],
    [W1, W2, W4, W5, W3],
    [W4, W2, W3, W5, W1], // 10
    [W3, W1, W2, W4, W5],
    [W4, W2, W3, W5, W1],
    [W4, W2, W3, W5, W1],
    [W1, W2, W3, W4, W5],
    [W3, W1, W2, W4, W5], // 15
    [W4, W3, W1, W2, W5],
    [W3, W1, W2, W4, W5],
    [W2, W1, W3, W4, W5],
    [W4, W2, W3, W5, W1],
    [W2, W1, W3, W4, W5], // 20
    [W4, W2, W3, W5, W1],
    [W2, W1, W3, W4, W5],
    [W3, W1, W2, W4, W5],
    [W5, W3, W2, W1, W4],
    [W5, W3, W2, W1, W4], // 25
    [W4, W3, W1, W2, W5],
    [W4, W3, W1, W2, W5],
    [W4, W3, W1, W2, W5],
    [W3, W1, W5, W4, W2],
    [W4, W1, W5, W2, W3], // 30
    [W4, W2, W3, W5, W1],
    [W5, W2, W4, W1, W3],
    [W5, W3, W4, W1, W2],
    [W5, W2, W4, W1, W3],
    [W5, W3, W4, W1, W2], // 35
    [W1, W2, W3, W4, W5],
    [W5, W2, W1, W3, W4],
    [W5, W2, W1, W3, W4],
    [W3, W1, W2, W4, W5],
    [W1, W2, W4, W5, W3], // 40 outcomes & impacts
];

/// Read-only `topic -> role -> weight` table.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleWeights {
    table: BTreeMap<TopicId, BTreeMap<Role, f64>>,
}

impl RoleWeights {
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .zip(topic_ids())
            .fold(Self::empty(), |weights, (row, topic)| {
                weights.with_topic(topic, Role::ALL.map(|role| (role, row[role.index()])))
            })
    }

    pub fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// Replaces the weights of one topic. Ids outside the questionnaire are ignored.
    pub fn with_topic<I>(mut self, topic: TopicId, weights: I) -> Self
    where
        I: IntoIterator<Item = (Role, f64)>,
    {
        if topic_index(topic).is_some() {
            self.table.insert(topic, weights.into_iter().collect());
        }
        self
    }

    pub fn for_topic(&self, topic: TopicId) -> Option<&BTreeMap<Role, f64>> {
        self.table.get(&topic)
    }

    pub fn weight(&self, topic: TopicId, role: Role) -> Option<f64> {
        self.for_topic(topic)
            .and_then(|weights| weights.get(&role))
            .copied()
    }
}

impl Default for RoleWeights {
    fn default() -> Self {
        Self::builtin()
    }
}
