use crate::types::role::Role;
use crate::types::scoring::{Participation, Score, ScoreSummary, TopicScore};
use crate::types::topic::TopicId;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TopicLabel {
    pub id: TopicId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleSeries {
    pub role: Role,
    pub scores: Vec<Option<Score>>,
}

/// Dashboard payload for one company and one topic window.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub company: String,
    pub participation: Participation,
    pub summary: ScoreSummary,
    pub topics: Vec<TopicLabel>,
    pub roles: Vec<RoleSeries>,
    pub organization: Vec<Option<Score>>,
    pub top: Vec<TopicScore>,
    pub bottom: Vec<TopicScore>,
}
