pub mod summary;
pub mod weights;

use crate::catalog::TopicCatalog;
use crate::types::record::{rescale, ResponseRecord};
use crate::types::report::{RoleSeries, ScoreReport, TopicLabel};
use crate::types::role::Role;
use crate::types::scoring::{RoleMeans, Score, TopicSeries};
use crate::types::topic::{topic_ids, TopicRange, TOPIC_COUNT};
use weights::RoleWeights;

/// Which slice of the dashboard a caller asked for.
#[derive(Debug, Clone)]
pub struct ScoreQuery {
    pub roles: Vec<Role>,
    pub range: TopicRange,
    pub target: Score,
    pub top_n: usize,
}

impl Default for ScoreQuery {
    fn default() -> Self {
        Self {
            roles: Role::ALL.to_vec(),
            range: TopicRange::full(),
            target: crate::types::config::DEFAULT_TARGET,
            top_n: crate::types::config::DEFAULT_TOP_N,
        }
    }
}

/// Mean rescaled score per topic for one role.
///
/// A role with no submissions yields an all-null series. Topics a stored
/// record left unanswered are skipped for that record instead of counting
/// as zero.
pub fn role_topic_means(records: &[ResponseRecord], role: Role) -> TopicSeries {
    let mut sums = [0.0_f64; TOPIC_COUNT];
    let mut counts = [0_usize; TOPIC_COUNT];

    for record in records.iter().filter(|record| record.role == Some(role)) {
        for (index, answer) in record.answers.iter().enumerate() {
            if let Some(answer) = answer {
                sums[index] += rescale(answer.adjusted());
                counts[index] += 1;
            }
        }
    }

    TopicSeries::from_values(
        sums.iter()
            .zip(counts.iter())
            .map(|(sum, count)| (*count > 0).then(|| sum / *count as f64))
            .collect(),
    )
}

pub fn role_means_by_role(records: &[ResponseRecord]) -> RoleMeans {
    Role::ALL
        .into_iter()
        .map(|role| (role, role_topic_means(records, role)))
        .collect()
}

/// Weighted composite per topic over the roles that actually have data.
///
/// Roles without a mean for a topic drop out of both the numerator and the
/// denominator; a topic with no contributing role stays null.
pub fn organization_series(role_means: &RoleMeans, weights: &RoleWeights) -> TopicSeries {
    TopicSeries::from_values(
        topic_ids()
            .map(|topic| {
                let (numerator, denominator) = Role::ALL.iter().fold(
                    (0.0_f64, 0.0_f64),
                    |(numerator, denominator), role| {
                        let weight = weights.weight(topic, *role);
                        let mean = role_means.get(role).and_then(|series| series.get(topic));
                        match (weight, mean) {
                            (Some(weight), Some(mean)) => {
                                (numerator + weight * mean, denominator + weight)
                            }
                            _ => (numerator, denominator),
                        }
                    },
                );
                (denominator != 0.0).then(|| numerator / denominator)
            })
            .collect(),
    )
}

/// Plain mean across roles per topic, ignoring roles without data.
pub fn cross_role_means(role_means: &RoleMeans) -> TopicSeries {
    TopicSeries::from_values(
        topic_ids()
            .map(|topic| {
                let present = role_means
                    .values()
                    .filter_map(|series| series.get(topic))
                    .collect::<Vec<Score>>();
                (!present.is_empty()).then(|| present.iter().sum::<Score>() / present.len() as f64)
            })
            .collect(),
    )
}

/// Builds the dashboard payload for one company.
///
/// The organization series always uses every role; `query.roles` only picks
/// which role series are returned. Summary figures cover all 40 topics while
/// the series and the top/bottom lists are cut to `query.range`.
pub fn score_report(
    company: &str,
    records: &[ResponseRecord],
    query: &ScoreQuery,
    weights: &RoleWeights,
    catalog: &TopicCatalog,
) -> ScoreReport {
    let role_means = role_means_by_role(records);
    let organization = organization_series(&role_means, weights);
    let headline = summary::summarize(&organization, &role_means, query.target, catalog);
    let (top, bottom) = summary::top_and_bottom(&organization, query.range, query.top_n, catalog);

    for role in &query.roles {
        if role_means.get(role).map_or(true, TopicSeries::is_empty) {
            tracing::warn!(company, role = %role, "role has no responses");
        }
    }

    ScoreReport {
        company: company.to_string(),
        participation: summary::participation(records),
        summary: headline,
        topics: query
            .range
            .ids()
            .map(|id| TopicLabel {
                id,
                name: catalog.name(id),
            })
            .collect(),
        roles: query
            .roles
            .iter()
            .map(|role| RoleSeries {
                role: *role,
                scores: role_means
                    .get(role)
                    .map(|series| series.slice(query.range))
                    .unwrap_or_else(|| vec![None; query.range.ids().count()]),
            })
            .collect(),
        organization: organization.slice(query.range),
        top,
        bottom,
    }
}
