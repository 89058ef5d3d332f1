use super::cross_role_means;
use crate::catalog::TopicCatalog;
use crate::types::record::ResponseRecord;
use crate::types::role::Role;
use crate::types::scoring::{
    Participation, RoleMeans, Score, ScoreSummary, TopicScore, TopicSeries,
};
use crate::types::topic::{TopicId, TopicRange};
use std::cmp::Ordering;

pub fn organization_average(series: &TopicSeries) -> Score {
    let present = series.values().iter().flatten().collect::<Vec<_>>();
    if present.is_empty() {
        return 0.0;
    }
    present.iter().copied().sum::<Score>() / present.len() as f64
}

/// Share of scored topics at or above `target`, as a percentage.
pub fn pass_rate(series: &TopicSeries, target: Score) -> Score {
    let present = series.values().iter().flatten().collect::<Vec<_>>();
    if present.is_empty() {
        return 0.0;
    }
    let passing = present.iter().filter(|score| ***score >= target).count();
    passing as f64 / present.len() as f64 * 100.0
}

fn scored(series: &TopicSeries, ids: impl Iterator<Item = TopicId>) -> Vec<(TopicId, Score)> {
    ids.filter_map(|topic| series.get(topic).map(|score| (topic, score)))
        .collect()
}

fn topic_score(catalog: &TopicCatalog, (topic, score): (TopicId, Score)) -> TopicScore {
    TopicScore {
        topic,
        name: catalog.name(topic),
        score,
    }
}

/// Headline figures. Best and worst come from the unweighted cross-role mean;
/// ties go to the lowest topic id.
pub fn summarize(
    organization: &TopicSeries,
    role_means: &RoleMeans,
    target: Score,
    catalog: &TopicCatalog,
) -> ScoreSummary {
    let simple = cross_role_means(role_means);
    let candidates = scored(&simple, TopicRange::full().ids());

    let best = candidates.iter().copied().fold(None, |best, candidate| match best {
        Some((_, score)) if candidate.1 <= score => best,
        _ => Some(candidate),
    });
    let worst = candidates.iter().copied().fold(None, |worst, candidate| match worst {
        Some((_, score)) if candidate.1 >= score => worst,
        _ => Some(candidate),
    });

    ScoreSummary {
        organization_average: organization_average(organization),
        pass_rate: pass_rate(organization, target),
        target,
        best_topic: best.map(|entry| topic_score(catalog, entry)),
        worst_topic: worst.map(|entry| topic_score(catalog, entry)),
    }
}

/// Highest and lowest `n` scored topics within `range`, nulls left out.
pub fn top_and_bottom(
    series: &TopicSeries,
    range: TopicRange,
    n: usize,
    catalog: &TopicCatalog,
) -> (Vec<TopicScore>, Vec<TopicScore>) {
    let mut ascending = scored(series, range.ids());
    ascending.sort_by(|left, right| {
        left.1
            .partial_cmp(&right.1)
            .unwrap_or(Ordering::Equal)
            .then(left.0.cmp(&right.0))
    });
    let mut descending = ascending.clone();
    descending.sort_by(|left, right| {
        right
            .1
            .partial_cmp(&left.1)
            .unwrap_or(Ordering::Equal)
            .then(left.0.cmp(&right.0))
    });

    let top = descending
        .into_iter()
        .take(n)
        .map(|entry| topic_score(catalog, entry))
        .collect();
    let bottom = ascending
        .into_iter()
        .take(n)
        .map(|entry| topic_score(catalog, entry))
        .collect();
    (top, bottom)
}

pub fn participation(records: &[ResponseRecord]) -> Participation {
    let by_role = Role::ALL
        .into_iter()
        .map(|role| {
            let count = records
                .iter()
                .filter(|record| record.role == Some(role))
                .count();
            (role, count)
        })
        .collect();
    Participation {
        total: records.len(),
        by_role,
    }
}
