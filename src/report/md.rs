use super::format_score;
use crate::types::report::ScoreReport;
use crate::types::scoring::TopicScore;

fn topic_line(entry: Option<&TopicScore>) -> String {
    match entry {
        Some(entry) => format!("{:02} {} ({:.1})", entry.topic, entry.name, entry.score),
        None => "-".to_string(),
    }
}

pub fn to_markdown(report: &ScoreReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Maturity Report: {}\n\n", report.company));

    output.push_str("## Participation\n\n");
    output.push_str(&format!("Total responses: {}\n\n", report.participation.total));
    for (role, count) in &report.participation.by_role {
        output.push_str(&format!("- {role}: {count}\n"));
    }
    output.push('\n');

    let summary = &report.summary;
    output.push_str("## Summary\n\n");
    output.push_str(&format!(
        "- organization average (weighted): {:.1} / 100\n- pass rate (>= {:.0}): {:.0}%\n- best topic: {}\n- worst topic: {}\n\n",
        summary.organization_average,
        summary.target,
        summary.pass_rate,
        topic_line(summary.best_topic.as_ref()),
        topic_line(summary.worst_topic.as_ref())
    ));

    output.push_str("## Scores\n\n");
    output.push_str("| # | Topic |");
    for series in &report.roles {
        output.push_str(&format!(" {} |", series.role));
    }
    output.push_str(" Organization |\n|---|---|");
    for _ in &report.roles {
        output.push_str("---|");
    }
    output.push_str("---|\n");
    for (position, topic) in report.topics.iter().enumerate() {
        output.push_str(&format!("| {:02} | {} |", topic.id, topic.name));
        for series in &report.roles {
            let score = series.scores.get(position).copied().flatten();
            output.push_str(&format!(" {} |", format_score(score)));
        }
        let organization = report.organization.get(position).copied().flatten();
        output.push_str(&format!(" {} |\n", format_score(organization)));
    }
    output.push('\n');

    for (title, entries) in [("Top topics", &report.top), ("Bottom topics", &report.bottom)] {
        output.push_str(&format!("## {title}\n\n"));
        if entries.is_empty() {
            output.push_str("- none\n\n");
            continue;
        }
        for entry in entries {
            output.push_str(&format!(
                "- {:02} {}: {:.1}\n",
                entry.topic, entry.name, entry.score
            ));
        }
        output.push('\n');
    }

    output
}
