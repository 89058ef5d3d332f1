use super::format_score;
use crate::error::Result;
use crate::types::report::ScoreReport;

/// One row per topic: id, name, each selected role, then the organization score.
pub fn to_csv(report: &ScoreReport) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());

    let mut header = vec!["topic".to_string(), "name".to_string()];
    header.extend(report.roles.iter().map(|series| series.role.to_string()));
    header.push("organization".to_string());
    writer.write_record(&header)?;

    for (position, topic) in report.topics.iter().enumerate() {
        let mut row = vec![topic.id.to_string(), topic.name.clone()];
        for series in &report.roles {
            row.push(format_score(series.scores.get(position).copied().flatten()));
        }
        row.push(format_score(
            report.organization.get(position).copied().flatten(),
        ));
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| crate::error::MaturityError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn csv_report_has_role_columns_and_dash_for_missing() {
        let rendered = to_csv(&sample_report()).expect("csv should render");
        let mut lines = rendered.lines();
        assert_eq!(
            lines.next(),
            Some("topic,name,Senior Managers,Technical Experts,organization")
        );
        assert_eq!(lines.next(), Some("1,Purpose & Context,52.5,-,41.0"));
        assert_eq!(lines.next(), Some("2,Stakeholder Management,25.0,-,-"));
    }
}
