use crate::types::report::ScoreReport;

pub fn to_json(report: &ScoreReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn json_report_keeps_nulls_and_role_labels() {
        let rendered = to_json(&sample_report()).expect("json should serialize");
        assert!(rendered.contains("\"organization_average\": 40.99"));
        assert!(rendered.contains("\"role\": \"Senior Managers\""));
        assert!(rendered.contains("\"Non-Technical Experts\": 0"));

        let value: serde_json::Value =
            serde_json::from_str(&rendered).expect("json should parse back");
        assert!(value["organization"][1].is_null());
        assert!(value["roles"][1]["scores"][0].is_null());
    }
}
