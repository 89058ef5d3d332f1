use crate::error::Result;
use crate::types::record::{ResponseRecord, TopicAnswer};
use crate::types::role::Role;
use crate::types::topic::{topic_ids, TopicId, TOPIC_COUNT};
use csv::StringRecord;
use std::collections::HashMap;
use std::io::{Read, Write};

const FIXED_COLUMNS: [&str; 4] = ["timestamp", "company", "respondent", "role"];

pub fn maturity_column(topic: TopicId) -> String {
    format!("t{topic}_maturity")
}

pub fn relevance_column(topic: TopicId) -> String {
    format!("t{topic}_rel")
}

pub fn adjusted_column(topic: TopicId) -> String {
    format!("t{topic}_adj")
}

pub fn header() -> Vec<String> {
    let mut columns = FIXED_COLUMNS
        .iter()
        .map(|column| (*column).to_string())
        .collect::<Vec<_>>();
    for topic in topic_ids() {
        columns.push(maturity_column(topic));
        columns.push(relevance_column(topic));
        columns.push(adjusted_column(topic));
    }
    columns
}

fn encode(record: &ResponseRecord) -> Vec<String> {
    let mut row = Vec::with_capacity(FIXED_COLUMNS.len() + TOPIC_COUNT * 3);
    row.push(record.timestamp.clone());
    row.push(record.company.clone());
    row.push(record.respondent.clone().unwrap_or_default());
    row.push(record.role.map(|role| role.label().to_string()).unwrap_or_default());
    for answer in &record.answers {
        match answer {
            Some(answer) => {
                row.push(answer.maturity.value().to_string());
                row.push(answer.relevance.value().to_string());
                row.push(answer.adjusted().to_string());
            }
            None => row.extend(std::iter::repeat(String::new()).take(3)),
        }
    }
    row
}

pub fn write_records<W: Write>(writer: W, records: &[ResponseRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(header())?;
    for record in records {
        csv_writer.write_record(encode(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Reads rows by column name so tables written with extra or reordered columns still load.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ResponseRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(position, name)| (name.trim_start_matches('\u{feff}').to_string(), position))
        .collect::<HashMap<_, _>>();

    let mut records = Vec::new();
    for row in csv_reader.records() {
        records.push(decode(&row?, &columns));
    }
    Ok(records)
}

fn decode(row: &StringRecord, columns: &HashMap<String, usize>) -> ResponseRecord {
    let cell = |name: &str| {
        columns
            .get(name)
            .and_then(|position| row.get(*position))
            .map(str::trim)
            .unwrap_or_default()
    };

    let role_cell = cell("role");
    let role = if role_cell.is_empty() {
        None
    } else {
        match role_cell.parse::<Role>() {
            Ok(role) => Some(role),
            Err(_) => {
                tracing::warn!(role = role_cell, "stored response has unknown role");
                None
            }
        }
    };
    let respondent = cell("respondent");

    let mut record = ResponseRecord {
        timestamp: cell("timestamp").to_string(),
        company: cell("company").to_string(),
        respondent: (!respondent.is_empty()).then(|| respondent.to_string()),
        role,
        answers: [None; TOPIC_COUNT],
    };

    for (index, topic) in topic_ids().enumerate() {
        let maturity = parse_level(cell(&maturity_column(topic)));
        let relevance = parse_level(cell(&relevance_column(topic)));
        let answer = match (maturity, relevance) {
            (Some(maturity), Some(relevance)) => {
                TopicAnswer::from_values(i64::from(maturity), i64::from(relevance)).ok()
            }
            _ => None,
        };
        if let Some(answer) = answer {
            if parse_level(cell(&adjusted_column(topic))) != Some(answer.adjusted()) {
                tracing::debug!(topic, "stored adjusted score disagrees with answers; recomputed");
            }
            record.answers[index] = Some(answer);
        }
    }
    record
}

/// Accepts integral cells written either as `3` or `3.0`.
fn parse_level(value: &str) -> Option<u8> {
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = value.parse::<u8>() {
        return Some(parsed);
    }
    let parsed = value.parse::<f64>().ok()?;
    (parsed.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&parsed)).then(|| parsed as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::{MaturityLevel, Relevance};

    fn sample_record() -> ResponseRecord {
        let mut record = ResponseRecord::new("Acme", Some("Dana"), Some(Role::TechnicalExperts))
            .with_answers([TopicAnswer::new(MaturityLevel::Recognised, Relevance::Low); TOPIC_COUNT]);
        record
            .set_answer(1, TopicAnswer::new(MaturityLevel::Implemented, Relevance::High))
            .expect("topic 1 should be settable");
        record
    }

    #[test]
    fn header_has_three_columns_per_topic() {
        let columns = header();
        assert_eq!(columns.len(), 4 + TOPIC_COUNT * 3);
        assert_eq!(columns[4], "t1_maturity");
        assert_eq!(columns[5], "t1_rel");
        assert_eq!(columns[6], "t1_adj");
        assert_eq!(columns.last().map(String::as_str), Some("t40_adj"));
    }

    #[test]
    fn written_rows_carry_adjusted_scores() {
        let mut buffer = Vec::new();
        write_records(&mut buffer, &[sample_record()]).expect("write should succeed");
        let text = String::from_utf8(buffer).expect("csv should be utf-8");
        let row = text.lines().nth(1).expect("data row should exist");
        assert!(row.contains(",Dana,Technical Experts,3,7,21,1,3,3,"));
    }

    #[test]
    fn blank_cells_decode_as_unanswered_topics() {
        let mut columns = header();
        columns.truncate(7);
        let text = format!(
            "{}\n2025-01-01T10:00:00,Acme,,Executives,2,5,10\n",
            columns.join(",")
        );
        let records = read_records(text.as_bytes()).expect("read should succeed");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].role, Some(Role::Executives));
        assert_eq!(records[0].respondent, None);
        assert_eq!(records[0].answers[0].map(|answer| answer.adjusted()), Some(10));
        assert_eq!(records[0].missing_topics().len(), TOPIC_COUNT - 1);
    }

    #[test]
    fn float_cells_and_bom_header_are_tolerated() {
        let text = "\u{feff}timestamp,company,respondent,role,t1_maturity,t1_rel,t1_adj\n\
                    2025-01-01T10:00:00,Acme,Lee,Senior Managers,3.0,7.0,21.0\n";
        let records = read_records(text.as_bytes()).expect("read should succeed");
        assert_eq!(records[0].timestamp, "2025-01-01T10:00:00");
        assert_eq!(records[0].answers[0].map(|answer| answer.adjusted()), Some(21));
    }

    #[test]
    fn unknown_role_decodes_as_unset() {
        let text = "timestamp,company,respondent,role\n2025-01-01T10:00:00,Acme,,Interns\n";
        let records = read_records(text.as_bytes()).expect("read should succeed");
        assert_eq!(records[0].role, None);
    }

    #[test]
    fn parse_level_rejects_fractions_and_text() {
        assert_eq!(parse_level("4"), Some(4));
        assert_eq!(parse_level("4.0"), Some(4));
        assert_eq!(parse_level("4.5"), None);
        assert_eq!(parse_level("n/a"), None);
        assert_eq!(parse_level(""), None);
    }
}
