pub mod codec;
pub mod lock;

use crate::error::{MaturityError, Result};
use crate::types::record::ResponseRecord;
use lock::CompanyLock;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const RESPONSES_FILE: &str = "responses.csv";

/// Turns free-typed company text into a stable, path-safe partition name.
pub fn sanitize_company_name(name: &str) -> String {
    let replaced = name.trim().replace('/', "\u{ff0f}").replace('\\', "\u{ff3c}");
    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.trim_matches('.').trim().to_string()
}

/// Append-only response ledger, one partition directory per company.
#[derive(Debug, Clone)]
pub struct ResponseStore {
    root: PathBuf,
}

impl ResponseStore {
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn company_key(company: &str) -> Result<String> {
        let key = sanitize_company_name(company);
        if key.is_empty() {
            return Err(MaturityError::MissingCompany);
        }
        Ok(key)
    }

    pub fn company_dir(&self, company: &str) -> Result<PathBuf> {
        Ok(self.root.join(Self::company_key(company)?))
    }

    /// Validates `record` and appends it to the company's ledger.
    ///
    /// The whole table is re-read and rewritten under an exclusive lock, so
    /// concurrent writers are serialized instead of overwriting each other.
    /// Returns the number of stored records after the append.
    pub fn append(&self, company: &str, mut record: ResponseRecord) -> Result<usize> {
        let key = Self::company_key(company)?;
        record.company = key.clone();
        record.validate()?;

        let dir = self.root.join(&key);
        fs::create_dir_all(&dir)?;
        let _lock = CompanyLock::acquire(&dir)?;

        let path = dir.join(RESPONSES_FILE);
        let mut records = read_table(&path)?;
        records.push(record);
        write_table(&path, &records)?;

        tracing::info!(company = %key, count = records.len(), "response appended");
        Ok(records.len())
    }

    /// Every record for `company` in submission order; empty when nothing was stored.
    pub fn load(&self, company: &str) -> Result<Vec<ResponseRecord>> {
        let path = self.company_dir(company)?.join(RESPONSES_FILE);
        let records = read_table(&path)?;
        tracing::debug!(path = %path.display(), count = records.len(), "responses loaded");
        Ok(records)
    }

    /// Raw ledger bytes for export, `None` when the company has no responses.
    pub fn export(&self, company: &str) -> Result<Option<Vec<u8>>> {
        let path = self.company_dir(company)?.join(RESPONSES_FILE);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(MaturityError::Io(error)),
        }
    }

    /// Companies whose partition holds a ledger. A ledger is only ever written
    /// together with its first record.
    pub fn list_companies_with_data(&self) -> Result<BTreeSet<String>> {
        let mut companies = BTreeSet::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| MaturityError::Io(e.into()))?;
            if !entry.file_type().is_dir() || !entry.path().join(RESPONSES_FILE).is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                companies.insert(name.to_string());
            }
        }
        Ok(companies)
    }
}

fn read_table(path: &Path) -> Result<Vec<ResponseRecord>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => return Err(MaturityError::Io(error)),
    };
    codec::read_records(BufReader::new(file))
}

fn write_table(path: &Path, records: &[ResponseRecord]) -> Result<()> {
    let staging = path.with_extension("csv.tmp");
    {
        let mut writer = BufWriter::new(File::create(&staging)?);
        codec::write_records(&mut writer, records)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }
    fs::rename(&staging, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::{MaturityLevel, Relevance, TopicAnswer};
    use crate::types::role::Role;
    use crate::types::topic::TOPIC_COUNT;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn record_for(role: Role, respondent: &str) -> ResponseRecord {
        ResponseRecord::new("", Some(respondent), Some(role)).with_answers(
            [TopicAnswer::new(MaturityLevel::Developing, Relevance::Partial); TOPIC_COUNT],
        )
    }

    #[test]
    fn sanitize_normalizes_whitespace_periods_and_separators() {
        assert_eq!(sanitize_company_name("  Acme   Holding  "), "Acme Holding");
        assert_eq!(sanitize_company_name("Acme Inc."), "Acme Inc");
        assert_eq!(sanitize_company_name("North/South\\Co"), "North\u{ff0f}South\u{ff3c}Co");
        assert_eq!(sanitize_company_name("Acme\t\nCo"), "Acme Co");
        assert_eq!(sanitize_company_name(".."), "");
    }

    #[test]
    fn load_of_unknown_company_is_empty() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = ResponseStore::open(dir.path()).expect("store should open");
        let records = store.load("Nobody").expect("load should succeed");
        assert!(records.is_empty());
        assert!(store
            .list_companies_with_data()
            .expect("list should succeed")
            .is_empty());
    }

    #[test]
    fn append_preserves_submission_order() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = ResponseStore::open(dir.path()).expect("store should open");

        let names = ["first", "second", "third"];
        for (position, name) in names.iter().enumerate() {
            let count = store
                .append("Acme", record_for(Role::Executives, name))
                .expect("append should succeed");
            assert_eq!(count, position + 1);
        }

        let records = store.load("Acme").expect("load should succeed");
        let respondents = records
            .iter()
            .map(|record| record.respondent.as_deref().unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(respondents, names);
        assert!(records.iter().all(|record| record.company == "Acme"));
    }

    #[test]
    fn append_rejects_incomplete_record_without_writing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = ResponseStore::open(dir.path()).expect("store should open");
        store
            .append("Acme", record_for(Role::Executives, "ok"))
            .expect("complete record should append");

        let mut partial = record_for(Role::Executives, "partial");
        partial.answers[17] = None;
        let err = store
            .append("Acme", partial)
            .expect_err("partial record should be rejected");
        assert!(err.is_validation());
        assert_eq!(store.load("Acme").expect("load should succeed").len(), 1);
    }

    #[test]
    fn append_rejects_blank_company_and_missing_role() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = ResponseStore::open(dir.path()).expect("store should open");

        let err = store
            .append("  . ", record_for(Role::Executives, "x"))
            .expect_err("blank company should be rejected");
        assert!(matches!(err, MaturityError::MissingCompany));

        let mut no_role = record_for(Role::Executives, "x");
        no_role.role = None;
        let err = store
            .append("Acme", no_role)
            .expect_err("missing role should be rejected");
        assert!(matches!(err, MaturityError::MissingRole));
        assert!(store
            .list_companies_with_data()
            .expect("list should succeed")
            .is_empty());
    }

    #[test]
    fn variant_spellings_share_one_partition() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = ResponseStore::open(dir.path()).expect("store should open");
        store
            .append("Acme  Co.", record_for(Role::Executives, "a"))
            .expect("append should succeed");
        store
            .append(" Acme Co", record_for(Role::SeniorManagers, "b"))
            .expect("append should succeed");

        let companies = store.list_companies_with_data().expect("list should succeed");
        assert_eq!(companies.into_iter().collect::<Vec<_>>(), vec!["Acme Co"]);
        assert_eq!(store.load("Acme Co").expect("load should succeed").len(), 2);
    }

    #[test]
    fn concurrent_appends_are_all_persisted() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = Arc::new(ResponseStore::open(dir.path()).expect("store should open"));

        let handles = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for round in 0..5 {
                        store
                            .append(
                                "Acme",
                                record_for(Role::TechnicalExperts, &format!("{worker}-{round}")),
                            )
                            .expect("append should succeed");
                    }
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.join().expect("worker should not panic");
        }

        assert_eq!(store.load("Acme").expect("load should succeed").len(), 40);
    }

    #[test]
    fn export_returns_raw_table() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = ResponseStore::open(dir.path()).expect("store should open");
        assert!(store.export("Acme").expect("export should succeed").is_none());

        store
            .append("Acme", record_for(Role::Executives, "a"))
            .expect("append should succeed");
        let bytes = store
            .export("Acme")
            .expect("export should succeed")
            .expect("table should exist");
        let text = String::from_utf8(bytes).expect("table should be utf-8");
        assert!(text.starts_with("timestamp,company,respondent,role,t1_maturity"));
    }
}
