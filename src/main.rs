mod aggregate;
mod catalog;
mod cli;
mod config;
mod error;
mod report;
mod store;
mod types;

use crate::aggregate::weights::RoleWeights;
use crate::aggregate::ScoreQuery;
use crate::catalog::TopicCatalog;
use crate::error::MaturityError;
use crate::store::ResponseStore;
use crate::types::config::SurveyConfig;
use crate::types::record::{AnswerSheet, ResponseRecord};
use crate::types::role::Role;
use crate::types::topic::TopicRange;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const REJECTED: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

struct Workspace {
    config: SurveyConfig,
    catalog: TopicCatalog,
    store: ResponseStore,
}

impl Workspace {
    fn open(path: &Path) -> Result<Self, MaturityError> {
        if !path.exists() {
            return Err(MaturityError::PathNotFound(path.display().to_string()));
        }
        let config = config::load_config(path)?;
        let catalog = TopicCatalog::load_or_seed(&path.join(config.topics_file()))?;
        let store = ResponseStore::open(&path.join(config.data_dir()))?;
        Ok(Self {
            config,
            catalog,
            store,
        })
    }

    /// Success, downgraded to a warning exit when the catalog is malformed.
    fn finish(&self) -> i32 {
        if self.catalog.warnings().is_empty() {
            exit_code::SUCCESS
        } else {
            for warning in self.catalog.warnings() {
                eprintln!("warning: {warning}");
            }
            exit_code::WARNINGS
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("maturity={default_level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

fn read_answers(path: &Path) -> Result<AnswerSheet, MaturityError> {
    if !path.exists() {
        return Err(MaturityError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let sheet = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(sheet)
}

fn run() -> Result<i32, MaturityError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Submit(cmd) => {
            if !cmd.path.exists() {
                return Err(MaturityError::PathNotFound(cmd.path.display().to_string()));
            }
            let sheet = read_answers(&cmd.answers)?;
            let company = store::sanitize_company_name(&cmd.company.unwrap_or_default());

            let mut record = ResponseRecord::new(
                &company,
                cmd.respondent.as_deref(),
                cmd.role.map(Role::from),
            );
            sheet.apply_to(&mut record)?;
            record.validate()?;

            let workspace = Workspace::open(&cmd.path)?;
            let count = workspace.store.append(&company, record)?;

            if !cli.quiet {
                println!("submitted: {company} ({count} responses stored)");
            }
            Ok(workspace.finish())
        }
        cli::Commands::Companies(cmd) => {
            let workspace = Workspace::open(&cmd.path)?;
            let companies = workspace.store.list_companies_with_data()?;
            if companies.is_empty() {
                println!("companies: no responses recorded yet");
            }
            for company in &companies {
                println!("{company}");
            }
            Ok(workspace.finish())
        }
        cli::Commands::Responses(cmd) => {
            let workspace = Workspace::open(&cmd.path)?;
            let bytes = workspace
                .store
                .export(&cmd.company)?
                .ok_or_else(|| MaturityError::CompanyNotFound(cmd.company.clone()))?;

            match cmd.out {
                Some(out) => {
                    let mut content = Vec::with_capacity(bytes.len() + 3);
                    content.extend_from_slice("\u{feff}".as_bytes());
                    content.extend_from_slice(&bytes);
                    std::fs::write(&out, content)?;
                    if !cli.quiet {
                        println!("exported: {}", out.display());
                    }
                }
                None => print!("{}", String::from_utf8_lossy(&bytes)),
            }
            Ok(workspace.finish())
        }
        cli::Commands::Scores(cmd) => {
            let workspace = Workspace::open(&cmd.path)?;
            let range: TopicRange = cmd.topics.parse()?;
            let records = workspace.store.load(&cmd.company)?;
            if records.is_empty() {
                return Err(MaturityError::CompanyNotFound(cmd.company));
            }

            let roles = if cmd.roles.is_empty() {
                Role::ALL.to_vec()
            } else {
                cmd.roles.into_iter().map(Role::from).collect()
            };
            let query = ScoreQuery {
                roles,
                range,
                target: workspace.config.target(),
                top_n: workspace.config.top_n(),
            };
            let score_report = aggregate::score_report(
                &store::sanitize_company_name(&cmd.company),
                &records,
                &query,
                &RoleWeights::builtin(),
                &workspace.catalog,
            );

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
                cli::ReportFormat::Csv => report::OutputFormat::Csv,
            };
            let rendered = report::render(&score_report, output_format)?;
            println!("{rendered}");
            Ok(workspace.finish())
        }
        cli::Commands::Topics(cmd) => {
            let workspace = Workspace::open(&cmd.path)?;
            if cmd.template {
                print!("{}", catalog::answer_template(&workspace.catalog));
            } else {
                for topic in workspace.catalog.topics() {
                    println!("{:02} {}", topic.id, topic.name);
                }
            }
            Ok(workspace.finish())
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            if e.is_validation() {
                std::process::exit(exit_code::REJECTED);
            }
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
