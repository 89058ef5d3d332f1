use crate::types::role::Role;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "maturity",
    version,
    about = "Asset management maturity survey store and role-weighted scoring CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record one completed questionnaire
    Submit(SubmitCommand),
    /// List companies with stored responses
    Companies(CompaniesCommand),
    /// Export a company's raw responses as CSV
    Responses(ResponsesCommand),
    /// Per-role and organization scores for a company
    Scores(ScoresCommand),
    /// Show the topic catalog or an answers template
    Topics(TopicsCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RoleArg {
    SeniorManagers,
    Executives,
    Supervisors,
    TechnicalExperts,
    NonTechnicalExperts,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::SeniorManagers => Role::SeniorManagers,
            RoleArg::Executives => Role::Executives,
            RoleArg::Supervisors => Role::Supervisors,
            RoleArg::TechnicalExperts => Role::TechnicalExperts,
            RoleArg::NonTechnicalExperts => Role::NonTechnicalExperts,
        }
    }
}

#[derive(Args)]
pub struct SubmitCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long, value_enum)]
    pub role: Option<RoleArg>,
    #[arg(long)]
    pub respondent: Option<String>,
    /// TOML (or .json) file with one entry per topic
    #[arg(long)]
    pub answers: PathBuf,
}

#[derive(Args)]
pub struct CompaniesCommand {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct ResponsesCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub company: String,
    /// Write a BOM-prefixed CSV file instead of printing
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct ScoresCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub company: String,
    /// Roles to show; defaults to all five
    #[arg(long, value_enum, value_delimiter = ',')]
    pub roles: Vec<RoleArg>,
    /// Topic window such as 1..40 or 5-12
    #[arg(long, default_value = "1..40")]
    pub topics: String,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct TopicsCommand {
    pub path: PathBuf,
    /// Print an answers-file skeleton instead of the topic list
    #[arg(long)]
    pub template: bool,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
    Csv,
}
