pub mod config;
pub mod record;
pub mod report;
pub mod role;
pub mod scoring;
pub mod topic;
