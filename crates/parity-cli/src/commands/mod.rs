//! CLI command definitions and dispatch.

pub mod config;
pub mod notify;
pub mod violations;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use parity_core::config::DashboardConfig;
use parity_core::error::AppError;
use parity_core::traits::clock::Clock;
use parity_entity::user::Role;
use parity_service::violation::MockViolationGenerator;
use parity_service::{DashboardSession, SessionContext};

/// Rate parity dashboard tooling
#[derive(Debug, Parser)]
#[command(name = "parity-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Seed for the mock violation feed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of mock violations to load
    #[arg(long, default_value_t = 50)]
    pub count: usize,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse and summarize violations
    Violations(violations::ViolationsArgs),
    /// Simulate reason updates and escalations
    Notify(notify::NotifyArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: DashboardConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Violations(args) => violations::execute(args, self, config),
            Commands::Notify(args) => notify::execute(args, self, config).await,
            Commands::Config(args) => config::execute(args, &self.config, config, self.format),
        }
    }

    /// Build a session for `role` loaded with the mock feed.
    pub fn session(
        &self,
        config: DashboardConfig,
        role: Role,
        clock: Arc<dyn Clock>,
    ) -> DashboardSession {
        let violations = MockViolationGenerator::new(self.seed)
            .with_start_date(clock.now().date_naive())
            .with_reasons(config.reasons.options.clone())
            .generate(self.count);
        let session = DashboardSession::new(config, SessionContext::new(role), clock);
        session.load_violations(violations);
        session
    }
}

/// Helper: load configuration from file and environment
pub fn load_config(path: &str) -> Result<DashboardConfig, AppError> {
    DashboardConfig::load(path)
}
