//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use parity_core::config::DashboardConfig;
use parity_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration and print key settings
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config_path: &str,
    config: DashboardConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => output::print_item(&config, format),
        ConfigCommand::Validate => {
            config.validate()?;
            output::print_success(&format!("Configuration '{}' is valid", config_path));
            output::print_kv(
                "Batch window",
                &format!("{} ms", config.notifications.batch_window_ms),
            );
            output::print_kv(
                "Flush tick",
                &format!("{} ms", config.notifications.flush_tick_ms),
            );
            output::print_kv(
                "Page size",
                &format!(
                    "{} (max {})",
                    config.filter.default_page_size, config.filter.max_page_size
                ),
            );
            output::print_kv("Reasons", &config.reasons.options.join(", "));
            output::print_kv(
                "Logging",
                &format!("{} ({})", config.logging.level, config.logging.format),
            );
        }
    }
    Ok(())
}
