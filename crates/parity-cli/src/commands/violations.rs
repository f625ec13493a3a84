//! Violation browsing CLI commands.

use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::Cli;
use crate::output;
use parity_core::config::DashboardConfig;
use parity_core::error::AppError;
use parity_core::traits::clock::SystemClock;
use parity_entity::user::Role;
use parity_entity::violation::{
    ChannelKind, ParityOutcome, RateAvailability, Severity, Violation,
};
use parity_service::violation::{DateRange, FilterState, ReasonFilter};

/// Arguments for violation commands
#[derive(Debug, Args)]
pub struct ViolationsArgs {
    /// Violations subcommand
    #[command(subcommand)]
    pub command: ViolationsCommand,
}

/// Violations subcommands
#[derive(Debug, Subcommand)]
pub enum ViolationsCommand {
    /// List one page of the filtered violation table
    List {
        /// Facet filters
        #[command(flatten)]
        filters: FilterArgs,
        /// Page number (clamped to the available pages)
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<u64>,
    },
    /// Show severity counts and revenue loss for the filtered violations
    Summary {
        /// Facet filters
        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Facet filters shared by violation commands
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Severity to include (repeatable)
    #[arg(long = "severity")]
    pub severities: Vec<Severity>,
    /// Rate or availability
    #[arg(long)]
    pub kind: Option<RateAvailability>,
    /// Exact reason to match
    #[arg(long, conflicts_with = "unassigned")]
    pub reason: Option<String>,
    /// Only violations without a reason
    #[arg(long)]
    pub unassigned: bool,
    /// First stay date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last stay date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// A single calendar day (YYYY-MM-DD)
    #[arg(long)]
    pub day: Option<NaiveDate>,
    /// Channel to include (repeatable)
    #[arg(long = "channel")]
    pub channels: Vec<String>,
    /// Hotel to include (repeatable)
    #[arg(long = "hotel")]
    pub hotels: Vec<String>,
    /// Win, loss or meet
    #[arg(long)]
    pub outcome: Option<ParityOutcome>,
    /// OTA or Meta
    #[arg(long)]
    pub channel_kind: Option<ChannelKind>,
    /// Text matched against hotel and channel names
    #[arg(long)]
    pub search: Option<String>,
}

impl FilterArgs {
    /// Convert the flags into a filter state.
    pub fn to_filter_state(&self) -> Result<FilterState, AppError> {
        let mut state = FilterState::new()
            .with_severities(self.severities.iter().copied())
            .with_channels(self.channels.iter().cloned())
            .with_locations(self.hotels.iter().cloned());

        state.kind = self.kind;
        state.outcome = self.outcome;
        state.channel_kind = self.channel_kind;
        state.search = self.search.clone();
        state.calendar_date = self.day;
        state.reason = match (&self.reason, self.unassigned) {
            (_, true) => ReasonFilter::Unassigned,
            (Some(reason), false) => ReasonFilter::Exact(reason.clone()),
            (None, false) => ReasonFilter::All,
        };
        state.date_range = match (self.from, self.to) {
            (Some(from), Some(to)) => Some(DateRange::new(from, to)),
            (Some(_), None) | (None, Some(_)) => {
                return Err(AppError::validation(
                    "--from and --to must be given together",
                ));
            }
            (None, None) => None,
        };
        Ok(state)
    }
}

/// One row of the violation table
#[derive(Debug, Serialize, Tabled)]
struct ViolationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Hotel")]
    hotel: String,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Stay")]
    stay_date: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Brand")]
    brand_rate: String,
    #[tabled(rename = "Gap")]
    gap: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "WLM")]
    outcome: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

impl From<&Violation> for ViolationRow {
    fn from(v: &Violation) -> Self {
        let channel = match &v.underlying_ota {
            Some(ota) => format!("{} ({})", v.channel, ota),
            None => v.channel.clone(),
        };
        Self {
            id: v.id.to_string(),
            hotel: v.hotel_name.clone(),
            channel,
            stay_date: v.stay_date.to_string(),
            rate: format!("{:.2} {}", v.rate, v.shop.point_of_sale),
            brand_rate: v
                .brand_rate
                .map(|r| format!("{r:.2}"))
                .unwrap_or_else(|| "n/a".to_string()),
            gap: v
                .rate_gap()
                .map(|g| format!("{g:+.2}"))
                .unwrap_or_else(|| "n/a".to_string()),
            severity: v.severity.to_string(),
            outcome: v.outcome.to_string(),
            reason: if v.reason.is_empty() {
                "-".to_string()
            } else {
                v.reason.clone()
            },
        }
    }
}

/// Severity count row
#[derive(Debug, Serialize, Tabled)]
struct SeverityRow {
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Count")]
    count: usize,
}

/// Execute violation commands
pub fn execute(args: &ViolationsArgs, cli: &Cli, config: DashboardConfig) -> Result<(), AppError> {
    let session = cli.session(config, Role::Corporate, Arc::new(SystemClock));

    match &args.command {
        ViolationsCommand::List {
            filters,
            page,
            page_size,
        } => {
            if let Some(size) = page_size {
                session.set_page_size(*size);
            }
            session.select_filters(filters.to_filter_state()?);
            session.change_page(*page);

            let result = session.filtered_page();
            let rows: Vec<ViolationRow> = result.items.iter().map(ViolationRow::from).collect();
            output::print_list(&rows, cli.format);
            if cli.format == output::OutputFormat::Table {
                println!(
                    "Page {}/{} ({} matching violations)",
                    result.page, result.total_pages, result.total_items
                );
            }
        }
        ViolationsCommand::Summary { filters } => {
            session.select_filters(filters.to_filter_state()?);
            let summary = session.summary();
            match cli.format {
                output::OutputFormat::Json => output::print_item(&summary, cli.format),
                output::OutputFormat::Table => {
                    let rows: Vec<SeverityRow> = Severity::ALL
                        .iter()
                        .rev()
                        .map(|s| SeverityRow {
                            severity: s.to_string(),
                            count: summary.count(*s),
                        })
                        .collect();
                    output::print_list(&rows, cli.format);
                    output::print_kv("Total", &summary.total.to_string());
                    output::print_kv("Unassigned", &summary.unassigned.to_string());
                    output::print_kv("Revenue loss", &format!("{:.2}", summary.revenue_loss));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        filters: FilterArgs,
    }

    #[test]
    fn test_filter_flags_map_to_state() {
        let h = Harness::parse_from([
            "test",
            "--severity",
            "critical",
            "--severity",
            "major",
            "--kind",
            "rate",
            "--unassigned",
            "--from",
            "2026-03-10",
            "--to",
            "2026-03-01",
            "--channel",
            "Expedia",
        ]);
        let state = h.filters.to_filter_state().unwrap();
        assert_eq!(state.severities.len(), 2);
        assert_eq!(state.kind, Some(RateAvailability::Rate));
        assert_eq!(state.reason, ReasonFilter::Unassigned);
        let range = state.date_range.unwrap();
        assert!(range.start() < range.end());
        assert!(state.channels.contains("Expedia"));
    }

    #[test]
    fn test_row_shows_signed_rate_gap() {
        let mut v = parity_service::violation::MockViolationGenerator::new(3).generate(1).remove(0);
        v.rate = 180.0;
        v.brand_rate = Some(200.0);
        assert_eq!(ViolationRow::from(&v).gap, "-20.00");
        v.brand_rate = None;
        assert_eq!(ViolationRow::from(&v).gap, "n/a");
    }

    #[test]
    fn test_half_open_range_is_rejected() {
        let h = Harness::parse_from(["test", "--from", "2026-03-10"]);
        assert!(h.filters.to_filter_state().is_err());
    }
}
