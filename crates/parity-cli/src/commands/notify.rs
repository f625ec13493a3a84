//! Notification simulation CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use tokio::sync::watch;

use super::Cli;
use crate::output;
use parity_core::config::DashboardConfig;
use parity_core::error::AppError;
use parity_core::traits::clock::SystemClock;
use parity_core::types::id::ViolationId;
use parity_entity::notification::{Notification, NotificationPayload};
use parity_entity::user::Role;
use parity_service::FlushWorker;

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotifyArgs {
    /// Notify subcommand
    #[command(subcommand)]
    pub command: NotifyCommand,
}

/// Notify subcommands
#[derive(Debug, Subcommand)]
pub enum NotifyCommand {
    /// Perform actions as one role and print the notifications they produce
    Simulate {
        /// Acting role: corporate, intermediate or single-property
        #[arg(long)]
        role: Role,
        /// Assign a reason, as ID=REASON (repeatable)
        #[arg(long = "set-reason", value_name = "ID=REASON")]
        reasons: Vec<String>,
        /// Escalate ("buzz") a violation (repeatable)
        #[arg(long = "escalate", value_name = "ID")]
        escalations: Vec<String>,
    },
    /// Decode a stored notification payload (single or batch form)
    Decode {
        /// Payload JSON, e.g. '{"violationIds":["v1","v2"],"count":2}'
        payload: String,
    },
}

/// One row of the notification table
#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    #[tabled(rename = "Audience")]
    audience: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Violations")]
    violations: String,
    #[tabled(rename = "From")]
    actor: String,
    #[tabled(rename = "Unread")]
    unread: bool,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            audience: n.audience.to_string(),
            kind: n.kind.to_string(),
            message: n.message.clone(),
            violations: n
                .violation_ids()
                .iter()
                .map(ViolationId::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            actor: n.actor.clone(),
            unread: n.is_unread(),
        }
    }
}

/// Execute notification commands
pub async fn execute(args: &NotifyArgs, cli: &Cli, config: DashboardConfig) -> Result<(), AppError> {
    match &args.command {
        NotifyCommand::Simulate {
            role,
            reasons,
            escalations,
        } => {
            let window = config.notifications.batch_window();
            let tick = config.notifications.flush_tick();
            let session = Arc::new(cli.session(config, *role, Arc::new(SystemClock)));

            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            let worker = FlushWorker::spawn(Arc::clone(&session), tick, shutdown_rx);

            for entry in reasons {
                let (id, reason) = entry.split_once('=').ok_or_else(|| {
                    AppError::validation(format!("Expected ID=REASON, got '{entry}'"))
                })?;
                let outcome = session.update_reason(&ViolationId::from(id.trim()), reason.trim());
                output::print_kv(&format!("reason {id}"), &format!("{outcome:?}"));
            }
            for id in escalations {
                let outcome = session.escalate(&ViolationId::from(id.trim()));
                output::print_kv(&format!("escalate {id}"), &format!("{outcome:?}"));
            }

            // Let the batch window close and the worker pick it up.
            tokio::time::sleep(window + tick * 2).await;
            let _ = shutdown_tx.send(true);
            worker
                .await
                .map_err(|e| AppError::internal(format!("Flush worker failed: {e}")))?;

            let rows: Vec<NotificationRow> = Role::ALL
                .iter()
                .flat_map(|audience| session.notifications(*audience))
                .map(|n| NotificationRow::from(&n))
                .collect();
            output::print_heading("Notifications");
            output::print_list(&rows, cli.format);
            for audience in Role::ALL {
                output::print_kv(
                    &format!("unread ({})", audience.label()),
                    &session.unread_count(audience).to_string(),
                );
            }
        }
        NotifyCommand::Decode { payload } => {
            let decoded = NotificationPayload::from_json(payload)?;
            let ids: Vec<String> = decoded
                .violation_ids()
                .iter()
                .map(ViolationId::to_string)
                .collect();
            output::print_kv("form", if decoded.is_batch() { "batch" } else { "single" });
            output::print_kv("violations", &ids.join(", "));
            output::print_kv("count", &decoded.count().to_string());
        }
    }
    Ok(())
}
