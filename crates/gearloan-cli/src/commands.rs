// Rust guideline compliant 2026-10-19

//! Command implementations for the Gearloan CLI.
//!
//! Every command runs against an [`InventoryService`] and renders its result
//! through an [`OutputFormatter`], so the same code serves one-shot
//! invocations and interactive sessions.

use crate::OutputFormatter;
use chrono::{DateTime, Utc};
use gearloan_app::{AppError, InventoryService, Result};
use gearloan_core::ALL_CATEGORIES;

pub mod admin;
pub mod borrow;
pub mod catalog;
pub mod history;
pub mod overdue;
pub mod returns;

/// Maintenance switch position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

/// Gearloan subcommands.
#[derive(Debug, Clone, clap::Subcommand)]
pub enum Command {
    /// List catalog items with their live status
    Catalog {
        /// Case-insensitive text matched against name and description
        #[arg(long)]
        search: Option<String>,

        /// Category to show ("All" for every category)
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,
    },

    /// List category picker values
    Categories,

    /// Show one item and its active loans
    Show {
        /// Item ID
        item_id: String,
    },

    /// Borrow one unit of an item
    Borrow {
        /// Item ID
        item_id: String,

        /// Borrower ID (e.g. student number)
        #[arg(long)]
        borrower_id: String,

        /// Borrower name
        #[arg(long)]
        name: String,

        /// Borrow time (RFC 3339)
        #[arg(long)]
        from: DateTime<Utc>,

        /// Expected return time (RFC 3339)
        #[arg(long)]
        until: DateTime<Utc>,

        /// Purpose of the loan
        #[arg(long)]
        purpose: Option<String>,
    },

    /// Show a borrower's records, oldest first
    History {
        /// Borrower ID
        borrower_id: String,
    },

    /// Return a borrowed unit
    Return {
        /// Record ID (full or unique prefix)
        record_id: String,
    },

    /// List active loans past their expected return time
    Overdue {
        /// Reference time (RFC 3339), defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// Put an item into or out of maintenance
    Maintenance {
        /// Item ID
        item_id: String,

        /// New maintenance state
        #[arg(value_enum)]
        mode: Toggle,
    },

    /// Withdraw an item from the catalog
    Retire {
        /// Item ID
        item_id: String,
    },

    /// Verify that quantities match active records
    Check,

    /// Read commands from stdin against one in-memory inventory
    Session,
}

/// Runs one command and returns its rendered output.
///
/// # Errors
///
/// Returns the service error of the failed operation. `session` cannot be
/// run from here and is rejected as invalid input.
pub fn run(
    service: &InventoryService,
    command: Command,
    formatter: &dyn OutputFormatter,
) -> Result<String> {
    match command {
        Command::Catalog { search, category } => {
            Ok(catalog::list(service, search, category, formatter))
        }
        Command::Categories => Ok(catalog::categories(service, formatter)),
        Command::Show { item_id } => catalog::show(service, &item_id, formatter),
        Command::Borrow {
            item_id,
            borrower_id,
            name,
            from,
            until,
            purpose,
        } => borrow::execute(
            service,
            &item_id,
            borrower_id,
            name,
            from,
            until,
            purpose,
            formatter,
        ),
        Command::History { borrower_id } => history::execute(service, &borrower_id, formatter),
        Command::Return { record_id } => returns::execute(service, &record_id, formatter),
        Command::Overdue { at } => Ok(overdue::execute(service, at, formatter)),
        Command::Maintenance { item_id, mode } => {
            admin::maintenance(service, &item_id, mode == Toggle::On, formatter)
        }
        Command::Retire { item_id } => admin::retire(service, &item_id, formatter),
        Command::Check => admin::check(service, formatter),
        Command::Session => Err(AppError::InvalidInput(
            "session cannot be started from within a session".to_string(),
        )),
    }
}
