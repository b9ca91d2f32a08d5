// Rust guideline compliant 2026-10-19

//! Output formatting module for the Gearloan CLI.
//!
//! This module provides functionality for formatting inventory data
//! in various output formats (JSON, table, plain text).

use crate::terminal::wrap_text;
use chrono::{DateTime, Utc};
use gearloan_app::{AppError, Confirmation, ErrorEnvelope, SuccessEnvelope};
use gearloan_core::{BorrowRecord, ItemStatus, ItemView, OutputFormat, RecordState};
use serde::Serialize;
use serde_json::json;
use std::io::Write;
use tabled::{builder::Builder, settings::Style};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Output formatter trait.
///
/// Defines the interface for formatting inventory data in different output formats.
pub trait OutputFormatter {
    /// Formats a catalog listing.
    fn format_items(&self, items: &[ItemView]) -> String;

    /// Formats one item together with its active loans.
    fn format_item(&self, item: &ItemView, active: &[BorrowRecord]) -> String;

    /// Formats the category picker values.
    fn format_categories(&self, categories: &[String]) -> String;

    /// Formats a borrow confirmation.
    fn format_confirmation(&self, confirmation: &Confirmation) -> String;

    /// Formats a single record, e.g. after a return.
    fn format_record(&self, record: &BorrowRecord) -> String;

    /// Formats a list of records.
    fn format_records(&self, records: &[BorrowRecord]) -> String;

    /// Formats a short success message.
    fn format_message(&self, message: &str) -> String;

    /// Formats an error for display.
    fn format_error(&self, error: &AppError) -> String;
}

fn status_label(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::Available => "Available",
        ItemStatus::FullyBorrowed => "Fully borrowed",
        ItemStatus::UnderMaintenance => "Under maintenance",
    }
}

fn state_label(state: RecordState) -> &'static str {
    match state {
        RecordState::Active => "Active",
        RecordState::Returned => "Returned",
    }
}

fn short_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

fn to_json<T: Serialize + ?Sized>(value: &T, what: &str) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|_| json!({ "error": format!("Failed to serialize {}", what) }).to_string())
}

/// JSON output formatter.
///
/// Formats data as valid JSON for machine consumption.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_items(&self, items: &[ItemView]) -> String {
        to_json(&json!({ "items": items, "total": items.len() }), "item list")
    }

    fn format_item(&self, item: &ItemView, active: &[BorrowRecord]) -> String {
        to_json(&json!({ "item": item, "activeLoans": active }), "item")
    }

    fn format_categories(&self, categories: &[String]) -> String {
        to_json(&json!({ "categories": categories }), "categories")
    }

    fn format_confirmation(&self, confirmation: &Confirmation) -> String {
        to_json(confirmation, "confirmation")
    }

    fn format_record(&self, record: &BorrowRecord) -> String {
        to_json(record, "record")
    }

    fn format_records(&self, records: &[BorrowRecord]) -> String {
        to_json(&json!({ "records": records, "total": records.len() }), "record list")
    }

    fn format_message(&self, message: &str) -> String {
        to_json(&SuccessEnvelope::new(message), "message")
    }

    fn format_error(&self, error: &AppError) -> String {
        to_json(&ErrorEnvelope::from_error(error), "error")
    }
}

/// Table output formatter.
///
/// Formats data as human-readable tables with colors and alignment.
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    /// Creates a new table formatter.
    ///
    /// # Arguments
    /// * `use_color` - Whether to use colored output
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colored(&self, text: &str, color: Color) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let mut buffer = Buffer::ansi();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(buffer, "{}", text);
        let _ = buffer.reset();
        String::from_utf8_lossy(buffer.as_slice()).to_string()
    }

    fn status_color(status: ItemStatus) -> Color {
        match status {
            ItemStatus::Available => Color::Green,
            ItemStatus::FullyBorrowed => Color::Red,
            ItemStatus::UnderMaintenance => Color::Yellow,
        }
    }

    fn records_table(records: &[BorrowRecord]) -> String {
        let mut builder = Builder::default();
        builder.push_record(vec![
            "Record", "Item", "Borrower", "Name", "Borrowed", "Due", "Returned", "State",
        ]);

        for record in records {
            builder.push_record(vec![
                record.record_id.to_string(),
                record.item_id.to_string(),
                record.borrower_id.clone(),
                record.borrower_name.clone(),
                short_time(&record.borrow_time),
                short_time(&record.expected_return_time),
                record
                    .actual_return_time
                    .as_ref()
                    .map(short_time)
                    .unwrap_or_else(|| "-".to_string()),
                state_label(record.state).to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }
}

impl OutputFormatter for TableFormatter {
    fn format_items(&self, items: &[ItemView]) -> String {
        if items.is_empty() {
            return "No items found.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(vec!["ID", "Name", "Category", "Available", "Status"]);

        for item in items {
            builder.push_record(vec![
                item.id.to_string(),
                item.name.clone(),
                item.category.clone(),
                format!("{}/{}", item.available_quantity, item.total_quantity),
                status_label(item.status).to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn format_item(&self, item: &ItemView, active: &[BorrowRecord]) -> String {
        let mut output = String::new();

        output.push_str(&format!("ID:          {}\n", item.id));
        output.push_str(&format!("Name:        {}\n", item.name));
        output.push_str(&format!("Category:    {}\n", item.category));
        output.push_str(&format!(
            "Available:   {}/{}\n",
            item.available_quantity, item.total_quantity
        ));
        output.push_str(&format!(
            "Status:      {}\n",
            self.colored(status_label(item.status), Self::status_color(item.status))
        ));

        if !item.description.is_empty() {
            output.push_str(&format!("Description: {}\n", wrap_text(&item.description, 13)));
        }

        if !active.is_empty() {
            output.push_str("\nActive loans:\n");
            output.push_str(&Self::records_table(active));
            output.push('\n');
        }

        output
    }

    fn format_categories(&self, categories: &[String]) -> String {
        categories.join("\n")
    }

    fn format_confirmation(&self, confirmation: &Confirmation) -> String {
        let mut output = String::new();

        output.push_str(&self.colored("Borrow confirmed", Color::Green));
        output.push('\n');
        output.push_str(&format!("Record:      {}\n", confirmation.record_id));
        output.push_str(&format!(
            "Item:        {} ({})\n",
            confirmation.item_name, confirmation.item_id
        ));
        output.push_str(&format!(
            "Borrower:    {} ({})\n",
            confirmation.borrower_name, confirmation.borrower_id
        ));
        output.push_str(&format!("From:        {}\n", short_time(&confirmation.borrow_time)));
        output.push_str(&format!(
            "Until:       {}\n",
            short_time(&confirmation.expected_return_time)
        ));

        output
    }

    fn format_record(&self, record: &BorrowRecord) -> String {
        let mut output = String::new();

        output.push_str(&format!("Record:      {}\n", record.record_id));
        output.push_str(&format!("Item:        {}\n", record.item_id));
        output.push_str(&format!(
            "Borrower:    {} ({})\n",
            record.borrower_name, record.borrower_id
        ));
        output.push_str(&format!("Borrowed:    {}\n", short_time(&record.borrow_time)));
        output.push_str(&format!("Due:         {}\n", short_time(&record.expected_return_time)));
        if let Some(returned) = &record.actual_return_time {
            output.push_str(&format!("Returned:    {}\n", short_time(returned)));
        }
        if let Some(purpose) = &record.purpose {
            output.push_str(&format!("Purpose:     {}\n", wrap_text(purpose, 13)));
        }
        output.push_str(&format!("State:       {}\n", state_label(record.state)));

        output
    }

    fn format_records(&self, records: &[BorrowRecord]) -> String {
        if records.is_empty() {
            return "No records found.".to_string();
        }
        Self::records_table(records)
    }

    fn format_message(&self, message: &str) -> String {
        self.colored(message, Color::Green)
    }

    fn format_error(&self, error: &AppError) -> String {
        format!("{}{}", self.colored("Error: ", Color::Red), error.user_message())
    }
}

/// Plain text output formatter.
///
/// Formats data as simple plain text without colors or tables.
pub struct PlainFormatter;

impl PlainFormatter {
    fn record_line(record: &BorrowRecord) -> String {
        format!(
            "{} {} {} {} {} {}",
            record.record_id,
            record.item_id,
            record.borrower_id,
            record.borrow_time.to_rfc3339(),
            record.expected_return_time.to_rfc3339(),
            state_label(record.state)
        )
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_items(&self, items: &[ItemView]) -> String {
        if items.is_empty() {
            return "No items found.".to_string();
        }

        let mut output = String::new();
        for item in items {
            output.push_str(&format!(
                "{} {}/{} {} {}\n",
                item.id, item.available_quantity, item.total_quantity, item.status, item.name
            ));
        }
        output
    }

    fn format_item(&self, item: &ItemView, active: &[BorrowRecord]) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", item.id));
        output.push_str(&format!("{}\n", item.name));
        output.push_str(&format!("{}\n", item.category));
        output.push_str(&format!("{}/{}\n", item.available_quantity, item.total_quantity));
        output.push_str(&format!("{}\n", item.status));

        if !item.description.is_empty() {
            output.push_str(&format!("{}\n", item.description));
        }

        for record in active {
            output.push_str(&format!("{}\n", Self::record_line(record)));
        }

        output
    }

    fn format_categories(&self, categories: &[String]) -> String {
        categories.join("\n")
    }

    fn format_confirmation(&self, confirmation: &Confirmation) -> String {
        format!(
            "{} {} {} {} {}",
            confirmation.record_id,
            confirmation.item_id,
            confirmation.borrower_id,
            confirmation.borrow_time.to_rfc3339(),
            confirmation.expected_return_time.to_rfc3339()
        )
    }

    fn format_record(&self, record: &BorrowRecord) -> String {
        Self::record_line(record)
    }

    fn format_records(&self, records: &[BorrowRecord]) -> String {
        if records.is_empty() {
            return "No records found.".to_string();
        }

        let mut output = String::new();
        for record in records {
            output.push_str(&format!("{}\n", Self::record_line(record)));
        }
        output
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }

    fn format_error(&self, error: &AppError) -> String {
        format!("Error: {}", error.user_message())
    }
}

/// Factory function to create an appropriate formatter.
///
/// # Arguments
/// * `format` - The desired output format
/// * `use_color` - Whether to use colored output (ignored for JSON and plain)
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter::new(use_color)),
        OutputFormat::Plain => Box::new(PlainFormatter),
    }
}
