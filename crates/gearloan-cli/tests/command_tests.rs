// Rust guideline compliant 2026-10-19

//! Tests for command dispatch against an in-memory service.

use chrono::{TimeZone, Utc};
use gearloan_app::{ErrorCode, InventoryService};
use gearloan_cli::commands::Toggle;
use gearloan_cli::{create_formatter, run, Command};
use gearloan_core::{EquipmentItem, ItemId, ItemStore, OutputFormat};

fn service() -> InventoryService {
    let store = ItemStore::new(vec![
        EquipmentItem::new("EQ001", "單眼相機 Canon EOS 80D", "Camera", 5)
            .with_description("Digital SLR camera"),
        EquipmentItem::new("EQ005", "iPad Pro 12.9吋", "Tablet", 8),
    ])
    .expect("Failed to build store");
    InventoryService::new(store)
}

fn borrow(item: &str, borrower: &str) -> Command {
    Command::Borrow {
        item_id: item.to_string(),
        borrower_id: borrower.to_string(),
        name: "Wu".to_string(),
        from: Utc.with_ymd_and_hms(2024, 11, 20, 14, 3, 0).unwrap(),
        until: Utc.with_ymd_and_hms(2024, 11, 20, 16, 10, 0).unwrap(),
        purpose: None,
    }
}

#[test]
fn test_catalog_command_filters_by_category() {
    let service = service();
    let formatter = create_formatter(OutputFormat::Plain, false);
    let output = run(
        &service,
        Command::Catalog {
            search: None,
            category: "Tablet".to_string(),
        },
        formatter.as_ref(),
    )
    .expect("Catalog failed");

    assert!(output.contains("EQ005"));
    assert!(!output.contains("EQ001"));
}

#[test]
fn test_borrow_history_and_return_commands() {
    let service = service();
    let formatter = create_formatter(OutputFormat::Json, false);

    let output = run(&service, borrow("EQ001", "984106503"), formatter.as_ref())
        .expect("Borrow failed");
    let confirmation: serde_json::Value = serde_json::from_str(&output).unwrap();
    let record_id = confirmation["recordId"].as_str().unwrap().to_string();

    let output = run(
        &service,
        Command::History {
            borrower_id: "984106503".to_string(),
        },
        formatter.as_ref(),
    )
    .expect("History failed");
    let history: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(history["total"], 1);
    assert_eq!(history["records"][0]["state"], "active");

    run(
        &service,
        Command::Return {
            record_id: record_id[3..].to_string(),
        },
        formatter.as_ref(),
    )
    .expect("Return failed");
    assert_eq!(
        service.item(&ItemId::from("EQ001")).unwrap().available_quantity,
        5
    );
}

#[test]
fn test_maintenance_blocks_borrowing() {
    let service = service();
    let formatter = create_formatter(OutputFormat::Plain, false);

    run(
        &service,
        Command::Maintenance {
            item_id: "EQ005".to_string(),
            mode: Toggle::On,
        },
        formatter.as_ref(),
    )
    .expect("Maintenance failed");

    let err = run(&service, borrow("EQ005", "984106503"), formatter.as_ref()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ItemUnavailable);
}

#[test]
fn test_retire_hides_item() {
    let service = service();
    let formatter = create_formatter(OutputFormat::Plain, false);

    run(
        &service,
        Command::Retire {
            item_id: "EQ001".to_string(),
        },
        formatter.as_ref(),
    )
    .expect("Retire failed");

    let categories = run(&service, Command::Categories, formatter.as_ref()).unwrap();
    assert_eq!(categories, "All\nTablet");
}

#[test]
fn test_history_blank_borrower_rejected() {
    let service = service();
    let formatter = create_formatter(OutputFormat::Plain, false);
    let err = run(
        &service,
        Command::History {
            borrower_id: " ".to_string(),
        },
        formatter.as_ref(),
    )
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[test]
fn test_check_and_nested_session() {
    let service = service();
    let formatter = create_formatter(OutputFormat::Plain, false);
    assert_eq!(
        run(&service, Command::Check, formatter.as_ref()).unwrap(),
        "Inventory is consistent"
    );
    assert!(run(&service, Command::Session, formatter.as_ref()).is_err());
}
