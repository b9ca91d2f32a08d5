// Rust guideline compliant 2026-10-19

//! Property-based and concurrency tests for the inventory service.

use chrono::{DateTime, Duration, TimeZone, Utc};
use gearloan_app::{ErrorCode, FixedClock, InventoryService};
use gearloan_core::{BorrowRequest, EquipmentItem, ItemId, ItemStore, RecordId};
use proptest::prelude::*;
use std::sync::{Arc, Barrier};
use std::thread;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 18, 8, 0, 0).unwrap()
}

fn service(totals: &[u32]) -> InventoryService {
    let items = totals
        .iter()
        .enumerate()
        .map(|(i, total)| EquipmentItem::new(format!("EQ{:03}", i + 1), "Gear", "Misc", *total))
        .collect();
    InventoryService::new(ItemStore::new(items).expect("Failed to build store"))
        .with_clock(Arc::new(FixedClock::new(start() + Duration::days(1))))
}

fn request(borrower: u32, hours: i64) -> BorrowRequest {
    BorrowRequest {
        borrower_id: format!("4115964{:02}", borrower),
        borrower_name: "Prop".to_string(),
        borrow_time: start(),
        expected_return_time: start() + Duration::hours(hours),
        purpose: None,
    }
}

#[derive(Debug, Clone)]
enum Action {
    Borrow { item: usize, borrower: u32, hours: i64 },
    Return { pick: usize },
}

fn arb_action(items: usize) -> impl Strategy<Value = Action> {
    prop_oneof![
        (0..items, 0u32..5, -2i64..48)
            .prop_map(|(item, borrower, hours)| Action::Borrow { item, borrower, hours }),
        any::<usize>().prop_map(|pick| Action::Return { pick }),
    ]
}

proptest! {
    /// Each item's availability tracks its active records, and rejected
    /// requests change nothing.
    #[test]
    fn prop_service_keeps_quantities_consistent(
        totals in prop::collection::vec(1u32..4, 1..4),
        actions in prop::collection::vec(arb_action(3), 1..40),
    ) {
        let service = service(&totals);
        let mut issued: Vec<RecordId> = Vec::new();

        for action in actions {
            match action {
                Action::Borrow { item, borrower, hours } => {
                    let item_id = ItemId::new(format!("EQ{:03}", item + 1));
                    let before = service.item(&item_id).ok().map(|v| v.available_quantity);
                    match service.submit_borrow(&item_id, &request(borrower, hours)) {
                        Ok(confirmation) => issued.push(confirmation.record_id),
                        Err(e) => {
                            prop_assert!(matches!(
                                e.code(),
                                ErrorCode::InvalidRequest | ErrorCode::NotFound | ErrorCode::ItemUnavailable
                            ));
                            if hours <= 0 {
                                prop_assert_eq!(e.code(), ErrorCode::InvalidRequest);
                            }
                            let after = service.item(&item_id).ok().map(|v| v.available_quantity);
                            prop_assert_eq!(before, after);
                        }
                    }
                }
                Action::Return { pick } => {
                    if let Some(record_id) = issued.get(pick % issued.len().max(1)) {
                        let result = service.return_item(record_id);
                        if let Err(e) = result {
                            prop_assert_eq!(e.code(), ErrorCode::AlreadyReturned);
                        }
                    }
                }
            }
            prop_assert!(service.check_invariants().is_ok());
        }
    }
}

#[test]
fn test_shared_service_last_unit_race() {
    for _ in 0..25 {
        let service = Arc::new(service(&[1]));
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = (0..2u32)
            .map(|n| {
                let service = Arc::clone(&service);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    service.submit_borrow(&ItemId::from("EQ001"), &request(n, 4))
                })
            })
            .collect();

        let codes: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("Borrow thread panicked"))
            .map(|r| r.err().map(|e| e.code()))
            .collect();

        assert_eq!(codes.iter().filter(|c| c.is_none()).count(), 1);
        assert!(codes.contains(&Some(ErrorCode::ItemUnavailable)));
        assert_eq!(
            service.item(&ItemId::from("EQ001")).unwrap().available_quantity,
            0
        );
    }
}
