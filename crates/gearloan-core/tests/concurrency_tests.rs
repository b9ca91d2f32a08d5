// Rust guideline compliant 2026-10-19

//! Concurrency tests for the lending ledger.
//!
//! Borrow and return take the item's write guard for the whole check and
//! mutation, so racing callers can never over-borrow or double-return.

use chrono::{DateTime, Duration, TimeZone, Utc};
use gearloan_core::{BorrowRequest, EquipmentItem, Error, ItemId, ItemStore, LendingLedger};
use std::sync::{Arc, Barrier};
use std::thread;

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 20, hour, 0, 0).unwrap()
}

fn request(borrower: usize) -> BorrowRequest {
    BorrowRequest {
        borrower_id: format!("98410{:04}", borrower),
        borrower_name: format!("Borrower {}", borrower),
        borrow_time: at(9),
        expected_return_time: at(17),
        purpose: None,
    }
}

fn ledger(items: Vec<EquipmentItem>) -> Arc<LendingLedger> {
    let store = ItemStore::new(items).expect("Failed to build store");
    Arc::new(LendingLedger::new(Arc::new(store)))
}

#[test]
fn test_last_unit_race_has_one_winner() {
    for _ in 0..50 {
        let ledger = ledger(vec![EquipmentItem::new("EQ004", "Sony A7III 相機", "Camera", 1)]);
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = (0..2)
            .map(|n| {
                let ledger = Arc::clone(&ledger);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    ledger.borrow(&ItemId::from("EQ004"), &request(n))
                })
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("Borrow thread panicked"))
            .collect();

        let wins = results.iter().filter(|r| r.is_ok()).count();
        let unavailable = results
            .iter()
            .filter(|r| matches!(r, Err(Error::ItemUnavailable(_))))
            .count();
        assert_eq!(wins, 1, "Exactly one borrower should get the last unit");
        assert_eq!(unavailable, 1);
        assert_eq!(ledger.active_for(&ItemId::from("EQ004")).unwrap().len(), 1);
        ledger.check_invariants().expect("Invariant broken after race");
    }
}

#[test]
fn test_many_borrowers_never_over_borrow() {
    let ledger = ledger(vec![
        EquipmentItem::new("EQ001", "單眼相機 Canon EOS 80D", "Camera", 5),
        EquipmentItem::new("EQ002", "繪圖板 Wacom Intuos Pro", "Tablet", 10),
    ]);
    let threads = 32;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|n| {
            let ledger = Arc::clone(&ledger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let item = if n % 2 == 0 { "EQ001" } else { "EQ002" };
                barrier.wait();
                ledger.borrow(&ItemId::from(item), &request(n)).is_ok()
            })
        })
        .collect();

    let wins = handles
        .into_iter()
        .map(|h| h.join().expect("Borrow thread panicked"))
        .filter(|ok| *ok)
        .count();

    // 16 threads compete for 5 cameras and 16 for 10 tablets.
    assert_eq!(wins, 15);
    assert_eq!(ledger.active_for(&ItemId::from("EQ001")).unwrap().len(), 5);
    assert_eq!(ledger.active_for(&ItemId::from("EQ002")).unwrap().len(), 10);
    ledger.check_invariants().expect("Invariant broken");
}

#[test]
fn test_concurrent_double_return_has_one_winner() {
    let ledger = ledger(vec![EquipmentItem::new("EQ005", "iPad Pro 12.9", "Tablet", 8)]);
    let record = ledger
        .borrow(&ItemId::from("EQ005"), &request(1))
        .expect("Failed to borrow");
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ledger = Arc::clone(&ledger);
            let barrier = Arc::clone(&barrier);
            let record_id = record.record_id.clone();
            thread::spawn(move || {
                barrier.wait();
                ledger.return_item(&record_id, at(12) + Duration::minutes(5))
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("Return thread panicked"))
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        results
            .iter()
            .filter(|r| matches!(r, Err(Error::AlreadyReturned(_))))
            .count(),
        3
    );
    ledger.check_invariants().expect("Invariant broken");
}

#[test]
fn test_readers_see_consistent_snapshots_during_writes() {
    let ledger = ledger(vec![EquipmentItem::new("EQ002", "繪圖板 Wacom Intuos Pro", "Tablet", 10)]);

    let writer = {
        let ledger = Arc::clone(&ledger);
        thread::spawn(move || {
            for n in 0..200 {
                let record = ledger
                    .borrow(&ItemId::from("EQ002"), &request(n))
                    .expect("Failed to borrow");
                ledger
                    .return_item(&record.record_id, at(10))
                    .expect("Failed to return");
            }
        })
    };

    for _ in 0..200 {
        ledger.check_invariants().expect("Reader saw a half-applied change");
    }
    writer.join().expect("Writer panicked");
}
