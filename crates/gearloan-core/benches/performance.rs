// Rust guideline compliant 2026-10-19

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use gearloan_core::{
    BorrowRequest, CatalogFilter, CatalogIndex, EquipmentItem, ItemId, ItemStore, LendingLedger,
    Seed,
};
use std::sync::Arc;
use tempfile::TempDir;

const CATEGORIES: [&str; 5] = ["Camera", "Tablet", "Laptop", "Audio", "Lighting"];

fn build_items(count: usize) -> Vec<EquipmentItem> {
    (0..count)
        .map(|i| {
            EquipmentItem::new(
                format!("EQ{:05}", i),
                format!("Item {} model {}", i, i % 97),
                CATEGORIES[i % CATEGORIES.len()],
                (i % 10 + 1) as u32,
            )
            .with_description(if i % 7 == 0 { "camera body" } else { "accessory" })
        })
        .collect()
}

fn store(count: usize) -> Arc<ItemStore> {
    Arc::new(ItemStore::new(build_items(count)).expect("Failed to build store"))
}

fn request(n: i64) -> BorrowRequest {
    let borrow_time = Utc.with_ymd_and_hms(2024, 11, 20, 9, 0, 0).unwrap() + Duration::seconds(n);
    BorrowRequest {
        borrower_id: format!("{:09}", n),
        borrower_name: "Bench".to_string(),
        borrow_time,
        expected_return_time: borrow_time + Duration::hours(4),
        purpose: None,
    }
}

fn bench_catalog_search(c: &mut Criterion) {
    let catalog = CatalogIndex::new(store(1000));
    let filter = CatalogFilter::new().search("CAMERA").category("Camera");
    c.bench_function("catalog_search_1000", |b| {
        b.iter(|| black_box(catalog.list(&filter).count()))
    });
}

fn bench_borrow_return(c: &mut Criterion) {
    let ledger = LendingLedger::new(store(100));
    let item_id = ItemId::from("EQ00042");
    let mut n = 0i64;
    c.bench_function("borrow_then_return", |b| {
        b.iter(|| {
            n += 1;
            let record = ledger
                .borrow(&item_id, &request(n))
                .expect("Failed to borrow");
            let returned_at = record.expected_return_time;
            black_box(ledger.return_item(&record.record_id, returned_at))
        })
    });
}

fn bench_check_invariants(c: &mut Criterion) {
    let ledger = LendingLedger::new(store(5000));
    c.bench_function("check_invariants_5000", |b| {
        b.iter(|| black_box(ledger.check_invariants()))
    });
}

fn bench_seed_load(c: &mut Criterion) {
    c.bench_function("seed_load_1000", |b| {
        b.iter_batched(
            || {
                let temp_dir = TempDir::new().expect("Failed to create temp dir");
                let path = temp_dir.path().join("catalog.json");
                let seed = serde_json::json!({ "items": build_items(1000) });
                std::fs::write(&path, seed.to_string()).expect("Failed to write seed");
                (temp_dir, path)
            },
            |(_temp_dir, path)| {
                let seed = Seed::load(&path).expect("Failed to load seed");
                black_box(seed.into_store())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_catalog_search,
    bench_borrow_return,
    bench_check_invariants,
    bench_seed_load
);
criterion_main!(benches);
