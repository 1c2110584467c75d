use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{Duration, Utc};
use siteerp_core::{ProjectId, Quantity};
use siteerp_inventory::{AddProduct, HistoryWindow, MovementAction, ProductFilter, RecordMovement, StockLedger};

fn seeded_ledger(products: usize) -> StockLedger {
    let mut ledger = StockLedger::new();
    for i in 0..products {
        ledger
            .add_product(AddProduct {
                name: format!("Product {i}"),
                sku: format!("SKU-{i:05}"),
                quantity: Quantity::new(100),
                min_stock: Quantity::new(50),
                location: "Zone A1".to_string(),
                project_id: Some(ProjectId::sequential(i % 4 + 1)),
            })
            .unwrap();
    }
    ledger
}

fn scan(sku: String, action: MovementAction) -> RecordMovement {
    RecordMovement {
        sku,
        action,
        quantity: Quantity::new(3),
        occurred_at: None,
        evidence: None,
    }
}

fn bench_apply_movement(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_movement");

    for size in [10usize, 100, 1_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("delivery_then_return", size), &size, |b, &size| {
            let mut ledger = seeded_ledger(size);
            let sku = format!("SKU-{:05}", size - 1);
            b.iter(|| {
                ledger.apply_movement(scan(sku.clone(), MovementAction::Delivery)).unwrap();
                ledger.apply_movement(scan(sku.clone(), MovementAction::Return)).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_filter_products(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_products");

    for size in [100usize, 1_000, 10_000] {
        let ledger = seeded_ledger(size);
        let filter = ProductFilter::parse("product 9", "in-stock", "PRJ-002").unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ledger, |b, ledger| {
            b.iter(|| black_box(ledger.filter(&filter)).len());
        });
    }

    group.finish();
}

fn bench_query_history(c: &mut Criterion) {
    let mut ledger = seeded_ledger(10);
    let now = Utc::now();
    for h in 0..5_000i64 {
        let mut cmd = scan(format!("SKU-{:05}", h % 10), MovementAction::Delivery);
        cmd.occurred_at = Some(now - Duration::hours(h % (24 * 60)));
        ledger.apply_movement(cmd).unwrap();
    }

    c.bench_function("query_history_week_5000_movements", |b| {
        b.iter(|| black_box(ledger.query_history("SKU-00003", HistoryWindow::Week, now)).len());
    });
}

criterion_group!(benches, bench_apply_movement, bench_filter_products, bench_query_history);
criterion_main!(benches);
