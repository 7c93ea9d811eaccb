//! Performance benchmarks for the Cashflow Engine.
//!
//! Covers the pure calculation functions and the HTTP round trip:
//! - Due-date resolution against the bundled holiday calendar
//! - Net income estimation and the Universal Credit taper
//! - Reminder batches over 10, 100 and 1000 records
//! - A `/next-payment-date` request through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use cashflow_engine::api::{AppState, create_router};
use cashflow_engine::calculation::{
    DueDateResolver, UcPaymentInput, calculate_uc_payment, estimate_net_monthly,
};
use cashflow_engine::config::ConfigLoader;
use cashflow_engine::models::{
    AdjustmentDirection, Frequency, IncomeCategory, IncomeRecord, IncomeType, PaymentAnchor,
    RecordKind, RecurringRecord,
};
use cashflow_engine::reminders::{ReminderWindow, collect_upcoming, render_digest};

use axum::{body::Body, http::Request};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tower::ServiceExt;

/// Loads the bundled configuration.
fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/gb").expect("Failed to load config")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Creates `count` records spread over every frequency and due day.
fn create_records(count: usize) -> Vec<RecurringRecord> {
    (0..count)
        .map(|i| {
            let frequency = Frequency::ALL[i % Frequency::ALL.len()];
            let due_day = if frequency == Frequency::Weekly {
                (i % 7) as u32 + 1
            } else {
                (i % 31) as u32 + 1
            };
            RecurringRecord {
                id: format!("record_{:04}", i),
                name: format!("Record {}", i),
                kind: if i % 4 == 0 { RecordKind::Debt } else { RecordKind::Expense },
                amount: Decimal::new(2500 + i as i64, 2),
                frequency,
                due_day: Some(due_day),
                adjustment_direction: AdjustmentDirection::Forward,
                use_last_working_day_of_month: i % 10 == 0,
                paid_by_uc: i % 5 == 0,
                balance: (i % 4 == 0).then(|| Decimal::from(1000)),
            }
        })
        .collect()
}

/// Benchmark: Single due-date resolution across a holiday weekend.
fn bench_next_payment_date(c: &mut Criterion) {
    let config = load_config();
    let resolver = DueDateResolver::new(config.calendar());
    let anchor = PaymentAnchor {
        frequency: Frequency::Monthly,
        anchor_day: 25,
        reference_date: date(2025, 12, 1),
        adjustment_direction: AdjustmentDirection::Forward,
        use_last_working_day_of_month: false,
    };

    c.bench_function("next_payment_date", |b| {
        b.iter(|| black_box(resolver.next_payment_date(black_box(&anchor))))
    });
}

/// Benchmark: Net income estimate and taper for a typical claimant.
fn bench_income(c: &mut Criterion) {
    let config = load_config();
    let salary = IncomeRecord::new(IncomeType::YearlyGross, Decimal::from(24_000), IncomeCategory::Wage);
    let input = UcPaymentInput {
        incomes: vec![
            salary.clone(),
            IncomeRecord::new(IncomeType::Hourly, Decimal::new(1250, 2), IncomeCategory::SideGig)
                .with_hours(Decimal::from(8)),
            IncomeRecord::new(IncomeType::Uc, Decimal::new(40014, 2), IncomeCategory::Benefit),
        ],
        paid_by_uc_monthly: Decimal::from(450),
        ..Default::default()
    };

    let mut group = c.benchmark_group("income");
    group.bench_function("estimate_net_monthly", |b| {
        b.iter(|| black_box(estimate_net_monthly(black_box(&salary), config.tax_bands(), 1)))
    });
    group.bench_function("calculate_uc_payment", |b| {
        b.iter(|| {
            black_box(calculate_uc_payment(
                black_box(&input),
                config.benefit(),
                config.tax_bands(),
                1,
            ))
        })
    });
    group.finish();
}

/// Benchmark: Reminder batches of increasing size.
fn bench_reminder_batch(c: &mut Criterion) {
    let config = load_config();
    let resolver = DueDateResolver::new(config.calendar());
    let today = date(2025, 12, 22);

    let mut group = c.benchmark_group("reminder_batch");

    for record_count in [10usize, 100, 1000].iter() {
        let records = create_records(*record_count);

        group.throughput(Throughput::Elements(*record_count as u64));
        group.bench_with_input(
            BenchmarkId::new("records", record_count),
            &records,
            |b, records| {
                b.iter(|| {
                    let batch = collect_upcoming(records, today, &resolver, ReminderWindow::default());
                    black_box(render_digest(&batch))
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: `/next-payment-date` through the router.
fn bench_http_next_payment_date(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("Failed to build runtime");
    let router = create_router(AppState::new(load_config()));
    let body = serde_json::json!({
        "frequency": "monthly",
        "anchor_day": 15,
        "reference_date": "2025-03-10"
    })
    .to_string();

    c.bench_function("http_next_payment_date", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/next-payment-date")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .expect("valid request"),
                )
                .await
                .expect("router is infallible");
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_next_payment_date,
    bench_income,
    bench_reminder_batch,
    bench_http_next_payment_date,
);
criterion_main!(benches);
