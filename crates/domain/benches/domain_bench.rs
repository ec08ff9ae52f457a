use std::hint::black_box;

use common::{CustomerId, OfferId, UserId};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use domain::{
    Customer, Money, Offer, OfferKind, Order, OrderItem, OrderRecord, Role, User, Validate,
};

fn customer() -> Customer {
    Customer::new("Bench Customer", "bench@example.com", None, None)
        .unwrap()
        .with_id(CustomerId::new())
}

fn user() -> User {
    User::new("bench", "bench-staff@example.com", Role::Staff)
        .unwrap()
        .with_id(UserId::new())
}

fn offer(price_cents: i64) -> Offer {
    Offer::new(
        "Benchmark Widget",
        None,
        Money::from_minor(price_cents, 2),
        OfferKind::Product,
    )
    .unwrap()
    .with_id(OfferId::new())
}

fn order_with_items(count: usize) -> Order {
    let offer = offer(1000);
    let items = (0..count)
        .map(|_| OrderItem::create_new(&offer, 2).unwrap())
        .collect();
    Order::create_new(customer(), user(), items).unwrap()
}

fn bench_create_order(c: &mut Criterion) {
    let offer = offer(1000);
    let customer = customer();
    let user = user();

    c.bench_function("domain/create_order", |b| {
        b.iter(|| {
            let item = OrderItem::create_new(&offer, 1).unwrap();
            Order::create_new(customer.clone(), user.clone(), vec![item]).unwrap()
        });
    });
}

fn bench_add_item(c: &mut Criterion) {
    let offer = offer(250);

    c.bench_function("domain/add_order_item", |b| {
        b.iter_batched(
            || order_with_items(10),
            |mut order| {
                order.add_order_item(&offer, 3).unwrap();
                order
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_total_and_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("domain/order_size");

    for count in [1, 10, 100] {
        let order = order_with_items(count);

        group.bench_with_input(BenchmarkId::new("total_price", count), &order, |b, order| {
            b.iter(|| black_box(order.total_price()));
        });

        group.bench_with_input(BenchmarkId::new("validate", count), &order, |b, order| {
            b.iter(|| black_box(order.validate().is_ok()));
        });

        group.bench_with_input(BenchmarkId::new("to_record", count), &order, |b, order| {
            b.iter(|| OrderRecord::from_order(order).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_create_order,
    bench_add_item,
    bench_total_and_validate
);
criterion_main!(benches);
