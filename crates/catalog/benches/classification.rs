use criterion::{black_box, criterion_group, criterion_main, Criterion};

use goodbank_catalog::{classify, BaseItem, BaseItemId};
use goodbank_core::AggregateId;

fn bench_classify(c: &mut Criterion) {
    let bases: Vec<BaseItem> = [
        ("Diapers - Childrens", "diapers"),
        ("Diapers - Cloth (Kids)", "cloth_diapers"),
        ("Incontinence Pads - Adult", "underpads"),
        ("Menstrual Supplies/Items", "tampons"),
        ("Wipes - Adults", "other"),
    ]
    .into_iter()
    .map(|(category, partner_key)| BaseItem {
        id: BaseItemId::new(AggregateId::new()),
        name: category.to_string(),
        category: category.to_string(),
        partner_key: partner_key.to_string(),
        size: "4".to_string(),
    })
    .collect();

    c.bench_function("classify_rule_table", |b| {
        b.iter(|| {
            for base in &bases {
                black_box(classify(black_box(base)));
            }
        })
    });
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
