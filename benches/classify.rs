// benches/classify.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use ticket_watch::classify::classify;
use ticket_watch::core::page::PageSnapshot;
use ticket_watch::core::signals::SignalSet;

/// Synthetic event page: a deep client-rendered DOM with a pile of day
/// selectors, every one of them sold out.
fn sample_page(days: usize) -> String {
    let mut body = String::new();
    for i in 0..days {
        body.push_str(&format!(
            "<div class=\"event-day\"><div><div><div>\
             <button class=\"btn is-disabled\" aria-disabled=\"true\">\
             Torsdag uke {i}</button>\
             </div></div></div></div>"
        ));
    }
    format!(
        "<html><body><main class=\"listing\"><div class=\"day-picker\">{body}</div></main></body></html>"
    )
}

fn bench_classify(c: &mut Criterion) {
    let html = sample_page(64);
    let signals = SignalSet::builtin();

    c.bench_function("classify_all_disabled", |b| {
        b.iter(|| {
            let page = PageSnapshot::parse(black_box(&html));
            black_box(classify(&page, "torsdag", &signals))
        })
    });

    c.bench_function("classify_preparsed", |b| {
        let page = PageSnapshot::parse(&html);
        b.iter(|| black_box(classify(black_box(&page), "torsdag", &signals)))
    });
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
