use criterion::{Criterion, criterion_group, criterion_main};
use fenceguard_lib::{autofix, scan};
use std::hint::black_box;

/// Generate a long description mixing prose, labelled and unlabelled blocks
fn generate_body() -> String {
    let mut content = String::with_capacity(200_000);

    for i in 0..2_000 {
        content.push_str(&format!("Paragraph {i} explaining the change in some detail.\n\n"));

        if i % 3 == 0 {
            content.push_str(&format!("```\nlet value_{i} = compute({i});\n```\n\n"));
        } else if i % 5 == 0 {
            content.push_str(&format!("```rust\nfn step_{i}() {{}}\n```\n\n"));
        }
    }

    content
}

fn bench_scan(c: &mut Criterion) {
    let body = generate_body();

    c.bench_function("scan large body", |b| b.iter(|| scan(black_box(&body))));
    c.bench_function("autofix large body", |b| b.iter(|| autofix(black_box(&body))));
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
