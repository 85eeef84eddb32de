use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dexmirror::indexer::diff_verified;
use dexmirror::models::Token;

/// Generate a synthetic token set for benchmarking
fn generate_tokens(count: usize, verified: bool) -> Vec<Token> {
    (0..count)
        .map(|i| Token {
            chain_id: "dimension_37-1".to_string(),
            address: format!("xpla1token{i:058}"),
            protocol: "Dezswap".to_string(),
            symbol: format!("TKN{i}"),
            name: format!("Token {i}"),
            decimals: 6,
            icon: format!("https://assets.example/{i}.svg"),
            verified,
        })
        .collect()
}

/// Benchmark the verified-set diff at mirror sizes well past production
fn bench_diff_verified(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_verified");

    for size in [100, 1_000, 10_000] {
        let stored = generate_tokens(size, true);

        // Half the verified set matches storage, a quarter changed, a
        // quarter is new; the stored tail gets demoted.
        let mut verified = stored[..size / 2].to_vec();
        for token in &stored[size / 2..size * 3 / 4] {
            let mut changed = token.clone();
            changed.icon = format!("{}?v=2", changed.icon);
            verified.push(changed);
        }
        let mut fresh = generate_tokens(size / 4, true);
        for (i, token) in fresh.iter_mut().enumerate() {
            token.address = format!("xpla1new{i:060}");
        }
        verified.extend(fresh);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(diff_verified(&stored, &verified)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_diff_verified);
criterion_main!(benches);
