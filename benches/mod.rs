use criterion::{criterion_group, criterion_main};

mod cli;

criterion_group!(
    benches,
    cli::session::bench_process,
    cli::session::bench_dispatch_help,
    cli::session::bench_registry_find
);
criterion_main!(benches);
