use criterion::criterion_main;



criterion_main!(core::core_benches, async_ops::async_ops_benches, tower::tower_benches);
