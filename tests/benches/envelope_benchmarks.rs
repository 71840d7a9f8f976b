//! # Envelope Benchmarks
//!
//! Cost of the reply path through the protocol adapter:
//!
//! | Benchmark | Measures |
//! |-----------|----------|
//! | make_reply | Reply factory + annotator, per reply mode |
//! | local_bus | Full send through the in-memory bus, routed and unrouted |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use storage_api::{BucketId, DocumentId, PutCommand, StorageCommand};
use storage_mbusprot::{AdapterConfig, ReplyMode, StorageCommandEnvelope};
use storage_tests::integration::storage_node::StorageNode;

fn put_command(n: u64) -> Box<dyn StorageCommand> {
    Box::new(PutCommand::new(
        BucketId::new(n % 64 + 1),
        DocumentId::new(format!("id:bench:doc::{n}")),
        n,
    ))
}

fn config(mode: ReplyMode) -> AdapterConfig {
    AdapterConfig {
        reply_mode: mode,
        ..AdapterConfig::default()
    }
}

// ============================================================================
// Reply construction
// ============================================================================

fn bench_make_reply(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope-make-reply");

    for mode in [ReplyMode::Augment, ReplyMode::PassThrough] {
        let config = config(mode);
        group.bench_with_input(BenchmarkId::new("put", mode), &config, |b, config| {
            let mut envelope = StorageCommandEnvelope::from_config(put_command(1), config);
            b.iter(|| black_box(envelope.make_reply().is_ok()))
        });
    }

    group.bench_function("wrap_and_reply_once", |b| {
        let config = config(ReplyMode::Augment);
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            let mut envelope = StorageCommandEnvelope::from_config(put_command(n), &config);
            black_box(envelope.make_reply().is_ok())
        })
    });

    group.finish();
}

// ============================================================================
// Local bus round trips
// ============================================================================

fn bench_local_bus(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope-local-bus");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime");

    let bus = message_bus::LocalBus::<StorageCommandEnvelope>::new();
    runtime.block_on(bus.register("node", Arc::new(StorageNode::reporting_real_info())));

    for batch in [1u64, 16, 128] {
        group.throughput(Throughput::Elements(batch));
        group.bench_with_input(BenchmarkId::new("routed", batch), &batch, |b, &batch| {
            b.iter(|| {
                runtime.block_on(async {
                    for n in 0..batch {
                        let reply = bus
                            .send("node", StorageCommandEnvelope::new(put_command(n)))
                            .await;
                        black_box(reply.is_ok());
                    }
                })
            })
        });
    }

    group.bench_function("unrouted_synthesized", |b| {
        b.iter(|| {
            runtime.block_on(async {
                let reply = bus
                    .send("nowhere", StorageCommandEnvelope::new(put_command(7)))
                    .await;
                black_box(reply.is_ok())
            })
        })
    });

    group.finish();
}

criterion_group!(benches, bench_make_reply, bench_local_bus);
criterion_main!(benches);
