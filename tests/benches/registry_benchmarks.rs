//! # Identity Registry Benchmarks
//!
//! | Area | Operation | Expected cost |
//! |------|-----------|---------------|
//! | id-01 Key codec | encode / split | linear in key length |
//! | id-01 Index | prefix scan | proportional to matches |
//! | id-02 Registry | DID resolution | one index scan plus one read |
//! | id-02 Registry | participant creation | linear in stored certificates |

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use id_01_ledger_index::{create_composite_key, split_composite_key, LedgerStore};
use id_02_identity_registry::prelude::*;
use id_02_identity_registry::test_utils::RegistryHarness;
use id_02_identity_registry::IndexTag;
use std::time::Duration;

// ============================================================================
// ID-01: Composite Keys
// ============================================================================

fn bench_composite_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("id-01-composite-keys");
    let tag = IndexTag::ParticipantByDid.tag();
    let attributes = ["did:example:5f0c8e58", "5f0c8e58-1d2b-4c4a-9a57-3d1c1a4f2b10"];

    group.bench_function("encode", |b| {
        b.iter(|| black_box(create_composite_key(tag, &attributes).is_ok()))
    });

    let key = create_composite_key(tag, &attributes).unwrap_or_default();
    group.bench_function("split", |b| {
        b.iter(|| black_box(split_composite_key(&key).is_ok()))
    });

    group.finish();
}

// ============================================================================
// ID-01: Index Scans
// ============================================================================

fn bench_index_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("id-01-index-scan");
    group.measurement_time(Duration::from_secs(5));

    for size in [10usize, 100, 1_000] {
        let harness = RegistryHarness::new();
        harness.create_issuer("Root CA", true);
        for i in 0..size {
            harness.create_role(&format!("role {i}"), &["GetRole"]);
        }
        let prefix = create_composite_key::<&str>("did.role", &[]).unwrap_or_default();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("scan_roles", size), &prefix, |b, prefix| {
            b.iter(|| {
                let tx = harness.ledger.begin();
                black_box(tx.scan_prefix(prefix).map(|rows| rows.len()).unwrap_or(0))
            })
        });
    }

    group.finish();
}

// ============================================================================
// ID-02: Participants
// ============================================================================

fn bench_resolve_did(c: &mut Criterion) {
    let mut group = c.benchmark_group("id-02-participants");

    let harness = RegistryHarness::new();
    harness.create_issuer("Root CA", true);
    for i in 0..200 {
        harness.create_participant(&format!("did:bench:{i}"), &[]);
    }

    group.bench_function("resolve_did", |b| {
        b.iter(|| black_box(harness.run(|api| api.resolve_did("did:bench:117")).is_ok()))
    });

    group.bench_function("check_function_access_denied", |b| {
        let request = FunctionAccessRequest {
            did: "did:bench:42".to_string(),
            function: "DeleteRole".to_string(),
        };
        b.iter(|| black_box(harness.run(|api| api.check_function_access(request.clone())).is_err()))
    });

    group.finish();
}

fn bench_create_participant(c: &mut Criterion) {
    let mut group = c.benchmark_group("id-02-participants");
    group.sample_size(20);

    for existing in [0usize, 100] {
        group.bench_with_input(
            BenchmarkId::new("create_participant", existing),
            &existing,
            |b, &existing| {
                b.iter_batched(
                    || {
                        let harness = RegistryHarness::new();
                        harness.create_issuer("Root CA", true);
                        for i in 0..existing {
                            harness.create_participant(&format!("did:seed:{i}"), &[]);
                        }
                        let cert = harness.certificate("did:bench:new");
                        (harness, cert)
                    },
                    |(harness, cert)| {
                        black_box(
                            harness
                                .run(|api| {
                                    api.create_participant(ParticipantCreateRequest::new(
                                        "did:bench:new",
                                        cert,
                                    ))
                                })
                                .is_ok(),
                        )
                    },
                    BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_composite_keys,
    bench_index_scan,
    bench_resolve_did,
    bench_create_participant,
);

criterion_main!(benches);
