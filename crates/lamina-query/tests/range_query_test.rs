//! End-to-end range-count validation.
//!
//! Integration tests covering the full pipeline:
//! - Descriptor -> spec -> build -> session -> query flow
//! - Four-way strategy equivalence over generated tables, including
//!   duplicate-heavy keys and row counts not divisible by the block size
//! - Blocks larger than the whole table
//! - Verification harness behavior on a healthy and a corrupted index

use rand::Rng;
use std::path::Path;

use lamina_common::{BuildConfig, QueryConfig, TableSpec};
use lamina_index::{IndexBuilder, IndexEntry};
use lamina_query::{verify_range_queries, QuerySession};

/// Writes a 3-column table with the given sorted keys (columns 1 and 2
/// are arbitrary payload) and returns its spec.
fn write_table(dir: &Path, keys: &[u64]) -> TableSpec {
    let spec = TableSpec::new(dir.join("table"), keys.len() as u64, 3).unwrap();

    let mut raw = Vec::with_capacity(keys.len() * 24);
    for (ordinal, &key) in keys.iter().enumerate() {
        raw.extend_from_slice(&key.to_le_bytes());
        raw.extend_from_slice(&(ordinal as u64).to_le_bytes());
        raw.extend_from_slice(&(key ^ 0xABCD).to_le_bytes());
    }
    std::fs::write(spec.data_path(), raw).unwrap();
    spec
}

fn build_and_open(spec: &TableSpec, rows_per_block: usize, sparse_stride: u64) -> QuerySession {
    let build = BuildConfig {
        rows_per_block,
        sparse_stride,
        fsync_enabled: false,
    };
    IndexBuilder::new(spec.clone(), build)
        .unwrap()
        .build_all()
        .unwrap();

    let query = QueryConfig {
        rows_per_block,
        sparse_stride,
    };
    QuerySession::open(spec.clone(), query).unwrap()
}

/// Sorted keys with duplicate runs: increments drawn from 0..=3.
fn generated_keys(count: usize) -> Vec<u64> {
    let mut rng = rand::thread_rng();
    let mut keys = Vec::with_capacity(count);
    let mut key = rng.gen_range(0..10u64);
    for _ in 0..count {
        keys.push(key);
        key += rng.gen_range(0..=3u64);
    }
    keys
}

fn assert_all_agree(session: &QuerySession, from: u64, to: u64) -> u64 {
    let scan = session.count_range_scan(from, to).unwrap();
    let blocked = session.count_range_blocked(from, to).unwrap();
    let dense = session.count_range_dense(from, to).unwrap();
    let sparse = session.count_range_sparse(from, to).unwrap();

    assert_eq!(scan, blocked, "blocked scan diverges on [{from}, {to}]");
    assert_eq!(scan, dense, "dense seek diverges on [{from}, {to}]");
    assert_eq!(scan, sparse, "sparse seek diverges on [{from}, {to}]");
    scan
}

/// Reference count straight off the key array.
fn expected_count(keys: &[u64], from: u64, to: u64) -> u64 {
    keys.iter().filter(|&&k| k >= from && k <= to).count() as u64
}

#[test]
fn test_descriptor_to_query_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let keys: Vec<u64> = (0..100).map(|i| i * 5).collect();
    let spec = write_table(dir.path(), &keys);

    // Round-trip the spec through a descriptor file, as the CLI layer
    // would hand it to us.
    let descriptor = dir.path().join("table.desc");
    std::fs::write(
        &descriptor,
        format!("{}\n{}\n{}\n", spec.base.display(), spec.row_count, spec.col_count),
    )
    .unwrap();
    let parsed = TableSpec::from_descriptor(&descriptor).unwrap();
    assert_eq!(parsed, spec);

    let session = build_and_open(&parsed, 16, 10);
    assert_eq!(assert_all_agree(&session, 100, 200), 21);
    assert_eq!(assert_all_agree(&session, 0, 495), 100);
}

#[test]
fn test_equivalence_sweep_generated_table() {
    let dir = tempfile::tempdir().unwrap();
    // 503 rows: not a multiple of the 16-row block, so the final block
    // is partial.
    let keys = generated_keys(503);
    let spec = write_table(dir.path(), &keys);
    let session = build_and_open(&spec, 16, 10);

    let max_key = *keys.last().unwrap();
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let a = rng.gen_range(0..=max_key + 10);
        let b = rng.gen_range(0..=max_key + 10);
        let (from, to) = (a.min(b), a.max(b));
        let count = assert_all_agree(&session, from, to);
        assert_eq!(count, expected_count(&keys, from, to));
    }
}

#[test]
fn test_equivalence_at_boundaries() {
    let dir = tempfile::tempdir().unwrap();
    let keys = generated_keys(240);
    let spec = write_table(dir.path(), &keys);
    let session = build_and_open(&spec, 16, 10);

    let min_key = keys[0];
    let max_key = *keys.last().unwrap();

    let queries = [
        (min_key, min_key),
        (max_key, max_key),
        (min_key, max_key),
        (0, min_key),
        (max_key, max_key + 1000),
        (max_key + 1, max_key + 2),
    ];
    for (from, to) in queries {
        let count = assert_all_agree(&session, from, to);
        assert_eq!(count, expected_count(&keys, from, to));
    }
}

#[test]
fn test_block_larger_than_table() {
    let dir = tempfile::tempdir().unwrap();
    let keys: Vec<u64> = (0..10).map(|i| i * 10).collect();
    let spec = write_table(dir.path(), &keys);
    // Default-sized 400-row blocks over a 10-row table.
    let session = build_and_open(&spec, 400, 10);

    assert_eq!(assert_all_agree(&session, 15, 45), 3);
    assert_eq!(assert_all_agree(&session, 0, 90), 10);
    assert_eq!(assert_all_agree(&session, 95, 1000), 0);
}

#[test]
fn test_all_keys_identical() {
    let dir = tempfile::tempdir().unwrap();
    let keys = vec![77u64; 50];
    let spec = write_table(dir.path(), &keys);
    let session = build_and_open(&spec, 8, 10);

    assert_eq!(assert_all_agree(&session, 77, 77), 50);
    assert_eq!(assert_all_agree(&session, 0, 76), 0);
    assert_eq!(assert_all_agree(&session, 78, 100), 0);
}

#[test]
fn test_harness_passes_on_healthy_table() {
    let dir = tempfile::tempdir().unwrap();
    let keys = generated_keys(120);
    let spec = write_table(dir.path(), &keys);
    let session = build_and_open(&spec, 16, 10);

    let max_key = *keys.last().unwrap();
    let queries = [
        (0, max_key),
        (keys[0], keys[0]),
        (max_key / 3, max_key / 2),
        (max_key + 1, max_key + 100),
        (keys[40], keys[90]),
    ];
    let report = verify_range_queries(&session, &queries).unwrap();

    assert_eq!(report.queries_run, queries.len());
    assert!(report.is_consistent(), "unexpected mismatches: {:?}", report.mismatches);
}

#[test]
fn test_harness_flags_corrupted_dense_index() {
    let dir = tempfile::tempdir().unwrap();
    let keys: Vec<u64> = (0..20).map(|i| i * 2).collect();
    let spec = write_table(dir.path(), &keys);
    build_and_open(&spec, 4, 10);

    // Zero out every dense locator: seeks collapse onto block 0 and
    // undercount ranges that live in later blocks.
    let corrupted: Vec<u8> = keys
        .iter()
        .flat_map(|&key| {
            let mut raw = [0u8; IndexEntry::SIZE];
            raw[..8].copy_from_slice(&key.to_le_bytes());
            raw
        })
        .collect();
    std::fs::write(spec.dense_index_path(), corrupted).unwrap();

    let query = QueryConfig {
        rows_per_block: 4,
        sparse_stride: 10,
    };
    let session = QuerySession::open(spec, query).unwrap();

    let report = verify_range_queries(&session, &[(0, 6), (20, 30)]).unwrap();
    assert_eq!(report.queries_run, 2);
    assert!(!report.is_consistent());

    // The corruption only harms queries past block 0.
    let mismatch = &report.mismatches[0];
    assert_eq!(mismatch.query_index, 1);
    assert_eq!(mismatch.counts.scan, 6);
    assert_ne!(mismatch.counts.dense, mismatch.counts.scan);
}
