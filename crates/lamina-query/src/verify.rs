//! Verification harness: cross-checks the four strategies.
//!
//! The four strategies must return identical counts for identical
//! bounds; this harness runs an ordered query battery through all of
//! them and flags every disagreement. It does not attempt to diagnose
//! which strategy is wrong — a disagreement is a correctness defect
//! wherever it lives.

use crate::session::QuerySession;
use lamina_common::Result;

/// The four per-strategy counts for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyCounts {
    /// Full scan (one row per I/O).
    pub scan: u64,
    /// Blocked scan.
    pub blocked: u64,
    /// Dense-index seek.
    pub dense: u64,
    /// Sparse-index seek.
    pub sparse: u64,
}

impl StrategyCounts {
    /// True if all four strategies agree.
    pub fn all_agree(&self) -> bool {
        self.scan == self.blocked && self.blocked == self.dense && self.dense == self.sparse
    }
}

/// One query the strategies disagreed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    /// Position of the query in the battery.
    pub query_index: usize,
    /// Inclusive lower bound.
    pub from: u64,
    /// Inclusive upper bound.
    pub to: u64,
    /// The diverging counts.
    pub counts: StrategyCounts,
}

/// Outcome of running a query battery through all four strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    /// Number of queries run.
    pub queries_run: usize,
    /// Every query the strategies disagreed on, in battery order.
    pub mismatches: Vec<Mismatch>,
}

impl VerificationReport {
    /// True if every query produced four identical counts.
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Runs each `(from, to)` query through all four strategies and reports
/// every disagreement.
///
/// Disagreement is report data, not an error; only I/O failures
/// propagate as errors.
pub fn verify_range_queries(
    session: &QuerySession,
    queries: &[(u64, u64)],
) -> Result<VerificationReport> {
    let mut mismatches = Vec::new();

    for (query_index, &(from, to)) in queries.iter().enumerate() {
        let counts = StrategyCounts {
            scan: session.count_range_scan(from, to)?,
            blocked: session.count_range_blocked(from, to)?,
            dense: session.count_range_dense(from, to)?,
            sparse: session.count_range_sparse(from, to)?,
        };

        if !counts.all_agree() {
            log::warn!(
                "strategies disagree on query {} [{}, {}]: {:?}",
                query_index,
                from,
                to,
                counts
            );
            mismatches.push(Mismatch {
                query_index,
                from,
                to,
                counts,
            });
        }
    }

    Ok(VerificationReport {
        queries_run: queries.len(),
        mismatches,
    })
}
