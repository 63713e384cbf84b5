//! Bulk-operation plumbing.
//!
//! Batch jobs run records sequentially, keep going past per-record
//! failures, and honor an abort between records, never mid-record.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// cooperative abort signal checked between batch records
#[derive(Debug, Clone, Default)]
pub struct AbortFlag(Arc<AtomicBool>);

impl AbortFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// summary of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// records fully processed before the run ended
    pub completed: u32,
    /// records where every requested channel succeeded
    pub delivered: u32,
    /// records where only part of the fan-out succeeded
    pub partial_failures: u32,
    /// records where nothing was delivered
    pub failures: u32,
    /// records left untouched because the run was aborted
    pub remaining: u32,
    pub aborted: bool,
}
