//! Per-operation wall-clock timing, used to project remaining batch time.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Context captured alongside the slowest sample of an operation, kept for
/// diagnosing outliers.
#[derive(Debug, Clone, Default)]
pub struct OpContext {
    pub path: Option<PathBuf>,
    pub bytes: u64,
}

/// Timing record for one named operation.
#[derive(Debug, Clone, Default)]
pub struct SpeedRecord {
    count: u64,
    total: Duration,
    min: Duration,
    max: Duration,
    max_context: OpContext,
}

impl SpeedRecord {
    fn record(&mut self, elapsed: Duration, context: OpContext) {
        self.count += 1;
        self.total += elapsed;
        if elapsed > self.max {
            self.max = elapsed;
            self.max_context = context;
        }
        if self.min.is_zero() || elapsed < self.min {
            self.min = elapsed;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn max_context(&self) -> &OpContext {
        &self.max_context
    }

    /// Average duration per sample; zero when nothing has been recorded.
    pub fn average(&self) -> Duration {
        if self.count == 0 {
            return Duration::ZERO;
        }
        self.total / self.count as u32
    }

    /// Projects the time to process `remaining` more units at the average
    /// speed observed so far.
    pub fn estimate_remaining(&self, remaining: u64) -> Duration {
        self.average() * remaining as u32
    }
}

/// Tracks [`SpeedRecord`]s keyed by operation name. Single-writer in the
/// sequential pipeline; wrap in a lock before sharing across threads.
#[derive(Debug, Default)]
pub struct SpeedTracker {
    records: HashMap<String, SpeedRecord>,
}

impl SpeedTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the time elapsed since `started` under the named operation.
    pub fn record(&mut self, operation: &str, started: Instant, context: OpContext) {
        self.record_duration(operation, started.elapsed(), context);
    }

    /// Records an already-measured duration under the named operation.
    pub fn record_duration(&mut self, operation: &str, elapsed: Duration, context: OpContext) {
        self.records
            .entry(operation.to_string())
            .or_default()
            .record(elapsed, context);
    }

    pub fn get(&self, operation: &str) -> Option<&SpeedRecord> {
        self.records.get(operation)
    }

    /// Remaining-time projection for an operation; zero when the operation
    /// has no samples yet.
    pub fn estimate_remaining(&self, operation: &str, remaining: u64) -> Duration {
        self.records
            .get(operation)
            .map_or(Duration::ZERO, |r| r.estimate_remaining(remaining))
    }
}
