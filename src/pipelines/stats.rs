use std::time::{Duration, Instant};

/// Timing for a batch run.
#[derive(Debug, Clone)]
pub struct BatchStats {
    /// Total execution time.
    pub total_time: Duration,
    /// Number of comments processed.
    pub items_processed: usize,
}

impl BatchStats {
    /// Create a new stats tracker (call at start of operation).
    pub(crate) fn start() -> BatchStatsBuilder {
        BatchStatsBuilder {
            start_time: Instant::now(),
        }
    }

    /// Average time per comment, zero for an empty batch.
    pub fn time_per_item(&self) -> Duration {
        match u32::try_from(self.items_processed) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(n) => self.total_time / n,
        }
    }
}

/// Tracks timing from creation to finish.
pub(crate) struct BatchStatsBuilder {
    start_time: Instant,
}

impl BatchStatsBuilder {
    /// Finalize stats with the number of items processed.
    pub fn finish(self, items_processed: usize) -> BatchStats {
        BatchStats {
            total_time: self.start_time.elapsed(),
            items_processed,
        }
    }
}
