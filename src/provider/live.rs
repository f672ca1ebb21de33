//! Live data provider backed by the data directory and a system sampler.

use tracing::{debug, warn};

use crate::collector::traits::{FileSystem, SystemSampler};
use crate::collector::UsageCollector;
use crate::model::{SystemSnapshot, UsageReading};

use super::{ProviderError, SnapshotSource};

/// Provider for real-time readings.
///
/// Holds no snapshot state of its own; each call reads its source afresh.
pub struct LiveSource<F: FileSystem> {
    usage: UsageCollector<F>,
    sampler: Box<dyn SystemSampler>,
}

impl<F: FileSystem> LiveSource<F> {
    /// Creates a new live provider.
    ///
    /// Fails when the stats cache is absent, since nothing meaningful can be
    /// shown without it. The history log is optional.
    pub fn new(
        usage: UsageCollector<F>,
        sampler: Box<dyn SystemSampler>,
    ) -> Result<Self, ProviderError> {
        if !usage.stats_exists() {
            return Err(ProviderError::MissingSource(usage.stats_path().to_path_buf()));
        }
        Ok(Self { usage, sampler })
    }
}

impl<F: FileSystem> SnapshotSource for LiveSource<F> {
    fn usage(&mut self) -> UsageReading {
        match self.usage.load() {
            Ok(reading) => {
                debug!(
                    messages = reading.snapshot.total_messages,
                    events = reading.events.len(),
                    "usage data loaded"
                );
                reading
            }
            Err(e) => {
                warn!("usage data unavailable: {}", e);
                UsageReading::default()
            }
        }
    }

    fn system(&mut self) -> SystemSnapshot {
        self.sampler.sample().unwrap_or_else(|e| {
            warn!("system sample failed: {}", e);
            SystemSnapshot::default()
        })
    }
}
