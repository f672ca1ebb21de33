//! Provider abstraction for snapshot data sources.
//!
//! The refresh loop pulls both kinds of snapshot through [`SnapshotSource`],
//! so it can be driven by the live data directory or by a test fixture.
//! Sources never fail once running: a reading that cannot be taken is
//! replaced by a zeroed snapshot and retried on the next request.

mod live;

pub use live::LiveSource;

use std::path::PathBuf;

use crate::model::{SystemSnapshot, UsageReading};

/// Error types that can occur while setting up a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// A required input file does not exist.
    MissingSource(PathBuf),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::MissingSource(path) => write!(f, "{} not found", path.display()),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Abstraction for snapshot data sources.
///
/// Both methods return promptly and never fail; implementations degrade to
/// default values internally.
pub trait SnapshotSource {
    /// Produces the current usage counters and message timestamps.
    fn usage(&mut self) -> UsageReading;

    /// Produces the current host resource reading.
    fn system(&mut self) -> SystemSnapshot;
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for Box<S> {
    fn usage(&mut self) -> UsageReading {
        (**self).usage()
    }

    fn system(&mut self) -> SystemSnapshot {
        (**self).system()
    }
}
