//! Data collection for the dashboard.
//!
//! Readers in this module turn files and command output into typed snapshots.
//! Every file access goes through the [`FileSystem`] trait so collectors can be
//! exercised against [`MockFs`] in tests.
//!
//! # Architecture
//!
//! ```text
//!  UsageCollector            SystemSampler (trait)
//!  - stats-cache.json        ├── ProcfsSampler  /proc/{stat,meminfo,loadavg}
//!  - history.jsonl           └── TopSampler     `top -l 1 -n 0`
//!         │                         │
//!         └────────────┬────────────┘ (procfs only)
//!               ┌──────▼──────┐
//!               │  FileSystem │ (trait)
//!               └──────┬──────┘
//!            ┌─────────┴─────────┐
//!     ┌──────▼──────┐     ┌──────▼──────┐
//!     │   RealFs    │     │   MockFs    │
//!     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use claude_top::collector::{MockFs, SystemSampler, procfs::ProcfsSampler};
//!
//! let fs = MockFs::typical_system();
//! let mut sampler = ProcfsSampler::new(fs, "/proc");
//! let snapshot = sampler.sample().unwrap();
//! assert!(snapshot.mem_total > 0);
//! ```

mod error;
pub mod mock;
pub mod procfs;
pub mod top;
pub mod traits;
mod usage;

pub use error::CollectError;
pub use mock::MockFs;
pub use procfs::ProcfsSampler;
pub use top::TopSampler;
pub use traits::{FileSystem, RealFs, SystemSampler};
pub use usage::{UsageCollector, parse_history};
