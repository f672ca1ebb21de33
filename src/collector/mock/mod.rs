//! Mock filesystem for testing.
//!
//! This module provides `MockFs` and pre-built scenarios so collectors can be
//! tested without a real `/proc` or a real Claude Code data directory.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
pub use scenarios::MOCK_DATA_DIR;
