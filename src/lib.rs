//! claude-top - live terminal monitor for Claude Code usage.
//!
//! Provides:
//! - `collector` - file and command readers behind a mockable filesystem
//! - `provider` - snapshot source abstraction used by the refresh loop
//! - `window` - rolling and hourly message-window aggregation
//! - `fmt` - shared number formatting and level math
//! - `tui` - frame rendering, key handling and the refresh loop

pub mod collector;
pub mod config;
pub mod fmt;
pub mod model;
pub mod provider;
pub mod tui;
pub mod window;
