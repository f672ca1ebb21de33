//! Host readings from the Linux `/proc` filesystem.

pub mod parser;
mod system;

pub use system::ProcfsSampler;
