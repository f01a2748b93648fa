//! Support library for the spanforest CLI binary.
//!
//! Re-exports the CLI and logging modules so doctests and tests can drive a
//! forest pass without forking a subprocess.

pub mod cli;
pub mod logging;
