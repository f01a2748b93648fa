//! Benchmark support crate for spanforest.
//!
//! Builds seeded synthetic engines at the scale a person places by hand, so
//! Criterion benchmarks can time forest passes and restart cycles.

pub mod error;
pub mod params;
pub mod synthetic;
