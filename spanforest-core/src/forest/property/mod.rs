//! Property-based tests for both forest strategies.
//!
//! Checks the structural invariants every forest must satisfy (acyclicity,
//! `n - c` edges, cost bookkeeping, only active edges used), determinism,
//! and cost monotonicity under edge breakage for uniform lengths.

mod invariants;
mod strategies;
mod tests;
