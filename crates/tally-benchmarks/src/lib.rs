//! Tally benchmarking suite
//!
//! Benchmarks for the increment hot path and status line rendering.

pub mod common;

pub use common::*;
