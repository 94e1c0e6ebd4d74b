//! Crate-internal test suites that go beyond per-module unit tests.
//!
//! Unit tests live next to the code they cover in `#[cfg(test)]` modules.
//! This tree holds the suites that cut across modules:
//!
//! - `property`: proptest invariants over the grid controller

mod property;
