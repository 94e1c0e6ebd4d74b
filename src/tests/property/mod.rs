//! Property-based tests for opsdesk
//!
//! This module contains property-based tests using the proptest framework.
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! Run all property tests:
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `grid_props`: Tests for the shared grid controller
//!   - Filtering preserves collection order and never invents rows
//!   - Sorting orders rows, is idempotent, and a second toggle exactly
//!     reverses them
//!   - Pages partition the filtered set with no gaps or overlaps
//!   - Select-all covers the filtered view; a second toggle clears it
//!   - Bulk delete removes exactly the selection, in order
//!   - Page, cursor, and selection stay consistent under any key sequence
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod grid_props;
