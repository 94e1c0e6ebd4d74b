//! opsdesk — terminal admin dashboard for a company site.
//!
//! Library crate behind the `opsdesk` binary: a generic grid controller
//! over typed record collections (filter, sort, paginate, select,
//! mutate), role-gated navigation, and the ratatui screens driving it.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
