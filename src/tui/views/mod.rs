//! One module per screen. Every management screen owns a
//! [`GridState`](crate::core::grid::GridState) over its record type plus
//! whatever modal state the screen needs; the dashboard and settings
//! screens are plain panels.

pub mod applications;
pub mod dashboard;
pub mod documents;
pub mod inbox;
pub mod jobs;
pub mod media;
pub mod pages;
pub mod settings;
pub mod tasks;
