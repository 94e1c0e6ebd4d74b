pub mod auth;
pub mod grid;
pub mod logging;
pub mod model;
pub mod notify;
pub mod prefs;
pub mod reply;
pub mod seed;
