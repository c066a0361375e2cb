//! SIEM event dashboard: a client that polls an event backend for statistics
//! and filtered event lists and renders them, plus a development backend that
//! serves processed events over the same REST API.

pub mod api;
pub mod client;
pub mod console;
pub mod dashboard;
pub mod models;
pub mod store;
pub mod utils;
pub mod view;
