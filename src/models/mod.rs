pub mod config;
pub mod event;
pub mod filter;
pub mod response;
pub mod stats;
