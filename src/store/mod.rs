pub mod demo;
pub mod event_store;
