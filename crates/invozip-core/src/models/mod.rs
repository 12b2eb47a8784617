//! Data models: invoice records and run configuration.

pub mod config;
pub mod invoice;
