//! Bulk verification workflows built on top of [`crate::client::ApiClient`].

pub mod manager;

pub use manager::BulkManager;
