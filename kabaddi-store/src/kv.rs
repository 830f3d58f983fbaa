//! Key-value store abstraction the storage helper is written against.
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! the futures are guaranteed `Send` and helpers can be driven from
//! `tokio::spawn`.

use std::future::Future;

use crate::error::PersistenceError;

/// Durable string values addressed by exact string keys.
///
/// No transactions and no queries beyond exact-key lookup. A missing key reads
/// as `Ok(None)`.
pub trait KeyValueStore: Send + Sync {
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, PersistenceError>> + Send;
    fn set(
        &self,
        key: &str,
        value: String,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), PersistenceError>> + Send;
}
