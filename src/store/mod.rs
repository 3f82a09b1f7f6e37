//! Storage collaborators for meetups.
//!
//! The store is the only shared mutable resource in the server. Each
//! implementation owns its concurrency control; callers hold a shared handle
//! and never synchronize around it.

pub mod file;
pub mod memory;

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::model::{Meetup, MeetupId};

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("meetup `{0}` already exists")]
    DuplicateId(MeetupId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("write abandoned: request cancelled")]
    Cancelled,
}

/// Persistent meetup collection.
///
/// `create` commits atomically: after it returns an error, no trace of the
/// meetup is visible to `list_all`. It abandons the write with
/// [`StoreError::Cancelled`] if `ctx` is done before the commit point, and the
/// returned future may be dropped at any await without leaving a partial
/// write. `list_all` returns meetups in creation order.
#[async_trait]
pub trait MeetupStore: Send + Sync {
    /// Persist a fully built meetup and return the stored value.
    async fn create(&self, ctx: &RequestContext, meetup: Meetup) -> StoreResult<Meetup>;

    /// Snapshot of every stored meetup.
    async fn list_all(&self) -> StoreResult<Vec<Meetup>>;
}
