//! Resolver root and capability groups.
//!
//! [`Resolver`] is the single composition point holding the storage and ID
//! generation collaborators. It hands out one capability group per operation
//! kind:
//!
//! - [`Resolver::query`] → [`QueryResolver`], implementing [`QueryRoot`]
//! - [`Resolver::mutation`] → [`MutationResolver`], implementing [`MutationRoot`]
//!
//! Both groups share the root's handles, so repeated accessor calls observe
//! the same state. The dispatcher only ever sees the trait objects.

pub mod mutation;
pub mod query;

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::error::{ResolverError, ResolverResult};
use crate::model::{Meetup, MeetupId, NewMeetup};
use crate::store::MeetupStore;

pub use mutation::MutationResolver;
pub use query::QueryResolver;

/// Read operations declared by the schema.
#[async_trait]
pub trait QueryRoot: Send + Sync {
    /// All stored meetups, in creation order.
    async fn meetups(&self, ctx: &RequestContext) -> ResolverResult<Vec<Meetup>>;
}

/// Write operations declared by the schema.
#[async_trait]
pub trait MutationRoot: Send + Sync {
    /// Create and persist a meetup from `input`.
    async fn create_meetup(&self, ctx: &RequestContext, input: NewMeetup) -> ResolverResult<Meetup>;
}

/// Source of fresh meetup identifiers. Must never repeat a value.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> MeetupId;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> MeetupId {
        MeetupId::new(uuid::Uuid::new_v4().to_string())
    }
}

/// Composition root shared by all capability groups.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn MeetupStore>,
    ids: Arc<dyn IdGenerator>,
}

impl Resolver {
    pub fn new(store: Arc<dyn MeetupStore>) -> Self {
        Self {
            store,
            ids: Arc::new(UuidGenerator),
        }
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Mutation capability bound to this root's collaborators.
    pub fn mutation(&self) -> MutationResolver {
        MutationResolver::new(self.clone())
    }

    /// Query capability bound to this root's collaborators.
    pub fn query(&self) -> QueryResolver {
        QueryResolver::new(self.clone())
    }

    pub(crate) fn store(&self) -> &dyn MeetupStore {
        self.store.as_ref()
    }

    pub(crate) fn next_id(&self) -> MeetupId {
        self.ids.next_id()
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

/// Capability group for operations that have no backing logic yet.
///
/// Every operation fails with [`ResolverError::NotImplemented`] instead of
/// aborting, so callers get a structured failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unimplemented;

#[async_trait]
impl QueryRoot for Unimplemented {
    async fn meetups(&self, _ctx: &RequestContext) -> ResolverResult<Vec<Meetup>> {
        Err(ResolverError::not_implemented("meetups"))
    }
}

#[async_trait]
impl MutationRoot for Unimplemented {
    async fn create_meetup(&self, _ctx: &RequestContext, _input: NewMeetup) -> ResolverResult<Meetup> {
        Err(ResolverError::not_implemented("createMeetup"))
    }
}
