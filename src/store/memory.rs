use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{MeetupStore, StoreError, StoreResult};
use crate::context::RequestContext;
use crate::model::Meetup;

/// Process-local store backed by a vector in creation order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    meetups: RwLock<Vec<Meetup>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of meetups.
    pub fn seeded(meetups: Vec<Meetup>) -> Self {
        Self {
            meetups: RwLock::new(meetups),
        }
    }
}

#[async_trait]
impl MeetupStore for InMemoryStore {
    async fn create(&self, ctx: &RequestContext, meetup: Meetup) -> StoreResult<Meetup> {
        let mut meetups = self.meetups.write().await;
        // No await between this check and the push.
        if ctx.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        if meetups.iter().any(|m| m.id == meetup.id) {
            return Err(StoreError::DuplicateId(meetup.id));
        }
        meetups.push(meetup.clone());
        Ok(meetup)
    }

    async fn list_all(&self) -> StoreResult<Vec<Meetup>> {
        Ok(self.meetups.read().await.clone())
    }
}
