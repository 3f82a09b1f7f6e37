use async_trait::async_trait;

use super::{QueryRoot, Resolver};
use crate::context::RequestContext;
use crate::error::{ResolverError, ResolverResult};
use crate::model::Meetup;

/// Query capability group.
#[derive(Debug, Clone)]
pub struct QueryResolver {
    root: Resolver,
}

impl QueryResolver {
    pub(crate) fn new(root: Resolver) -> Self {
        Self { root }
    }
}

#[async_trait]
impl QueryRoot for QueryResolver {
    async fn meetups(&self, ctx: &RequestContext) -> ResolverResult<Vec<Meetup>> {
        let meetups = ctx
            .guard(async { self.root.store().list_all().await.map_err(ResolverError::from) })
            .await?;

        tracing::debug!(count = meetups.len(), "meetups listed");
        Ok(meetups)
    }
}
