use async_trait::async_trait;

use super::{MutationRoot, Resolver};
use crate::context::RequestContext;
use crate::error::{ResolverError, ResolverResult};
use crate::model::{Meetup, NewMeetup};

/// Mutation capability group.
#[derive(Debug, Clone)]
pub struct MutationResolver {
    root: Resolver,
}

impl MutationResolver {
    pub(crate) fn new(root: Resolver) -> Self {
        Self { root }
    }
}

#[async_trait]
impl MutationRoot for MutationResolver {
    /// The store call races the context: cancellation or the deadline ends the
    /// operation with `Cancelled` even if the store stalls. The store itself
    /// abandons a write whose context is done before its commit point, so a
    /// cancelled create never leaves a half-written meetup behind.
    async fn create_meetup(&self, ctx: &RequestContext, input: NewMeetup) -> ResolverResult<Meetup> {
        ctx.check()?;
        validate(&input)?;

        let meetup = Meetup::from_new(self.root.next_id(), input);

        let stored = ctx
            .guard(async { self.root.store().create(ctx, meetup).await.map_err(ResolverError::from) })
            .await?;

        tracing::info!(id = %stored.id, title = %stored.title, "meetup created");
        Ok(stored)
    }
}

fn validate(input: &NewMeetup) -> ResolverResult<()> {
    require("title", &input.title)?;
    require("location", &input.location)
}

fn require(field: &str, value: &str) -> ResolverResult<()> {
    if value.trim().is_empty() {
        return Err(ResolverError::validation(field, "must not be blank"));
    }
    Ok(())
}
