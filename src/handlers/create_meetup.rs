use serde::Deserialize;
use serde_json::Value;

use super::{operation_failed, to_payload};
use crate::context::RequestContext;
use crate::error::ResolverError;
use crate::model::NewMeetup;
use crate::protocol::JsonRpcError;
use crate::resolver::MutationRoot;

const OPERATION: &str = "createMeetup";

#[derive(Debug, Deserialize)]
struct CreateMeetupArgs {
    input: NewMeetup,
}

/// Handle the `createMeetup` mutation.
///
/// `arguments` has already passed schema validation; decoding failures are
/// still reported as validation errors rather than trusted.
pub async fn handle(
    mutation: &dyn MutationRoot,
    ctx: &RequestContext,
    arguments: Option<Value>,
) -> Result<Value, JsonRpcError> {
    let args: CreateMeetupArgs = match arguments {
        Some(v) => serde_json::from_value(v)
            .map_err(|e| operation_failed(OPERATION, &ResolverError::validation("input", e.to_string())))?,
        None => {
            return Err(operation_failed(
                OPERATION,
                &ResolverError::validation("input", "argument is required"),
            ));
        }
    };

    match mutation.create_meetup(ctx, args.input).await {
        Ok(meetup) => to_payload(OPERATION, &meetup),
        Err(err) => Err(operation_failed(OPERATION, &err)),
    }
}
