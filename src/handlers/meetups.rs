use serde_json::Value;

use super::{operation_failed, to_payload};
use crate::context::RequestContext;
use crate::protocol::JsonRpcError;
use crate::resolver::QueryRoot;

const OPERATION: &str = "meetups";

/// Handle the `meetups` query.
///
/// A failed or cancelled read returns no partial list.
pub async fn handle(query: &dyn QueryRoot, ctx: &RequestContext) -> Result<Value, JsonRpcError> {
    match query.meetups(ctx).await {
        Ok(meetups) => to_payload(OPERATION, &meetups),
        Err(err) => Err(operation_failed(OPERATION, &err)),
    }
}
