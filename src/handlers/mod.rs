pub mod create_meetup;
pub mod meetups;

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Map, Value};

use crate::context::RequestContext;
use crate::error::{ErrorCode, ResolverError};
use crate::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, OperationErrorResponse, OperationParams,
};
use crate::resolver::{MutationRoot, QueryRoot, Resolver};
use crate::schema::{self, OperationKind};

/// Routes JSON-RPC requests to the query or mutation capability group.
///
/// Only the capability traits are visible here; the concrete resolvers are
/// chosen by whoever builds the dispatcher.
pub struct Dispatcher {
    query: Arc<dyn QueryRoot>,
    mutation: Arc<dyn MutationRoot>,
    request_timeout: Option<Duration>,
}

impl Dispatcher {
    /// Dispatcher over the capability groups of `resolver`.
    pub fn new(resolver: &Resolver) -> Self {
        Self::from_parts(Arc::new(resolver.query()), Arc::new(resolver.mutation()))
    }

    pub fn from_parts(query: Arc<dyn QueryRoot>, mutation: Arc<dyn MutationRoot>) -> Self {
        Self {
            query,
            mutation,
            request_timeout: None,
        }
    }

    /// Deadline applied to the context of every dispatched request.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Dispatch a JSON-RPC request with a fresh per-request context.
    ///
    /// Returns `None` for notifications (no response required).
    pub async fn dispatch(&self, req: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        let (ctx, _cancel) = RequestContext::new(self.request_timeout);
        self.dispatch_with(req, &ctx).await
    }

    /// Dispatch a JSON-RPC request under a caller-owned context.
    pub async fn dispatch_with(
        &self,
        req: &JsonRpcRequest,
        ctx: &RequestContext,
    ) -> Option<JsonRpcResponse> {
        let outcome = match req.method.as_str() {
            "ping" => Ok(json!({})),
            "schema" => Ok(json!({ "operations": schema::operations() })),
            "query" => self.execute(OperationKind::Query, req, ctx).await,
            "mutation" => self.execute(OperationKind::Mutation, req, ctx).await,
            _ => Err(JsonRpcError::method_not_found(&req.method)),
        };

        // Notifications run for their effect only.
        if req.is_notification() {
            return None;
        }

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(req.response_id(), result),
            Err(error) => JsonRpcResponse::error(req.response_id(), error),
        })
    }

    async fn execute(
        &self,
        kind: OperationKind,
        req: &JsonRpcRequest,
        ctx: &RequestContext,
    ) -> Result<Value, JsonRpcError> {
        let params: OperationParams = match &req.params {
            Some(v) => serde_json::from_value(v.clone()).map_err(|e| {
                JsonRpcError::invalid_params(format!("Invalid {} params: {e}", kind.as_str()))
            })?,
            None => {
                return Err(JsonRpcError::invalid_params(format!(
                    "Missing params for {}",
                    kind.as_str()
                )));
            }
        };

        // Only fields declared under this kind are reachable from this method.
        let Some(op) = schema::find(kind, &params.field) else {
            return Err(JsonRpcError::method_not_found(&format!(
                "{}.{}",
                kind.as_str(),
                params.field
            )));
        };

        if let Err(e) = op.validate_arguments(params.arguments.as_ref()) {
            tracing::debug!(operation = op.name, error = %e, "arguments rejected by schema");
            return Err(
                OperationErrorResponse::new(ErrorCode::ValidationError, op.name, e.to_string()).into(),
            );
        }

        tracing::debug!(kind = kind.as_str(), operation = op.name, "dispatching operation");

        let resolved = match (kind, op.name) {
            (OperationKind::Query, "meetups") => meetups::handle(self.query.as_ref(), ctx).await,
            (OperationKind::Mutation, "createMeetup") => {
                create_meetup::handle(self.mutation.as_ref(), ctx, params.arguments).await
            }
            _ => return Err(JsonRpcError::method_not_found(op.name)),
        };

        let value = resolved?;
        let mut data = Map::new();
        data.insert(op.name.to_string(), value);
        Ok(json!({ "data": data }))
    }
}

/// Report a resolver failure attached to `operation`, preserving its code.
pub(crate) fn operation_failed(operation: &str, err: &ResolverError) -> JsonRpcError {
    tracing::warn!(operation, code = ?err.code(), error = %err, "operation failed");
    OperationErrorResponse::from_resolver(operation, err).into()
}

/// Serialize a resolver payload into the response value.
pub(crate) fn to_payload<T: serde::Serialize>(operation: &str, value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!(operation, error = %e, "serialization failed");
        JsonRpcError::internal_error(format!("Serialization failed: {e}"))
    })
}
