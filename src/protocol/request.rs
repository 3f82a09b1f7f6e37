use serde::{Deserialize, Deserializer, Serialize};

/// JSON-RPC 2.0 ID — may be a number or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

/// JSON-RPC 2.0 request envelope.
///
/// `id` is `None` when the member is absent (a notification) and
/// `Some(None)` when it is present as `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Option<RpcId>>,
    pub method: String,
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    /// Build a request; `id: None` builds a notification.
    pub fn new(id: Option<RpcId>, method: impl Into<String>, params: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id: id.map(Some),
            method: method.into(),
            params,
        }
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// The id echoed back in the response (`null` when absent or null).
    pub fn response_id(&self) -> Option<RpcId> {
        self.id.clone().flatten()
    }
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<Option<RpcId>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RpcId>::deserialize(deserializer).map(Some)
}

/// Parameters for the `query` and `mutation` methods.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationParams {
    /// Schema-declared field name, e.g. `meetups` or `createMeetup`.
    pub field: String,
    pub arguments: Option<serde_json::Value>,
}
