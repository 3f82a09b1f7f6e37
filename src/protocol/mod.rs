pub mod request;
pub mod response;

pub use request::{JsonRpcRequest, OperationParams, RpcId};
pub use response::{JsonRpcError, JsonRpcResponse, OperationError, OperationErrorResponse};
