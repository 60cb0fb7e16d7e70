//! # persona-mcp
//!
//! External boundaries over the pipeline: a transport-agnostic JSON-RPC
//! 2.0 tool surface (`tools/list`, `tools/call`) and a minimal chat
//! request/response shape. Both converge on the same `RagResult`
//! contract the pipeline produces.

pub mod chat;
pub mod handlers;
pub mod protocol;
pub mod tools;

pub use chat::{handle_chat, ChatRequest, ChatResponse};
pub use handlers::ToolHandlers;
pub use protocol::{JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse};
