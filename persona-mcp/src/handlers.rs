//! Transport-agnostic JSON-RPC dispatch over the pipeline.
//!
//! Hosts own the wire (stdio, HTTP, whatever); this module owns parsing,
//! method routing, and argument validation. Pipeline outcomes — including
//! refusals and degraded answers — travel inside the tool result, never
//! as JSON-RPC errors.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use persona_core::config::AdvancedOverrides;
use persona_core::models::Mode;
use persona_pipeline::RagEngine;

use crate::protocol::{error_codes, JsonRpcId, JsonRpcRequest, JsonRpcResponse};
use crate::tools::{get_tool_definitions, tool_names};

/// Method names handled by `dispatch`.
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const TOOLS_LIST: &str = "tools/list";
    pub const TOOLS_CALL: &str = "tools/call";
}

pub struct ToolHandlers {
    engine: Arc<RagEngine>,
}

impl ToolHandlers {
    pub fn new(engine: Arc<RagEngine>) -> Self {
        Self { engine }
    }

    /// Parse a raw frame and dispatch it. Malformed JSON yields a
    /// `PARSE_ERROR` response with a null id.
    pub async fn dispatch_raw(&self, raw: &str) -> JsonRpcResponse {
        match serde_json::from_str::<JsonRpcRequest>(raw) {
            Ok(request) => self.dispatch(request).await,
            Err(e) => {
                JsonRpcResponse::error(None, error_codes::PARSE_ERROR, format!("parse error: {e}"))
            }
        }
    }

    /// Dispatch a request to the appropriate handler.
    pub async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!(method = %request.method, "dispatching");

        match request.method.as_str() {
            methods::INITIALIZE => self.handle_initialize(request.id),
            methods::TOOLS_LIST => self.handle_tools_list(request.id),
            methods::TOOLS_CALL => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        }
    }

    fn handle_initialize(&self, id: Option<JsonRpcId>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": { "listChanged": false }
                },
                "serverInfo": {
                    "name": "persona-mcp",
                    "version": persona_core::constants::VERSION
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Option<JsonRpcId>) -> JsonRpcResponse {
        JsonRpcResponse::success(id, json!({ "tools": get_tool_definitions() }))
    }

    async fn handle_tools_call(
        &self,
        id: Option<JsonRpcId>,
        params: Option<serde_json::Value>,
    ) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                "Missing params for tools/call",
            );
        };

        let Some(tool_name) = params.get("name").and_then(|v| v.as_str()) else {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                "Missing 'name' parameter in tools/call",
            );
        };

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        let mode = match tool_name {
            tool_names::BASIC_RAG_QUERY => Mode::Basic,
            tool_names::ADVANCED_RAG_QUERY => Mode::Advanced,
            tool_names::RAG_QUERY => match arguments.get("mode").and_then(|v| v.as_str()) {
                None | Some("basic") => Mode::Basic,
                Some("advanced") => Mode::Advanced,
                Some(other) => {
                    return JsonRpcResponse::error(
                        id,
                        error_codes::INVALID_PARAMS,
                        format!("Unknown mode: {other}"),
                    );
                }
            },
            _ => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::METHOD_NOT_FOUND,
                    format!("Unknown tool: {tool_name}"),
                );
            }
        };

        let query = match arguments.get("query").and_then(|v| v.as_str()) {
            Some(q) if !q.trim().is_empty() => q,
            _ => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "'query' must be a non-empty string",
                );
            }
        };

        let overrides = match arguments.get("techniques") {
            Some(raw) => match serde_json::from_value::<AdvancedOverrides>(raw.clone()) {
                Ok(o) => Some(o),
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid 'techniques' object: {e}"),
                    );
                }
            },
            None => None,
        };

        let result = self.engine.query(query, mode, overrides.as_ref()).await;
        tool_result(id, &result)
    }
}

/// Wrap a pipeline result in the tool result format:
/// `{content: [{type: "text", text: "..."}], isError: false}`.
///
/// Terminal pipeline failures (empty answer with `error` set) become a
/// JSON-RPC internal error carrying the full result in `data`; refusals
/// and degraded answers are ordinary results.
fn tool_result(id: Option<JsonRpcId>, result: &persona_core::models::RagResult) -> JsonRpcResponse {
    if let Some(error) = result.error.as_deref().filter(|_| result.answer.is_empty()) {
        return JsonRpcResponse::error_with_data(
            id,
            error_codes::INTERNAL_ERROR,
            error.to_string(),
            serde_json::to_value(result).unwrap_or(serde_json::Value::Null),
        );
    }
    JsonRpcResponse::success(
        id,
        json!({
            "content": [{
                "type": "text",
                "text": serde_json::to_string(result).unwrap_or_else(|_| "{}".to_string())
            }],
            "isError": false
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::BTreeSet;
    use std::time::Duration;

    use persona_core::config::{ProviderSpec, RagConfig};
    use persona_core::errors::{GenerationFailure, PersonaResult};
    use persona_core::models::{Candidate, RagResult};
    use persona_core::traits::{IEmbeddingProvider, IGenerationProvider, IVectorSearch};
    use persona_generation::ProviderRegistry;

    struct StaticSearch {
        results: Vec<Candidate>,
    }

    #[async_trait]
    impl IVectorSearch for StaticSearch {
        async fn search_text(&self, _q: &str, k: usize) -> PersonaResult<Vec<Candidate>> {
            Ok(self.results.iter().take(k).cloned().collect())
        }

        async fn search_embedding(&self, _e: &[f32], k: usize) -> PersonaResult<Vec<Candidate>> {
            self.search_text("", k).await
        }
    }

    struct StaticEmbedder;

    impl IEmbeddingProvider for StaticEmbedder {
        fn embed(&self, _text: &str) -> PersonaResult<Vec<f32>> {
            Ok(vec![0.0; 4])
        }

        fn name(&self) -> &str {
            "static"
        }
    }

    struct StaticGen;

    #[async_trait]
    impl IGenerationProvider for StaticGen {
        async fn generate(
            &self,
            _prompt: &str,
            _model: &str,
            _timeout: Duration,
        ) -> Result<String, GenerationFailure> {
            Ok("an answer".to_string())
        }

        fn name(&self) -> &str {
            "gen"
        }
    }

    struct FailingGen;

    #[async_trait]
    impl IGenerationProvider for FailingGen {
        async fn generate(
            &self,
            _prompt: &str,
            _model: &str,
            _timeout: Duration,
        ) -> Result<String, GenerationFailure> {
            Err(GenerationFailure::Failed {
                reason: "down".to_string(),
            })
        }

        fn name(&self) -> &str {
            "gen"
        }
    }

    fn handlers_with(gen: Arc<dyn IGenerationProvider>) -> ToolHandlers {
        let mut cfg = RagConfig::default();
        cfg.cascade.entries.push(ProviderSpec::new("gen", "m1"));

        let mut registry = ProviderRegistry::new();
        registry.register(gen.clone());

        let engine = RagEngine::builder(
            cfg,
            gen,
            Arc::new(StaticSearch {
                results: vec![Candidate {
                    id: "a".to_string(),
                    title: "Role".to_string(),
                    content: "built services".to_string(),
                    score: 0.9,
                    category: "experience".to_string(),
                    tags: BTreeSet::new(),
                }],
            }),
            Arc::new(StaticEmbedder),
            registry,
        )
        .build()
        .unwrap();
        ToolHandlers::new(Arc::new(engine))
    }

    fn handlers() -> ToolHandlers {
        handlers_with(Arc::new(StaticGen))
    }

    fn call(tool: &str, arguments: serde_json::Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(JsonRpcId::Number(1)),
            method: methods::TOOLS_CALL.to_string(),
            params: Some(json!({ "name": tool, "arguments": arguments })),
        }
    }

    fn unwrap_rag_result(response: &JsonRpcResponse) -> RagResult {
        let result = response.result.as_ref().unwrap();
        let text = result["content"][0]["text"].as_str().unwrap();
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn tools_list_exposes_all_tools() {
        let h = handlers();
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(JsonRpcId::Number(1)),
            method: methods::TOOLS_LIST.to_string(),
            params: None,
        };
        let response = h.dispatch(request).await;
        assert!(response.error.is_none());
        let tools = response.result.unwrap()["tools"].as_array().unwrap().len();
        assert_eq!(tools, 3);
    }

    #[tokio::test]
    async fn unknown_method_yields_method_not_found() {
        let h = handlers();
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(JsonRpcId::Number(1)),
            method: "bogus/method".to_string(),
            params: None,
        };
        let response = h.dispatch(request).await;
        assert_eq!(response.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_frame_yields_parse_error_with_null_id() {
        let h = handlers();
        let response = h.dispatch_raw("{not json").await;
        assert!(response.id.is_none());
        assert_eq!(response.error.unwrap().code, error_codes::PARSE_ERROR);
    }

    #[tokio::test]
    async fn missing_query_yields_invalid_params() {
        let h = handlers();
        let response = h.dispatch(call(tool_names::BASIC_RAG_QUERY, json!({}))).await;
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn blank_query_yields_invalid_params() {
        let h = handlers();
        let response = h
            .dispatch(call(tool_names::BASIC_RAG_QUERY, json!({ "query": "  " })))
            .await;
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn basic_tool_call_returns_rag_result() {
        let h = handlers();
        let response = h
            .dispatch(call(
                tool_names::BASIC_RAG_QUERY,
                json!({ "query": "What did you build?" }),
            ))
            .await;
        assert!(response.error.is_none());
        let result = unwrap_rag_result(&response);
        assert_eq!(result.answer, "an answer");
        assert!(result.error.is_none());
        assert_eq!(result.sources.len(), 1);
    }

    #[tokio::test]
    async fn generation_exhaustion_maps_to_internal_error_with_data() {
        let h = handlers_with(Arc::new(FailingGen));
        let response = h
            .dispatch(call(
                tool_names::BASIC_RAG_QUERY,
                json!({ "query": "What did you build?" }),
            ))
            .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::INTERNAL_ERROR);
        assert!(error.message.contains("exhausted"));
        let result: RagResult = serde_json::from_value(error.data.unwrap()).unwrap();
        assert!(result.answer.is_empty());
    }

    #[tokio::test]
    async fn rag_query_honors_mode_argument() {
        let h = handlers();
        let response = h
            .dispatch(call(
                tool_names::RAG_QUERY,
                json!({ "query": "What did you build?", "mode": "advanced" }),
            ))
            .await;
        let result = unwrap_rag_result(&response);
        assert_eq!(result.metadata.mode, persona_core::models::Mode::Advanced);
    }

    #[tokio::test]
    async fn malformed_techniques_object_yields_invalid_params() {
        let h = handlers();
        let response = h
            .dispatch(call(
                tool_names::ADVANCED_RAG_QUERY,
                json!({ "query": "q", "techniques": { "hyde": "yes" } }),
            ))
            .await;
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn rag_query_rejects_unknown_mode() {
        let h = handlers();
        let response = h
            .dispatch(call(
                tool_names::RAG_QUERY,
                json!({ "query": "q", "mode": "turbo" }),
            ))
            .await;
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);
    }
}
