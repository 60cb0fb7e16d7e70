//! Tool definitions served through `tools/list` and dispatched by
//! `tools/call`.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Tool definition with a JSON Schema for input validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Tool names as constants for dispatch.
pub mod tool_names {
    pub const BASIC_RAG_QUERY: &str = "basic_rag_query";
    pub const ADVANCED_RAG_QUERY: &str = "advanced_rag_query";
    pub const RAG_QUERY: &str = "rag_query";
}

fn query_property() -> serde_json::Value {
    json!({
        "type": "string",
        "minLength": 1,
        "description": "Natural-language question about the professional profile"
    })
}

fn techniques_property() -> serde_json::Value {
    json!({
        "type": "object",
        "description": "Per-request transformation technique overrides",
        "properties": {
            "multi_query": { "type": "boolean" },
            "multi_query_count": { "type": "integer", "minimum": 1 },
            "rag_fusion": { "type": "boolean" },
            "decomposition": { "type": "boolean" },
            "step_back": { "type": "boolean" },
            "hyde": { "type": "boolean" }
        }
    })
}

/// Get all tool definitions for the `tools/list` response.
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            tool_names::BASIC_RAG_QUERY,
            "Answer a question about the professional profile using single-query retrieval.",
            json!({
                "type": "object",
                "properties": {
                    "query": query_property()
                },
                "required": ["query"]
            }),
        ),
        ToolDefinition::new(
            tool_names::ADVANCED_RAG_QUERY,
            "Answer a question using multi-query expansion, RRF fusion, and the full \
             generation cascade.",
            json!({
                "type": "object",
                "properties": {
                    "query": query_property(),
                    "techniques": techniques_property()
                },
                "required": ["query"]
            }),
        ),
        ToolDefinition::new(
            tool_names::RAG_QUERY,
            "Answer a question with an explicit pipeline mode.",
            json!({
                "type": "object",
                "properties": {
                    "query": query_property(),
                    "mode": {
                        "type": "string",
                        "enum": ["basic", "advanced"],
                        "default": "basic",
                        "description": "Pipeline mode"
                    },
                    "techniques": techniques_property()
                },
                "required": ["query"]
            }),
        ),
    ]
}
