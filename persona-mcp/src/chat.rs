//! Minimal chat boundary: `{message}` in, `{message, sources, error?}`
//! out. Hosts map a set `error` to their transport's failure status.

use serde::{Deserialize, Serialize};

use persona_core::models::Mode;
use persona_pipeline::RagEngine;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    /// Titles of the knowledge-base entries the answer drew on.
    pub sources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Run one chat turn through the pipeline.
pub async fn handle_chat(engine: &RagEngine, request: ChatRequest, mode: Mode) -> ChatResponse {
    let result = engine.query(&request.message, mode, None).await;
    ChatResponse {
        message: result.answer,
        sources: result.sources.into_iter().map(|c| c.title).collect(),
        error: result.error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_is_omitted_when_none() {
        let response = ChatResponse {
            message: "hi".to_string(),
            sources: vec!["Role".to_string()],
            error: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["sources"][0], "Role");
    }

    #[test]
    fn error_field_survives_round_trip() {
        let response = ChatResponse {
            message: String::new(),
            sources: Vec::new(),
            error: Some("generation cascade exhausted after 4 attempts".to_string()),
        };
        let parsed: ChatResponse =
            serde_json::from_str(&serde_json::to_string(&response).unwrap()).unwrap();
        assert!(parsed.error.is_some());
        assert!(parsed.message.is_empty());
    }
}
