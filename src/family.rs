//! Model family classification and request/response adaptation.
//!
//! Each external model identifier maps to one of three request/response
//! schema families, detected by case-insensitive substring match in a fixed
//! precedence order. The same classification drives both request shaping and
//! response parsing, so the two can never disagree for a given model. Key
//! differences between families:
//! - Claude: messages array with an `anthropic_version` marker; text at
//!   `content[0].text`.
//! - Nova: converse-style messages with `[{"text": ...}]` content blocks and
//!   an `inferenceConfig` object; text at `output.message.content[0].text`.
//! - Titan: flat `inputText` plus `textGenerationConfig`; text at
//!   `results[0].outputText`.

use serde_json::{json, Value};

/// Sampling parameters are fixed constants, not configurable per call.
pub const TEMPERATURE: f64 = 0.7;
pub const TOP_P: f64 = 0.9;

const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Closed set of request/response schema shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    Claude,
    Nova,
    Titan,
}

impl ModelFamily {
    /// Classify a model identifier into its schema family.
    ///
    /// Precedence is fixed: Claude, then Nova, then Titan. Identifiers that
    /// match none of the known markers use the Claude shape.
    pub fn classify(model_id: &str) -> Self {
        let id = model_id.to_lowercase();
        if id.contains("claude") || id.contains("anthropic") {
            ModelFamily::Claude
        } else if id.contains("nova") {
            ModelFamily::Nova
        } else if id.contains("titan") {
            ModelFamily::Titan
        } else {
            ModelFamily::Claude
        }
    }

    /// Build the family-specific invocation body.
    pub fn build_body(&self, prompt: &str, max_tokens: u32) -> Value {
        match self {
            ModelFamily::Claude => json!({
                "anthropic_version": ANTHROPIC_VERSION,
                "max_tokens": max_tokens,
                "temperature": TEMPERATURE,
                "top_p": TOP_P,
                "messages": [
                    { "role": "user", "content": prompt }
                ],
            }),
            ModelFamily::Nova => json!({
                "messages": [
                    { "role": "user", "content": [ { "text": prompt } ] }
                ],
                "inferenceConfig": {
                    "maxTokens": max_tokens,
                    "temperature": TEMPERATURE,
                    "topP": TOP_P,
                },
            }),
            ModelFamily::Titan => json!({
                "inputText": prompt,
                "textGenerationConfig": {
                    "maxTokenCount": max_tokens,
                    "temperature": TEMPERATURE,
                    "topP": TOP_P,
                },
            }),
        }
    }

    /// Extract generated text from a family-specific response body.
    ///
    /// Returns `None` when the expected path is absent. An empty string is
    /// returned as-is; the caller treats it as a decode failure.
    pub fn extract_text(&self, body: &Value) -> Option<String> {
        let path = match self {
            ModelFamily::Claude => "/content/0/text",
            ModelFamily::Nova => "/output/message/content/0/text",
            ModelFamily::Titan => "/results/0/outputText",
        };
        body.pointer(path).and_then(|v| v.as_str()).map(String::from)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFamily::Claude => "claude",
            ModelFamily::Nova => "nova",
            ModelFamily::Titan => "titan",
        }
    }
}

impl std::fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_markers() {
        assert_eq!(
            ModelFamily::classify("anthropic.claude-3-haiku-20240307-v1:0"),
            ModelFamily::Claude
        );
        assert_eq!(ModelFamily::classify("amazon.nova-lite-v1:0"), ModelFamily::Nova);
        assert_eq!(
            ModelFamily::classify("amazon.titan-text-express-v1"),
            ModelFamily::Titan
        );
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(ModelFamily::classify("Amazon.NOVA-Pro-v1:0"), ModelFamily::Nova);
        assert_eq!(ModelFamily::classify("ANTHROPIC.CLAUDE"), ModelFamily::Claude);
    }

    #[test]
    fn test_classify_precedence_and_fallback() {
        // Claude marker wins over a later nova marker.
        assert_eq!(ModelFamily::classify("claude-nova-hybrid"), ModelFamily::Claude);
        // Unknown identifiers fall back to the Claude shape.
        assert_eq!(ModelFamily::classify("mistral.mixtral-8x7b"), ModelFamily::Claude);
    }

    #[test]
    fn test_claude_body_shape() {
        let body = ModelFamily::Claude.build_body("Buat deskripsi produk", 600);
        assert_eq!(body["anthropic_version"], ANTHROPIC_VERSION);
        assert_eq!(body["max_tokens"], 600);
        assert_eq!(body["temperature"], TEMPERATURE);
        assert_eq!(body["top_p"], TOP_P);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Buat deskripsi produk");
    }

    #[test]
    fn test_nova_body_shape() {
        let body = ModelFamily::Nova.build_body("Halo", 300);
        assert_eq!(body["messages"][0]["content"][0]["text"], "Halo");
        assert_eq!(body["inferenceConfig"]["maxTokens"], 300);
        assert_eq!(body["inferenceConfig"]["topP"], TOP_P);
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_titan_body_shape() {
        let body = ModelFamily::Titan.build_body("Halo", 200);
        assert_eq!(body["inputText"], "Halo");
        assert_eq!(body["textGenerationConfig"]["maxTokenCount"], 200);
        assert_eq!(body["textGenerationConfig"]["temperature"], TEMPERATURE);
    }

    #[test]
    fn test_extract_text_per_family() {
        let claude = serde_json::json!({
            "content": [{"type": "text", "text": "Halo dunia"}]
        });
        assert_eq!(
            ModelFamily::Claude.extract_text(&claude).as_deref(),
            Some("Halo dunia")
        );

        let nova = serde_json::json!({
            "output": {"message": {"content": [{"text": "Produk unggulan"}]}}
        });
        assert_eq!(
            ModelFamily::Nova.extract_text(&nova).as_deref(),
            Some("Produk unggulan")
        );

        let titan = serde_json::json!({
            "results": [{"outputText": "Promo spesial"}]
        });
        assert_eq!(
            ModelFamily::Titan.extract_text(&titan).as_deref(),
            Some("Promo spesial")
        );
    }

    #[test]
    fn test_extract_text_missing_path() {
        let body = serde_json::json!({"unexpected": true});
        assert!(ModelFamily::Nova.extract_text(&body).is_none());
    }
}
