//! Conversation payload and upstream envelope types.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// One text message of a conversation, as the chat client builds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }

    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Body of `POST /api/chat`.
///
/// Turns are kept as raw JSON and forwarded byte for byte. A missing or
/// `null` `messages` field is treated like an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Option<Vec<Box<RawValue>>>,

    #[serde(default, rename = "apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ChatRequest {
    pub fn turns(&self) -> &[Box<RawValue>] {
        self.messages.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Body sent to `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: &'a [Box<RawValue>],
    pub generation_config: GenerationConfig,
}

/// Text of the first part of the first candidate, if the envelope has one.
pub fn first_candidate_text(envelope: &Value) -> Option<&str> {
    envelope
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}

/// `error.message` of an error envelope.
pub fn error_message(envelope: &Value) -> Option<&str> {
    envelope.get("error")?.get("message")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_parsing() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"messages":[{"role":"user","parts":[{"text":"hi"}]},{"role":"model","parts":[{"text":"hello"}]}],"apiKey":"k"}"#,
        )
        .unwrap();

        let turns: Vec<Turn> = req
            .turns()
            .iter()
            .map(|raw| serde_json::from_str(raw.get()).unwrap())
            .collect();
        assert_eq!(turns, vec![Turn::user("hi"), Turn::model("hello")]);
        assert_eq!(req.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_missing_or_null_messages_is_empty() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.turns().is_empty());
        assert!(req.api_key.is_none());

        let req: ChatRequest = serde_json::from_str(r#"{"messages":null}"#).unwrap();
        assert!(req.turns().is_empty());
    }

    #[test]
    fn test_turns_are_not_interpreted() {
        let turn = r#"{"role":"system","parts":[{"inlineData":{"mimeType":"image/png","data":"AA=="}},{"text":"x","thought":true}]}"#;
        let req: ChatRequest = serde_json::from_str(&format!(r#"{{"messages":[{turn}]}}"#)).unwrap();

        assert_eq!(req.turns().len(), 1);
        assert_eq!(req.turns()[0].get(), turn);
    }

    #[test]
    fn test_generate_content_shape() {
        let turns = vec![serde_json::value::to_raw_value(&Turn::user("hi")).unwrap()];
        let body = serde_json::to_string(&GenerateContentRequest {
            contents: &turns,
            generation_config: GenerationConfig {
                temperature: 0.5,
                max_output_tokens: 2048,
            },
        })
        .unwrap();

        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hi" }] }],
                "generationConfig": { "temperature": 0.5, "maxOutputTokens": 2048 }
            })
        );
    }

    #[test]
    fn test_envelope_helpers() {
        let ok = json!({ "candidates": [{ "content": { "parts": [{ "text": "answer" }] } }] });
        assert_eq!(first_candidate_text(&ok), Some("answer"));
        assert_eq!(first_candidate_text(&json!({ "candidates": [] })), None);

        let err = json!({ "error": { "code": 429, "message": "quota" } });
        assert_eq!(error_message(&err), Some("quota"));
        assert_eq!(error_message(&ok), None);
    }
}
