//! Client for a `generateContent` style text-generation endpoint.
//!
//! The plugin cannot open sockets itself, so this module only builds the
//! request (URL, headers, JSON body) and parses the reply. Sending happens
//! through the host's web request call in the plugin shim.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Default API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Why a generation attempt produced no usable text.
///
/// Never shown to the operator: the composer resolves every variant to the
/// local fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("text generation is not configured")]
    NotConfigured,

    #[error("generation request failed with status {status}")]
    Transport { status: u16 },

    #[error("malformed generation response: {0}")]
    Malformed(String),

    #[error("generation returned no text")]
    Empty,

    #[error("generation timed out")]
    TimedOut,
}

/// A fully built outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

/// Endpoint, model and credentials for the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationClient {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for GenerationClient {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

#[derive(Serialize)]
struct RequestBody<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ResponseBody {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerationClient {
    /// True when an API key is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    /// Builds the `POST {endpoint}/models/{model}:generateContent` request.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::NotConfigured`] without an API key.
    pub fn build_request(&self, prompt: &str) -> Result<GenerationRequest, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(GenerationError::NotConfigured)?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        );

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert(API_KEY_HEADER.to_string(), api_key.to_string());

        let body = RequestBody {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };
        let body = serde_json::to_vec(&body).map_err(|e| GenerationError::Malformed(e.to_string()))?;

        Ok(GenerationRequest { url, headers, body })
    }
}

/// Extracts the generated text from a reply.
///
/// The text is the concatenation of every part of the first candidate.
///
/// # Errors
///
/// - [`GenerationError::Transport`] for a non-2xx status
/// - [`GenerationError::Malformed`] if the body is not the expected JSON
/// - [`GenerationError::Empty`] if no text came back
pub fn parse_response(status: u16, body: &[u8]) -> Result<String, GenerationError> {
    if !(200..300).contains(&status) {
        return Err(GenerationError::Transport { status });
    }

    let reply: ResponseBody =
        serde_json::from_slice(body).map_err(|e| GenerationError::Malformed(e.to_string()))?;

    let text: String = reply
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(GenerationError::Empty);
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GenerationClient {
        GenerationClient {
            api_key: Some("secret".to_string()),
            ..GenerationClient::default()
        }
    }

    #[test]
    fn request_targets_model_endpoint() {
        let request = client().build_request("hello").unwrap();
        assert_eq!(
            request.url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(request.headers.get("x-goog-api-key").map(String::as_str), Some("secret"));

        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn missing_key_is_not_configured() {
        let client = GenerationClient::default();
        assert!(!client.is_configured());
        assert_eq!(client.build_request("x"), Err(GenerationError::NotConfigured));

        let blank = GenerationClient {
            api_key: Some("  ".to_string()),
            ..GenerationClient::default()
        };
        assert_eq!(blank.build_request("x"), Err(GenerationError::NotConfigured));
    }

    #[test]
    fn parses_concatenated_parts() {
        let body = br#"{"candidates":[{"content":{"parts":[{"text":"Hi Kim, "},{"text":"please return the tent."}]}}]}"#;
        assert_eq!(
            parse_response(200, body).unwrap(),
            "Hi Kim, please return the tent."
        );
    }

    #[test]
    fn failures_map_to_errors() {
        assert_eq!(
            parse_response(503, b"{}"),
            Err(GenerationError::Transport { status: 503 })
        );
        assert!(matches!(
            parse_response(200, b"<html>"),
            Err(GenerationError::Malformed(_))
        ));
        assert_eq!(parse_response(200, br#"{"candidates":[]}"#), Err(GenerationError::Empty));
        assert_eq!(
            parse_response(200, br#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#),
            Err(GenerationError::Empty)
        );
    }
}
