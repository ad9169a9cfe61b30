use serde_json::Value;
use thiserror::Error;

use super::types::Citation;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL: &str = "gemini-3-flash-preview";

/// A single request to the remote text-generation capability.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    /// When set, the capability is asked to emit JSON conforming to this
    /// schema, and the response text can be decoded directly.
    pub response_schema: Option<Value>,
    /// Enable the search-grounding tool; responses may carry citations.
    pub search_grounding: bool,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
            search_grounding: false,
        }
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_search_grounding(mut self) -> Self {
        self.search_grounding = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub text: String,
    pub citations: Vec<Citation>,
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("no text in API response")]
    EmptyResponse,
}

/// The narrow seam to the remote model. The production implementation is
/// [`GeminiBackend`]; tests script their own.
#[allow(async_fn_in_trait)]
pub trait GenerativeBackend {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, BackendError>;
}

/// Calls the Gemini `generateContent` REST API.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    api_key: String,
    client: reqwest::Client,
}

impl GeminiBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }
}

impl GenerativeBackend for GeminiBackend {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, BackendError> {
        let mut body = serde_json::json!({
            "contents": [
                { "parts": [ { "text": request.prompt } ] }
            ]
        });

        if let Some(schema) = request.response_schema {
            body["generationConfig"] = serde_json::json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            });
        }

        if request.search_grounding {
            body["tools"] = serde_json::json!([ { "google_search": {} } ]);
        }

        let url = format!("{}/{}:generateContent", GEMINI_ENDPOINT, MODEL);
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Api { status, body });
        }

        let api_resp: Value = resp.json().await?;
        let candidate = &api_resp["candidates"][0];

        // Text may be split across content parts — concatenate them
        let text = candidate["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p["text"].as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(BackendError::EmptyResponse);
        }

        let citations = parse_grounding_chunks(&candidate["groundingMetadata"]["groundingChunks"]);

        Ok(GenerateResponse { text, citations })
    }
}

/// Map grounding metadata to citations, keeping only entries with a usable
/// source reference.
fn parse_grounding_chunks(chunks: &Value) -> Vec<Citation> {
    let Some(chunks) = chunks.as_array() else {
        return Vec::new();
    };

    chunks
        .iter()
        .filter_map(|chunk| {
            let uri = chunk["web"]["uri"].as_str()?;
            if uri.is_empty() {
                return None;
            }
            Some(Citation {
                title: chunk["web"]["title"].as_str().unwrap_or("source").to_string(),
                uri: uri.to_string(),
            })
        })
        .collect()
}
