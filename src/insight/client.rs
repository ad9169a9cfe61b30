use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use super::backend::{GenerateRequest, GenerativeBackend};
use super::types::{Coordinates, DailyInsight, HistoryEvent, Quote, WeatherData};

/// First brace-delimited substring in a free-text model response.
static JSON_BLOB: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// Fetches the daily insight bundle from a generative backend.
///
/// Construct with `None` when no API credential is configured — every fetch
/// then short-circuits to an empty result without touching the network.
pub struct InsightClient<B> {
    backend: Option<B>,
}

impl<B: GenerativeBackend> InsightClient<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn unconfigured() -> Self {
        Self { backend: None }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Fetch quote, history and (when coordinates are known) weather.
    ///
    /// The three requests run concurrently. Each field degrades to absent
    /// on its own request or decode failure; a partial bundle is returned
    /// as-is, never discarded wholesale.
    pub async fn fetch(&self, coords: Option<Coordinates>, today: NaiveDate) -> DailyInsight {
        let Some(backend) = &self.backend else {
            log::warn!("No API credential configured, skipping insight fetch");
            return DailyInsight::default();
        };

        let (quote, history, weather) = futures::join!(
            fetch_quote(backend),
            fetch_history(backend, today),
            fetch_weather(backend, coords),
        );

        DailyInsight {
            weather,
            quote,
            history,
        }
    }
}

async fn fetch_quote<B: GenerativeBackend>(backend: &B) -> Option<Quote> {
    let schema = serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "text": { "type": "STRING" },
            "author": { "type": "STRING" }
        },
        "required": ["text", "author"]
    });

    let request = GenerateRequest::new(
        "Give me one inspiring quote for today in Korean. \
         Respond as JSON: { \"text\": \"...\", \"author\": \"...\" }",
    )
    .with_schema(schema);

    let response = match backend.generate(request).await {
        Ok(r) => r,
        Err(e) => {
            log::warn!("Quote request failed: {}", e);
            return None;
        }
    };

    decode_structured::<Quote>(&response.text, "quote")
}

async fn fetch_history<B: GenerativeBackend>(backend: &B, today: NaiveDate) -> Option<HistoryEvent> {
    let prompt = format!(
        "오늘({})은 역사적으로 어떤 중요한 일이 있었나요? 가장 중요한 사건 하나만 알려주세요. \
         연도와 사건 설명을 포함해 JSON으로 응답하세요: \
         {{ \"year\": \"연도\", \"event\": \"사건명\", \"description\": \"간략한 설명\" }}",
        today.format("%Y-%m-%d"),
    );

    // Search grounding can't be combined with schema enforcement, so the
    // JSON shape rides in the prompt and the reply takes the fallback parse.
    let request = GenerateRequest::new(prompt).with_search_grounding();

    let response = match backend.generate(request).await {
        Ok(r) => r,
        Err(e) => {
            log::warn!("History request failed: {}", e);
            return None;
        }
    };

    let mut history = decode_structured::<HistoryEvent>(&response.text, "history")?;
    history.sources = response.citations;
    Some(history)
}

async fn fetch_weather<B: GenerativeBackend>(
    backend: &B,
    coords: Option<Coordinates>,
) -> Option<WeatherData> {
    let coords = coords?;

    let prompt = format!(
        "What is the current weather at latitude {}, longitude {}? \
         Provide temperature in Celsius, condition, and location name. \
         Return as JSON: {{ \"temp\": number, \"condition\": \"sunny/cloudy/rainy...\", \
         \"location\": \"City Name\", \"description\": \"short description\" }}",
        coords.lat, coords.lon,
    );

    // Same as history: grounded, so no schema — free-text fallback parse.
    let request = GenerateRequest::new(prompt).with_search_grounding();

    let response = match backend.generate(request).await {
        Ok(r) => r,
        Err(e) => {
            log::warn!("Weather request failed: {}", e);
            return None;
        }
    };

    let mut weather = decode_structured::<WeatherData>(&response.text, "weather")?;
    weather.sources = response.citations;
    Some(weather)
}

/// Decode a model response into `T`: direct parse first (schema-enforced
/// responses are plain JSON), then the first brace-delimited substring as a
/// fallback. `None` on failure — never a partial value.
fn decode_structured<T: DeserializeOwned>(text: &str, what: &str) -> Option<T> {
    if let Ok(value) = serde_json::from_str::<T>(text.trim()) {
        return Some(value);
    }

    if let Some(m) = JSON_BLOB.find(text) {
        match serde_json::from_str::<T>(m.as_str()) {
            Ok(value) => return Some(value),
            Err(e) => {
                log::warn!("Failed to parse {} response: {}", what, e);
                return None;
            }
        }
    }

    log::warn!("No JSON found in {} response", what);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::backend::{BackendError, GenerateResponse};
    use crate::insight::types::Citation;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted backend: dispatches on request shape (quote carries the
    /// schema; the grounded requests are told apart by prompt) and counts
    /// calls.
    struct FakeBackend {
        quote: Option<String>,
        history: Option<String>,
        weather: Option<String>,
        citations: Vec<Citation>,
        calls: AtomicUsize,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                quote: None,
                history: None,
                weather: None,
                citations: Vec::new(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl GenerativeBackend for &FakeBackend {
        async fn generate(
            &self,
            request: GenerateRequest,
        ) -> Result<GenerateResponse, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let scripted = if request.response_schema.is_some() {
                &self.quote
            } else if request.prompt.contains("latitude") {
                &self.weather
            } else {
                &self.history
            };
            match scripted {
                Some(text) => Ok(GenerateResponse {
                    text: text.clone(),
                    citations: self.citations.clone(),
                }),
                None => Err(BackendError::EmptyResponse),
            }
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn seoul() -> Coordinates {
        Coordinates {
            lat: 37.56,
            lon: 126.97,
        }
    }

    #[tokio::test]
    async fn unconfigured_client_returns_empty_without_calls() {
        let backend = FakeBackend::new();
        let client: InsightClient<&FakeBackend> = InsightClient::unconfigured();

        let insight = client.fetch(Some(seoul()), today()).await;

        assert!(insight.is_empty());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn partial_failure_keeps_successful_fields() {
        let mut backend = FakeBackend::new();
        backend.history = Some(
            r#"{"year": "1969", "event": "Apollo", "description": "Moon landing"}"#.to_string(),
        );
        backend.weather = Some("sorry, I could not find that out".to_string());
        let client = InsightClient::new(&backend);

        let insight = client.fetch(Some(seoul()), today()).await;

        assert!(insight.quote.is_none());
        assert!(insight.weather.is_none());
        let history = insight.history.expect("history should survive");
        assert_eq!(history.year, "1969");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn weather_skipped_without_coordinates() {
        let mut backend = FakeBackend::new();
        backend.quote = Some(r#"{"text": "될 때까지 하라", "author": "익명"}"#.to_string());
        let client = InsightClient::new(&backend);

        let insight = client.fetch(None, today()).await;

        assert!(insight.weather.is_none());
        assert_eq!(insight.quote.unwrap().text, "될 때까지 하라");
        // Only quote and history went out
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn history_carries_grounding_citations() {
        let mut backend = FakeBackend::new();
        backend.history = Some(
            r#"{"year": "1896", "event": "First modern Olympics", "description": "Athens"}"#
                .to_string(),
        );
        backend.citations = vec![Citation {
            title: "Encyclopedia".into(),
            uri: "https://example.org/olympics".into(),
        }];
        let client = InsightClient::new(&backend);

        let insight = client.fetch(None, today()).await;

        let history = insight.history.unwrap();
        assert_eq!(history.sources.len(), 1);
        assert_eq!(history.sources[0].uri, "https://example.org/olympics");
    }

    #[tokio::test]
    async fn weather_parses_json_embedded_in_prose() {
        let mut backend = FakeBackend::new();
        backend.weather = Some(
            "Here is the current weather:\n\
             { \"temp\": 21.5, \"condition\": \"sunny\", \"location\": \"Seoul\", \
             \"description\": \"clear skies\" }\n\
             Stay hydrated!"
                .to_string(),
        );
        let client = InsightClient::new(&backend);

        let insight = client.fetch(Some(seoul()), today()).await;

        let weather = insight.weather.expect("weather should parse");
        assert_eq!(weather.temp, 21.5);
        assert_eq!(weather.location, "Seoul");
    }

    #[test]
    fn decode_falls_back_to_embedded_object() {
        let quote: Option<Quote> =
            decode_structured("noise { \"text\": \"t\", \"author\": \"a\" } trailing", "quote");
        assert_eq!(quote.unwrap().author, "a");

        let none: Option<Quote> = decode_structured("no json here", "quote");
        assert!(none.is_none());
    }
}
