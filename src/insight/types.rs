use serde::{Deserialize, Serialize};

/// A source reference attached to a model response produced with search
/// grounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherData {
    /// Celsius.
    pub temp: f64,
    pub condition: String,
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Citation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub year: String,
    pub event: String,
    pub description: String,
    #[serde(default)]
    pub sources: Vec<Citation>,
}

/// The bundle fetched for "today". Transient — replaced wholesale on every
/// refresh, never persisted. Each field degrades independently to absent.
#[derive(Debug, Clone, Default)]
pub struct DailyInsight {
    pub weather: Option<WeatherData>,
    pub quote: Option<Quote>,
    pub history: Option<HistoryEvent>,
}

impl DailyInsight {
    pub fn is_empty(&self) -> bool {
        self.weather.is_none() && self.quote.is_none() && self.history.is_none()
    }
}
