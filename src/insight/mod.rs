pub mod backend;
pub mod client;
pub mod types;

pub use backend::{GeminiBackend, GenerateRequest, GenerateResponse, GenerativeBackend};
pub use client::InsightClient;
pub use types::{Citation, Coordinates, DailyInsight, HistoryEvent, Quote, WeatherData};
