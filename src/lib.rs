pub mod config;
pub mod controller;
pub mod core;
pub mod geo;
pub mod insight;
pub mod store;

pub use config::BriefConfig;
pub use controller::{Controller, Phase};
pub use store::StateStore;
