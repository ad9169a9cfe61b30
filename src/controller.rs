use std::time::Duration;

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::config::BriefConfig;
use crate::core::goal::Goal;
use crate::core::memo::Memo;
use crate::core::schedule::{Recurrence, ScheduleItem};
use crate::core::state::AppState;
use crate::geo::Geolocator;
use crate::insight::backend::{GeminiBackend, GenerativeBackend};
use crate::insight::client::InsightClient;
use crate::insight::types::{Coordinates, DailyInsight};
use crate::store::StateStore;

/// Where the controller is in its startup/refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Errored(String),
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Owns the persisted state and the transient insight bundle.
///
/// Every mutation is synchronous and followed by a full-snapshot save.
/// Refreshes are not cancelled: a second refresh restarts the sequence and
/// the last one to resolve wins.
pub struct Controller<B> {
    config: BriefConfig,
    store: StateStore,
    state: AppState,
    insight_client: InsightClient<B>,
    insight: DailyInsight,
    phase: Phase,
}

impl Controller<GeminiBackend> {
    /// Build against the real Gemini backend, loading persisted state.
    pub fn from_config(config: BriefConfig) -> Self {
        let client = match &config.api_key {
            Some(key) => InsightClient::new(GeminiBackend::new(key.clone())),
            None => InsightClient::unconfigured(),
        };
        Self::with_client(config, client)
    }
}

impl<B: GenerativeBackend> Controller<B> {
    pub fn with_client(config: BriefConfig, insight_client: InsightClient<B>) -> Self {
        let store = StateStore::new(&config.state_path);
        let state = store.load();
        Self {
            config,
            store,
            state,
            insight_client,
            insight: DailyInsight::default(),
            phase: Phase::Idle,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn insight(&self) -> &DailyInsight {
        &self.insight
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    // -- schedules -----------------------------------------------------

    pub fn add_schedule(
        &mut self,
        title: impl Into<String>,
        time: Option<String>,
        recurrence: Recurrence,
    ) -> Uuid {
        let item = ScheduleItem::new(title, time, recurrence);
        let id = item.id;
        self.state.schedules.push(item);
        self.store.save(&self.state);
        id
    }

    /// Flip today's completion for the item. Unknown ids are ignored.
    pub fn toggle_schedule(&mut self, id: Uuid) {
        let today = Self::today();
        if let Some(item) = self.state.schedules.iter_mut().find(|s| s.id == id) {
            item.toggle(today);
            self.store.save(&self.state);
        }
    }

    pub fn remove_schedule(&mut self, id: Uuid) {
        self.state.schedules.retain(|s| s.id != id);
        self.store.save(&self.state);
    }

    // -- memos ---------------------------------------------------------

    /// Prepend a memo: the collection stays newest-first.
    pub fn add_memo(&mut self, content: impl Into<String>) -> Uuid {
        let memo = Memo::new(content);
        let id = memo.id;
        self.state.memos.insert(0, memo);
        self.store.save(&self.state);
        id
    }

    pub fn remove_memo(&mut self, id: Uuid) {
        self.state.memos.retain(|m| m.id != id);
        self.store.save(&self.state);
    }

    // -- goals ---------------------------------------------------------

    pub fn add_goal(
        &mut self,
        title: impl Into<String>,
        target: f64,
        unit: impl Into<String>,
    ) -> Uuid {
        let goal = Goal::new(title, target, unit);
        let id = goal.id;
        self.state.goals.push(goal);
        self.store.save(&self.state);
        id
    }

    /// Accumulate `value` into today's entry for the goal. Unknown ids are
    /// ignored.
    pub fn update_goal(&mut self, id: Uuid, value: f64) {
        let today = Self::today();
        if let Some(goal) = self.state.goals.iter_mut().find(|g| g.id == id) {
            goal.record(today, value);
            self.store.save(&self.state);
        }
    }

    pub fn remove_goal(&mut self, id: Uuid) {
        self.state.goals.retain(|g| g.id != id);
        self.store.save(&self.state);
    }

    // -- refresh -------------------------------------------------------

    /// Fetch today's insight bundle, replacing the previous one wholesale.
    ///
    /// Pinned coordinates from config win over the geolocator; otherwise the
    /// geolocator gets a bounded wait and a timeout means no weather.
    pub async fn refresh(&mut self, geo: &impl Geolocator) {
        self.phase = Phase::Loading;

        let coords = match self.config.coordinates {
            Some(pinned) => Some(pinned),
            None => self.locate_bounded(geo).await,
        };

        let insight = self.insight_client.fetch(coords, Self::today()).await;

        if self.insight_client.is_configured() && insight.is_empty() {
            // Previous insight stays on screen behind the error banner
            log::warn!("Insight fetch came back empty despite configured credential");
            self.phase = Phase::Errored("Failed to fetch today's briefing".to_string());
        } else {
            self.insight = insight;
            self.phase = Phase::Ready;
        }
    }

    async fn locate_bounded(&self, geo: &impl Geolocator) -> Option<Coordinates> {
        let wait = Duration::from_secs(self.config.geolocation_timeout_secs);
        match tokio::time::timeout(wait, geo.locate()).await {
            Ok(coords) => coords,
            Err(_) => {
                log::info!("Geolocation timed out after {:?}", wait);
                None
            }
        }
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}
