use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::goal::Goal;
use super::memo::Memo;
use super::schedule::ScheduleItem;

/// The full persisted application state: everything the user owns.
///
/// Saved as one JSON snapshot on every mutation; loaded once at startup.
/// Unknown fields in a stored snapshot are ignored, missing collections
/// default to empty — there is no migration versioning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub schedules: Vec<ScheduleItem>,
    #[serde(default)]
    pub memos: Vec<Memo>,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl AppState {
    /// Count of schedule items completed on `date` over the total,
    /// for the day's progress strip.
    pub fn schedule_progress(&self, date: NaiveDate) -> (usize, usize) {
        let done = self
            .schedules
            .iter()
            .filter(|s| s.is_completed_on(date))
            .count();
        (done, self.schedules.len())
    }
}
