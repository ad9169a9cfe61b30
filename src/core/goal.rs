use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_UNIT: &str = "count";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalEntry {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    pub target: f64,
    pub unit: String,
    /// At most one entry per calendar date; a same-day record accumulates
    /// into the existing entry.
    pub entries: Vec<GoalEntry>,
}

impl Goal {
    pub fn new(title: impl Into<String>, target: f64, unit: impl Into<String>) -> Self {
        let unit = unit.into();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            target,
            unit: if unit.is_empty() { DEFAULT_UNIT.to_string() } else { unit },
            entries: Vec::new(),
        }
    }

    /// Add `value` to the entry for `date`, creating the entry if needed.
    pub fn record(&mut self, date: NaiveDate, value: f64) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.date == date) {
            entry.value += value;
        } else {
            self.entries.push(GoalEntry { date, value });
        }
    }

    pub fn entry_on(&self, date: NaiveDate) -> Option<&GoalEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    /// Sum of all recorded values.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }

    /// Percent of target reached, capped at 100.
    pub fn percent(&self) -> u32 {
        if self.target <= 0.0 {
            return 0;
        }
        let pct = (self.total() / self.target * 100.0).round();
        (pct as u32).min(100)
    }
}
