use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// How often a schedule item is meant to repeat.
///
/// This is a descriptive label only — nothing projects future occurrences
/// or clears completions at period boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Default for Recurrence {
    fn default() -> Self {
        Self::None
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: Uuid,
    pub title: String,
    /// Optional time-of-day string, e.g. "07:00". Free-form, not parsed.
    pub time: Option<String>,
    pub recurrence: Recurrence,
    /// Days the item was marked done. Unique within the item.
    pub completed_dates: Vec<NaiveDate>,
}

impl ScheduleItem {
    pub fn new(title: impl Into<String>, time: Option<String>, recurrence: Recurrence) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            time,
            recurrence,
            completed_dates: Vec::new(),
        }
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    /// Mark or unmark the item as done for `date`.
    pub fn toggle(&mut self, date: NaiveDate) {
        if let Some(pos) = self.completed_dates.iter().position(|d| *d == date) {
            self.completed_dates.remove(pos);
        } else {
            self.completed_dates.push(date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn toggle_marks_and_unmarks() {
        let mut item = ScheduleItem::new("Run", Some("07:00".into()), Recurrence::Daily);
        assert!(!item.is_completed_on(may_first()));

        item.toggle(may_first());
        assert!(item.is_completed_on(may_first()));

        item.toggle(may_first());
        assert!(!item.is_completed_on(may_first()));
        assert!(item.completed_dates.is_empty());
    }

    #[test]
    fn toggle_twice_restores_original_set() {
        let mut item = ScheduleItem::new("Stretch", None, Recurrence::None);
        let other = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
        item.toggle(other);

        item.toggle(may_first());
        item.toggle(may_first());
        assert_eq!(item.completed_dates, vec![other]);
    }

    #[test]
    fn completions_stay_unique() {
        let mut item = ScheduleItem::new("Read", None, Recurrence::Weekly);
        item.toggle(may_first());
        item.toggle(may_first());
        item.toggle(may_first());
        assert_eq!(item.completed_dates.len(), 1);
    }

    #[test]
    fn recurrence_serde_lowercase() {
        let json = serde_json::to_string(&Recurrence::Weekly).unwrap();
        assert_eq!(json, "\"weekly\"");
        let back: Recurrence = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(back, Recurrence::Monthly);
    }
}
