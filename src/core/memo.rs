use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A free-form note. Immutable once created — there is no edit operation,
/// only removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memo {
    pub id: Uuid,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub updated_at: i64,
}

impl Memo {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            updated_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
