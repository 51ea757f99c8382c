use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Result of one upstream fetch, as handed to every reporter in the chain.
///
/// Reporters treat this as read-only and make no assumptions about the
/// payload beyond it being serializable; `extra` carries arbitrarily nested
/// data the fetcher chose to attach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResult {
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    pub days: Vec<DayRecord>,
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub worked_minutes: i64,
    pub note: Option<String>,
}

impl FetchResult {
    pub fn total_minutes(&self) -> i64 {
        self.days.iter().map(|d| d.worked_minutes).sum()
    }
}
