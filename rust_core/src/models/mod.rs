// Shared models for the homework status bot
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::Value;
use std::fmt;

// ============================================================================
// Cursor
// ============================================================================

/// Unix timestamp (seconds) up to which statuses have been fetched.
///
/// Sent as `from_date` and advanced from the response's `current_date`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(i64);

impl Cursor {
    pub const EPOCH: Cursor = Cursor(0);

    pub fn new(timestamp: i64) -> Self {
        Self(timestamp)
    }

    pub fn timestamp(&self) -> i64 {
        self.0
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.0, 0).single()
    }
}

/// Raw timestamp, followed by the UTC time when it is representable
impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_datetime() {
            Some(dt) => write!(f, "{} ({})", self.0, dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => write!(f, "{}", self.0),
        }
    }
}

// ============================================================================
// Homework status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Look up a raw API status code; `None` for anything outside the known set
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }

    /// Human-readable verdict sent to the chat
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

// ============================================================================
// Submission records
// ============================================================================

/// One entry of the `homeworks` list, kept as raw JSON.
///
/// Equality is structural over the whole record, so any field change
/// (not only `status`) counts as a change.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRecord(Value);

impl SubmissionRecord {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// `homework_name` when present and a string
    pub fn name(&self) -> Option<&str> {
        self.0.get("homework_name").and_then(Value::as_str)
    }

    /// `status` when present and a string
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }
}

/// Validated answer of the status endpoint for one cycle
#[derive(Debug, Clone, PartialEq)]
pub struct StatusResponse {
    pub homeworks: Vec<SubmissionRecord>,
    pub next_cursor: Cursor,
}

impl StatusResponse {
    /// Most recent submission; the API lists newest first
    pub fn latest(&self) -> Option<&SubmissionRecord> {
        self.homeworks.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_lookup_is_exact() {
        assert_eq!(HomeworkStatus::from_code("approved"), Some(HomeworkStatus::Approved));
        assert_eq!(HomeworkStatus::from_code("reviewing"), Some(HomeworkStatus::Reviewing));
        assert_eq!(HomeworkStatus::from_code("rejected"), Some(HomeworkStatus::Rejected));
        assert_eq!(HomeworkStatus::from_code("Approved"), None);
        assert_eq!(HomeworkStatus::from_code(""), None);
    }

    #[test]
    fn test_record_equality_is_structural() {
        let a = SubmissionRecord::new(json!({"homework_name": "A", "status": "reviewing", "id": 1}));
        let b = SubmissionRecord::new(json!({"id": 1, "status": "reviewing", "homework_name": "A"}));
        let c = SubmissionRecord::new(json!({"homework_name": "A", "status": "reviewing", "id": 2}));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_record_accessors() {
        let record = SubmissionRecord::new(json!({"homework_name": "hw05", "status": 3}));
        assert_eq!(record.name(), Some("hw05"));
        assert_eq!(record.status(), None);
    }

    #[test]
    fn test_cursor_ordering_and_datetime() {
        assert!(Cursor::EPOCH < Cursor::new(1));
        let dt = Cursor::new(1_700_000_000).as_datetime().unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_cursor_display_includes_utc_time() {
        assert_eq!(Cursor::EPOCH.to_string(), "0 (1970-01-01T00:00:00Z)");
        assert_eq!(
            Cursor::new(1_700_000_000).to_string(),
            "1700000000 (2023-11-14T22:13:20Z)"
        );
        assert_eq!(Cursor::new(i64::MAX).to_string(), i64::MAX.to_string());
    }
}
