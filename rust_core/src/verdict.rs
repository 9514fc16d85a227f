//! Verdict extraction: turns one submission record into the chat message.

use serde_json::Value;
use tracing::debug;

use crate::error::{json_kind, ParseStatusError};
use crate::models::{HomeworkStatus, SubmissionRecord};

/// Build the notification text for a submission record.
///
/// A record without `status` is reported as [`ParseStatusError::MissingStatus`]
/// rather than treated as "no change".
pub fn parse_status(record: &SubmissionRecord) -> Result<String, ParseStatusError> {
    let raw = record.raw();
    if !raw.is_object() {
        return Err(ParseStatusError::NotAnObject {
            found: json_kind(raw),
        });
    }

    let name = record.name().ok_or(ParseStatusError::MissingHomeworkName)?;

    let code = match raw.get("status") {
        None | Some(Value::Null) => {
            debug!("Homework {:?} has no status field", name);
            return Err(ParseStatusError::MissingStatus);
        }
        Some(Value::String(code)) => code.as_str(),
        Some(other) => return Err(ParseStatusError::UnknownStatus(other.to_string())),
    };

    let status = HomeworkStatus::from_code(code)
        .ok_or_else(|| ParseStatusError::UnknownStatus(code.to_string()))?;

    Ok(format_verdict(name, status))
}

pub fn format_verdict(name: &str, status: HomeworkStatus) -> String {
    format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    )
}
