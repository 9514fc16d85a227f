//! Shape checks for the status endpoint payload.

use serde_json::Value;

use crate::error::{json_kind, ResponseShapeError};
use crate::models::{Cursor, StatusResponse, SubmissionRecord};

/// Check the payload shape and return the `homeworks` list unchanged.
///
/// Elements are not validated here; a malformed record is caught when its
/// verdict is extracted.
pub fn check_response(raw: &Value) -> Result<Vec<SubmissionRecord>, ResponseShapeError> {
    let object = match raw {
        Value::Array(_) => return Err(ResponseShapeError::ArrivedAsList),
        Value::Object(map) => map,
        other => {
            return Err(ResponseShapeError::NotAnObject {
                found: json_kind(other),
            })
        }
    };

    match object.get("homeworks") {
        None => Err(ResponseShapeError::MissingHomeworks),
        Some(Value::Array(items)) => Ok(items.iter().cloned().map(SubmissionRecord::new).collect()),
        Some(other) => Err(ResponseShapeError::HomeworksNotAList {
            found: json_kind(other),
        }),
    }
}

/// Read the cursor for the next request from `current_date`.
///
/// Any JSON number is accepted. Fractional seconds are truncated and values
/// outside the `i64` range saturate.
pub fn next_cursor(raw: &Value) -> Result<Cursor, ResponseShapeError> {
    let current_date = raw
        .get("current_date")
        .ok_or(ResponseShapeError::MissingCurrentDate)?;
    current_date
        .as_i64()
        .or_else(|| current_date.as_f64().map(|secs| secs as i64))
        .map(Cursor::new)
        .ok_or(ResponseShapeError::MissingCurrentDate)
}

/// Full validation of one payload
pub fn parse_response(raw: &Value) -> Result<StatusResponse, ResponseShapeError> {
    let homeworks = check_response(raw)?;
    let next_cursor = next_cursor(raw)?;
    Ok(StatusResponse {
        homeworks,
        next_cursor,
    })
}
