//! Homework Bot Core - shared logic for the homework status bot.
//!
//! This crate provides:
//! - Status API client (`from_date` cursor, OAuth header)
//! - Telegram notifier client
//! - Payload shape validation
//! - Verdict extraction for submission records
//! - The error taxonomy used by every polling stage
//! - Logging setup (stderr + rolling file)

pub mod clients;
pub mod error;
pub mod logging;
pub mod models;
pub mod validation;
pub mod verdict;

pub use error::{
    ApiAnswerError, BotError, BotMainError, BotMessageError, ParseStatusError, RequestContext,
    ResponseShapeError,
};
pub use models::{Cursor, HomeworkStatus, StatusResponse, SubmissionRecord};
