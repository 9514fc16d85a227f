//! Homework status bot service: configuration and the polling loop.

pub mod config;
pub mod poller;

pub use config::{Config, ConfigError};
pub use poller::{CycleOutcome, PollState, Poller};
