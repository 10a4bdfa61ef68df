//! Status relay module.
//!
//! Polls the review API on a fixed interval and forwards
//! status changes to the chat.

mod runner;
mod state;

pub use runner::{CycleReport, RelayMessage, StatusRelay};
pub use state::RelayState;
