//! Review API access module.
//!
//! Fetches homework statuses from the review service and checks the
//! shape of its responses.

mod client;
mod response;

pub use client::{HomeworkApi, PracticumClient};
pub use response::check_response;
