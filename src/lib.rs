//! Homework Status Bot Library
//!
//! A Telegram bot that relays homework review status changes.
//!
//! This crate provides the core functionality for:
//! - Loading credentials and polling settings from the environment
//! - Fetching homework statuses from the review API
//! - Turning status codes into notification text
//! - Sending notifications to a Telegram chat on a fixed schedule

pub mod config;
pub mod error;
pub mod homework;
pub mod practicum;
pub mod relay;
pub mod startup;
pub mod telegram;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::RelayError;
