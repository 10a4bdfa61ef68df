//! Telegram notification module.
//!
//! Sends status notifications to a chat through the Bot API.

mod client;

pub use client::{Notifier, TelegramBot};
