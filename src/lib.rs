//! Slack Birthday Coupon Bot Library
//!
//! This library provides tools to:
//! - Read and update people/coupon spreadsheets (CSV)
//! - Compute which birthdays are due, with a catch-up window for missed runs
//! - Compose localized birthday messages with coupon codes
//! - Post direct messages via the Slack Web API
//! - Drive the two interactive send modes (auto and manual)

pub mod commands;
pub mod config;
pub mod dispatch;
pub mod eligibility;
pub mod error;
pub mod i18n;
pub mod slack;
pub mod store;

// Re-export common types
pub use config::{Config, BASE_LOCALE};
pub use dispatch::{Dispatcher, EMOJI_LIST};
pub use error::{Error, Result};
pub use i18n::{LocaleStrings, Translations};
pub use slack::SlackClient;
pub use store::{Coupon, Person};
