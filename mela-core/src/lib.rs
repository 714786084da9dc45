//! Core engine for artisan events.
//!
//! This crate decides which events a user sees and when:
//! - `craft_filter` and `visibility` narrow the catalog to what is worth showing
//! - `calendar` lays visible events out on a month grid with multi-day spans
//! - `reminders` and `notifier` manage reminder subscriptions and due notices
//! - `session` and `view` tie these together for one user and one request
//!
//! Every time-dependent function takes the reference date as an argument.

pub mod calendar;
pub mod catalog;
pub mod constants;
pub mod craft_filter;
pub mod error;
pub mod event;
pub mod mela_config;
pub mod message;
pub mod notifier;
pub mod preferences;
pub mod reminders;
pub mod session;
pub mod view;
pub mod visibility;

pub use error::{MelaError, MelaResult};
pub use event::{Event, EventPhase};
pub use message::{Message, MessageArg};
