//! Core logic for the INN lookup Telegram bot.
//!
//! This crate is framework-agnostic. Telegram and the DaData suggestions API
//! live behind ports (traits) implemented in adapter crates.

pub mod cache;
pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod errors;
pub mod journal;
pub mod logging;
pub mod lookup;
pub mod messaging;

pub use errors::{Error, Result};
