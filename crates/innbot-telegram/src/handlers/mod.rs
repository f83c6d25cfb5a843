//! Telegram update handlers.
//!
//! Handlers only translate the teloxide message into a `CommandRequest`;
//! parsing, lookups, replies and error reporting happen in `innbot-core`.

mod text;

pub use text::handle_text;
