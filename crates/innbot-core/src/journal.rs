//! Console journal of every inbound and outbound message.

use chrono::{DateTime, Local};
use colored::Colorize;

use crate::domain::ChatId;

const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";
const SEPARATOR_WIDTH: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Received,
    Sent,
}

impl Direction {
    pub fn tag(self) -> &'static str {
        match self {
            Direction::Received => "ПОЛУЧЕНО",
            Direction::Sent => "ОТПРАВЛЕНО",
        }
    }
}

/// `[dd-MM-yyyy HH:mm:ss] [TAG] [ChatId: N]`
pub fn format_header(direction: Direction, at: DateTime<Local>, chat_id: ChatId) -> String {
    format!(
        "[{}] [{}] [ChatId: {}]",
        at.format(TIMESTAMP_FORMAT),
        direction.tag(),
        chat_id
    )
}

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Echoes message traffic to stdout: colored header, body, separator.
///
/// Purely observational; it never fails and never affects control flow.
#[derive(Clone, Debug)]
pub struct Journal {
    enabled: bool,
}

impl Journal {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn received(&self, chat_id: ChatId, text: &str) {
        self.record(Direction::Received, chat_id, text);
    }

    pub fn sent(&self, chat_id: ChatId, text: &str) {
        self.record(Direction::Sent, chat_id, text);
    }

    pub fn record(&self, direction: Direction, chat_id: ChatId, text: &str) {
        tracing::debug!(
            direction = direction.tag(),
            chat_id = chat_id.0,
            len = text.len(),
            "message"
        );
        if !self.enabled {
            return;
        }

        let header = format_header(direction, Local::now(), chat_id);
        let header = match direction {
            Direction::Received => header.cyan(),
            Direction::Sent => header.green(),
        };
        // One print call so concurrent handlers don't interleave inside an entry.
        println!("{header}\n{text}\n{}", separator());
    }
}
