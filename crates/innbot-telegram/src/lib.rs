//! Telegram adapter (teloxide).
//!
//! This crate implements the `innbot-core` MessagingPort over the Telegram
//! Bot API and feeds inbound text messages to the command dispatcher.

use async_trait::async_trait;

use teloxide::prelude::*;

pub mod handlers;
pub mod router;

use innbot_core::{
    domain::ChatId,
    errors::Error,
    messaging::{
        port::MessagingPort,
        types::{split_text_chunks, MessagingCapabilities},
    },
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
    max_message_len: usize,
}

impl TelegramMessenger {
    pub fn new(bot: Bot, max_message_len: usize) -> Self {
        Self {
            bot,
            max_message_len,
        }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::Transport(format!("telegram error: {e}"))
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            max_message_len: self.max_message_len,
        }
    }

    /// Plain text, no parse mode. Replies over the limit go out as several
    /// messages split at line breaks; no retries.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
        for chunk in split_text_chunks(text, self.capabilities().max_message_len) {
            self.bot
                .send_message(Self::tg_chat(chat_id), chunk)
                .await
                .map_err(Self::map_err)?;
        }
        Ok(())
    }
}
