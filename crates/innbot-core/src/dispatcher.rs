//! Command dispatcher: one inbound text in, replies out.

use std::sync::Arc;

use crate::{
    cache::LastActionCache,
    commands::{
        error_text, hello_text, render_outcomes, Command, GREETING, HELP, INN_USAGE,
        LOOKUP_FAILED, NOT_A_COMMAND, NO_PREVIOUS_ACTION, UNKNOWN_COMMAND,
    },
    config::Links,
    domain::{ChatId, CommandRequest},
    journal::Journal,
    lookup::{by_display_name, PartyLookup},
    messaging::port::MessagingPort,
    Result,
};

pub struct CommandDispatcher {
    lookup: Arc<dyn PartyLookup>,
    messenger: Arc<dyn MessagingPort>,
    cache: Arc<LastActionCache>,
    journal: Journal,
    links: Links,
}

impl CommandDispatcher {
    pub fn new(
        lookup: Arc<dyn PartyLookup>,
        messenger: Arc<dyn MessagingPort>,
        cache: Arc<LastActionCache>,
        journal: Journal,
        links: Links,
    ) -> Self {
        Self {
            lookup,
            messenger,
            cache,
            journal,
            links,
        }
    }

    pub fn cache(&self) -> &Arc<LastActionCache> {
        &self.cache
    }

    /// Handle one inbound message.
    ///
    /// Any failure is turned into an error reply to the same chat; nothing
    /// propagates to the caller, so one bad message never stops the loop.
    pub async fn handle(&self, req: CommandRequest) {
        let chat_id = req.chat_id;
        let text = req.text.trim();
        self.journal.received(chat_id, text);

        let Err(e) = self.execute(chat_id, Command::parse(text)).await else {
            return;
        };

        tracing::warn!(chat_id = chat_id.0, error = %e, "command failed");
        if let Err(e) = self.reply(chat_id, &error_text(&e.to_string())).await {
            tracing::error!(chat_id = chat_id.0, error = %e, "failed to deliver error reply");
        }
    }

    async fn execute(&self, chat_id: ChatId, cmd: Command) -> Result<()> {
        match cmd {
            Command::Start => self.reply(chat_id, GREETING).await,
            Command::Help => self.reply(chat_id, HELP).await,
            Command::Hello => self.reply(chat_id, &hello_text(&self.links)).await,
            Command::Inn(ids) if ids.is_empty() => self.reply(chat_id, INN_USAGE).await,
            Command::Inn(ids) => self.lookup_batch(chat_id, &ids).await,
            Command::Last => match self.cache.get(chat_id).await {
                Some(last) => self.reply(chat_id, &last).await,
                None => self.reply(chat_id, NO_PREVIOUS_ACTION).await,
            },
            Command::Unknown => self.reply(chat_id, UNKNOWN_COMMAND).await,
            Command::NotACommand => self.reply(chat_id, NOT_A_COMMAND).await,
        }
    }

    /// Look the ids up one after another. A failed lookup is reported right
    /// away and left out of the aggregate; the rest of the batch continues.
    async fn lookup_batch(&self, chat_id: ChatId, ids: &[String]) -> Result<()> {
        let mut outcomes = Vec::with_capacity(ids.len());
        for inn in ids {
            match self.lookup.find_party(inn).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::warn!(chat_id = chat_id.0, inn = %inn, error = %e, "lookup failed");
                    self.reply(chat_id, LOOKUP_FAILED).await?;
                }
            }
        }

        // Every id failed: each one was already reported.
        if outcomes.is_empty() {
            return Ok(());
        }

        outcomes.sort_by(by_display_name);
        self.reply(chat_id, &render_outcomes(&outcomes)).await
    }

    /// Journal, deliver, then remember as the chat's last action.
    async fn reply(&self, chat_id: ChatId, text: &str) -> Result<()> {
        self.journal.sent(chat_id, text);
        self.messenger.send_text(chat_id, text).await?;
        self.cache.put(chat_id, text).await;
        Ok(())
    }
}
