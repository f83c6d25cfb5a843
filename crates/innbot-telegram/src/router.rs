use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, error_handlers::LoggingErrorHandler, prelude::*};
use tokio_util::sync::CancellationToken;

use innbot_core::{
    cache::LastActionCache, config::Config, dispatcher::CommandDispatcher, journal::Journal,
    lookup::PartyLookup, messaging::port::MessagingPort,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<CommandDispatcher>,
}

/// Long-poll Telegram until `shutdown` is cancelled.
///
/// Cancelling drops the polling loop; handlers still in flight are not
/// awaited.
pub async fn run_polling(
    cfg: Arc<Config>,
    lookup: Arc<dyn PartyLookup>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => tracing::info!("bot started: @{}", me.username()),
        Err(e) => tracing::warn!(error = %e, "getMe failed; continuing"),
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(
        bot.clone(),
        cfg.telegram_message_limit,
    ));
    let state = Arc::new(AppState {
        dispatcher: Arc::new(CommandDispatcher::new(
            lookup,
            messenger,
            Arc::new(LastActionCache::new()),
            Journal::new(cfg.journal_enabled),
            cfg.links.clone(),
        )),
    });

    // Only text messages reach the endpoint; everything else falls through to
    // the silent default handler.
    let handler = Update::filter_message()
        .filter_map(|msg: Message| msg.text().map(str::to_owned))
        .endpoint(handlers::handle_text);

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        // No per-chat ordering: every update runs as its own task.
        .distribution_function(|_| None::<std::convert::Infallible>)
        .default_handler(|_| async {})
        .error_handler(LoggingErrorHandler::with_custom_text("bot error"))
        .build();

    tokio::select! {
        _ = dispatcher.dispatch() => {}
        _ = shutdown.cancelled() => {
            tracing::info!("shutdown requested; stopping update polling");
        }
    }

    Ok(())
}
