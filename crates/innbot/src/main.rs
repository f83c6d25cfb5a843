use std::sync::Arc;

use innbot_core::{config::Config, lookup::PartyLookup};
use innbot_dadata::DadataClient;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), innbot_core::Error> {
    innbot_core::logging::init("innbot")?;

    let cfg = Arc::new(Config::load()?);

    let lookup: Arc<dyn PartyLookup> = Arc::new(DadataClient::new(
        cfg.dadata_token.clone(),
        cfg.dadata_base_url.clone(),
    ));

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_shutdown(shutdown.clone()));
    tracing::info!("bot is running; press Ctrl+C to stop");

    innbot_telegram::router::run_polling(cfg, lookup, shutdown)
        .await
        .map_err(|e| innbot_core::Error::External(format!("telegram bot failed: {e}")))?;

    tracing::info!("bot stopped");
    Ok(())
}

/// Ctrl+C, or SIGTERM on unix.
async fn wait_for_shutdown(token: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM; Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("shutdown signal received");
    token.cancel();
}
