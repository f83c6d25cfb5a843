use std::sync::Arc;

use teloxide::prelude::*;

use innbot_core::domain::{ChatId, CommandRequest};

use crate::router::AppState;

pub async fn handle_text(msg: Message, text: String, state: Arc<AppState>) -> ResponseResult<()> {
    let req = CommandRequest::new(ChatId(msg.chat.id.0), text);
    state.dispatcher.handle(req).await;
    Ok(())
}
