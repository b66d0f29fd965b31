//! Long-polling transport: converts teloxide messages to core messages and
//! passes them to the [`MessageRouter`]. Each message is handled in a
//! spawned task so slow outbound calls never stall the update loop.

use anyhow::Result;
use std::sync::Arc;
use telebot_core::{Bot as CoreBot, TelegramBotAdapter, TelegramMessageWrapper, ToCoreMessage};
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::router::MessageRouter;

/// Starts the polling loop with the given teloxide Bot and router.
#[instrument(skip(bot, router))]
pub async fn run_polling(bot: teloxide::Bot, router: Arc<MessageRouter>) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        info!(username = ?me.user.username, "Polling as bot");
    }

    let sender: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(bot.clone()));

    teloxide::repl(
        bot,
        move |_bot: teloxide::Bot, msg: teloxide::types::Message| {
            let router = router.clone();
            let sender = sender.clone();

            async move {
                let core_msg = TelegramMessageWrapper(&msg).to_core();
                if core_msg.content.is_empty() {
                    info!(
                        user_id = core_msg.user.id,
                        chat_id = core_msg.chat.id,
                        "Ignoring non-text message"
                    );
                    return Ok(());
                }

                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    message_content = %core_msg.content,
                    "Received message"
                );

                // Handle in a spawned task so the update loop returns immediately.
                tokio::spawn(async move {
                    if let Some(reply) = router.dispatch(&core_msg).await {
                        if let Err(e) = sender.send_message(&core_msg.chat, &reply).await {
                            error!(error = %e, chat_id = core_msg.chat.id, "Failed to send reply");
                        }
                    }
                });

                Ok(())
            }
        },
    )
    .await;

    Ok(())
}
