//! Webhook transport: an axum server receiving pushed Telegram updates.
//!
//! The handler acknowledges with `{"ok": true}` immediately and spawns the
//! actual processing; failures after the ack are reported only through
//! logs, never through the HTTP response.

use anyhow::Result;
use axum::{extract::State, routing::get, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use telebot_core::{Bot as CoreBot, TelegramMessageWrapper, ToCoreMessage};
use teloxide::prelude::Requester;
use teloxide::types::UpdateKind;
use tracing::{error, info, warn};

use crate::router::MessageRouter;

#[derive(Clone)]
pub struct WebhookState {
    pub router: Arc<MessageRouter>,
    pub sender: Arc<dyn CoreBot>,
}

#[derive(Clone, Debug, Serialize)]
struct Ack {
    ok: bool,
}

#[derive(Clone, Debug, Serialize)]
struct Health {
    status: &'static str,
}

/// Builds the webhook application: update intake plus health probe.
pub fn app(state: WebhookState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/webhook", post(receive_update))
        .with_state(state)
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "TeleBot is running",
    })
}

/// Accepts one pushed update. Always acks regardless of internal outcome.
async fn receive_update(
    State(state): State<WebhookState>,
    Json(payload): Json<serde_json::Value>,
) -> Json<Ack> {
    // teloxide's `Update` deserializer misbehaves when driven from a
    // `serde_json::Value` (it falls back to `UpdateKind::Error`); parsing
    // from the serialized string form works.
    match serde_json::from_str::<teloxide::types::Update>(&payload.to_string()) {
        Ok(update) => {
            if let UpdateKind::Message(msg) = update.kind {
                let core_msg = TelegramMessageWrapper(&msg).to_core();
                if !core_msg.content.is_empty() {
                    info!(
                        user_id = core_msg.user.id,
                        chat_id = core_msg.chat.id,
                        message_content = %core_msg.content,
                        "Received webhook message"
                    );
                    let router = state.router.clone();
                    let sender = state.sender.clone();
                    tokio::spawn(async move {
                        if let Some(reply) = router.dispatch(&core_msg).await {
                            if let Err(e) = sender.send_message(&core_msg.chat, &reply).await {
                                error!(error = %e, chat_id = core_msg.chat.id, "Failed to send reply");
                            }
                        }
                    });
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "Ignoring unparseable update payload");
        }
    }
    Json(Ack { ok: true })
}

/// Registers `<base_url>/webhook` with the Telegram platform.
pub async fn register_webhook(bot: &teloxide::Bot, base_url: &str) -> Result<()> {
    let url = url::Url::parse(&format!("{}/webhook", base_url.trim_end_matches('/')))?;
    bot.set_webhook(url.clone()).await?;
    info!(url = %url, "Webhook registered");
    Ok(())
}

/// Binds and serves the webhook application until the process exits.
pub async fn serve(bind_address: &str, port: u16, state: WebhookState) -> Result<()> {
    let address = format!("{bind_address}:{port}");
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(bind_address = %address, "Webhook server listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
