use axum::{
    extract::{Extension, Path, ws::{Message, WebSocket, WebSocketUpgrade}},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use crate::dto::update_dto::FormUpdate;
use crate::error::AppResult;
use crate::services::session_store::SessionStore;

/// Sends one change event to whoever is watching. No subscribers is fine.
pub fn publish(tx: &broadcast::Sender<String>, update: &FormUpdate) {
    match serde_json::to_string(update) {
        Ok(json) => {
            let _ = tx.send(json);
        }
        Err(e) => {
            error!("Failed to serialize form update: {}", e);
        }
    }
}

/* Web Socket stuff */
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Extension(store): Extension<SessionStore>,
    Path(session_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let rx = store.subscribe(&session_id).await?;
    info!("Subscribing to session {}.", session_id);
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, rx)))
}

async fn handle_socket(socket: WebSocket, mut rx: broadcast::Receiver<String>) {
    let (mut sender, mut receiver) = socket.split();

    // Task to forward form updates to this client
    let send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(msg) => {
                    if sender.send(Message::Text(msg.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Subscriber fell behind, skipped {} updates.", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // The feed is one-way; just wait for the client to go away.
    while let Some(Ok(msg)) = receiver.next().await {
        if let Message::Close(_) = msg {
            break;
        }
    }

    // Clean up
    send_task.abort();
}
