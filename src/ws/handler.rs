use axum::{
    extract::{ws::{Message, WebSocket, WebSocketUpgrade}, State},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{guard::ConnectionGuard, router::outbox};
use crate::state::AppState;

/// WebSocket handler
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    debug!("New WebSocket connection attempt");
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection_id = Uuid::new_v4();
    info!("WebSocket connection established with connection_id: {}", connection_id);

    let (mut sender, mut receiver) = socket.split();

    // Frames for this connection are queued here by the relay
    let (tx, mut inbox) = outbox();
    state.relay.router().register(connection_id, tx);
    let _guard = ConnectionGuard::new(state.relay.clone(), connection_id);

    // Drain the outbox into the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(text) = inbox.recv().await {
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    });

    // Feed incoming events to the relay
    let relay = state.relay.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            match frame {
                Ok(Message::Text(text)) => relay.handle_text(&connection_id, &text),
                Ok(Message::Binary(_)) => {
                    warn!("Dropping binary frame from {}", connection_id);
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    debug!("WebSocket error on {}: {}", connection_id, e);
                    break;
                }
            }
        }
    });

    // Wait for either task to finish (and finish the other)
    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };
    info!("WebSocket connection {} terminated", connection_id);
}
