use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};

use crate::{
    core::{ConnectionId, MAX_MESSAGE_BYTES},
    services::Outbound,
    state::AppState,
};

/// WebSocket endpoint for players
///
/// # Flow
///
/// 1. Accept the upgrade
/// 2. Register an outbound queue and try to take a player slot
/// 3. Forward queued frames to the socket
/// 4. Feed inbound text frames to the hub
/// 5. Release the slot when either direction ends
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle one player connection until it closes
async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection = ConnectionId::new();
    let (mut sender, mut receiver) = socket.split();

    let mut outbound = {
        let mut hub = state.hub.lock().await;
        let outbound = hub.transport.register(connection);
        hub.on_connect(connection);
        outbound
    };

    tracing::debug!("WebSocket opened: connection={}", connection);

    // Drain the outbound queue into the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = outbound.recv().await {
            match frame {
                Outbound::Text(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Outbound::Close => {
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    });

    // Handle incoming messages from the client
    let hub = state.hub.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    if text.len() > MAX_MESSAGE_BYTES {
                        tracing::warn!(
                            "Message too large from connection={}: {} bytes",
                            connection,
                            text.len()
                        );
                        break;
                    }

                    hub.lock().await.on_message(connection, &text);
                }
                Message::Close(_) => {
                    tracing::debug!("Close message from connection={}", connection);
                    break;
                }
                Message::Ping(_) | Message::Pong(_) => {
                    // Axum answers WebSocket pings itself
                }
                Message::Binary(_) => {
                    tracing::warn!("Unexpected binary message from connection={}", connection);
                }
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => {
            tracing::debug!("Send task finished for connection={}", connection);
            recv_task.abort();
        }
        _ = &mut recv_task => {
            tracing::debug!("Receive task finished for connection={}", connection);
            send_task.abort();
        }
    }

    state.hub.lock().await.on_disconnect(connection);

    tracing::info!("WebSocket closed: connection={}", connection);
}
