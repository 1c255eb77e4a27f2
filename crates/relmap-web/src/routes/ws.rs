//! WebSocket handler for live filtered views.
//!
//! The client sends filter criteria as JSON; each message is answered with
//! the matching view. After a reload every client receives a notice followed
//! by a fresh view for the criteria it sent last.

use crate::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use relmap::prelude::FilterCriteria;
use serde::Serialize;
use tokio::sync::broadcast;

/// WebSocket upgrade handler for /ws/view.
pub async fn view_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Serialize a typed message and send it. Returns false once the client is gone.
async fn send<T: Serialize>(socket: &mut WebSocket, kind: &str, data: T) -> bool {
    let msg = serde_json::json!({
        "type": kind,
        "data": data
    });
    match serde_json::to_string(&msg) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(_) => true,
    }
}

async fn send_view(socket: &mut WebSocket, state: &AppState, criteria: &FilterCriteria) -> bool {
    let view = state.dataset().await.view(criteria);
    send(socket, "view", view).await
}

/// Handle a WebSocket connection.
async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let mut rx = state.subscribe();
    let mut criteria = FilterCriteria::new();

    // Everything is visible until the client filters.
    if !send_view(&mut socket, &state, &criteria).await {
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        if !send(&mut socket, "reloaded", event).await
                            || !send_view(&mut socket, &state, &criteria).await
                        {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<FilterCriteria>(&text) {
                            Ok(next) => {
                                criteria = next;
                                if !send_view(&mut socket, &state, &criteria).await {
                                    break;
                                }
                            }
                            Err(err) => {
                                if !send(&mut socket, "error", err.to_string()).await {
                                    break;
                                }
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }
}
