//! # Echo Chat
//!
//! Replies to every text frame with a fixed acknowledgement.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Text "ping"     ──► Text "Message received: ping"               │
//! │  Text ""         ──► Text "Message received: "                   │
//! │  Ping / Pong     ──► answered by the transport, no echo          │
//! │  Binary          ──► Close, session ends                         │
//! │  Close / error   ──► session ends, nothing sent                   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::{debug, info, warn};

use opsdesk_core::ECHO_PREFIX;

/// Upgrades `/ws/chat` and runs one echo session per connection.
pub async fn chat_handler(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(handle_socket)
}

/// Builds the reply for one inbound message.
pub fn echo_reply(text: &str) -> String {
    format!("{ECHO_PREFIX}{text}")
}

async fn handle_socket(mut socket: WebSocket) {
    info!("Chat session opened");

    while let Some(frame) = socket.recv().await {
        match frame {
            Ok(Message::Text(text)) => {
                let reply = echo_reply(text.as_str());
                if let Err(e) = socket.send(Message::Text(reply.into())).await {
                    warn!(?e, "Chat send failed");
                    break;
                }
            }
            Ok(Message::Binary(_)) => {
                debug!("Binary frame on chat channel, closing");
                let _ = socket.send(Message::Close(None)).await;
                break;
            }
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
            Ok(Message::Close(_)) => {
                debug!("Peer closed chat session");
                break;
            }
            Err(e) => {
                warn!(?e, "Chat receive failed");
                break;
            }
        }
    }

    info!("Chat session closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    use futures_util::{SinkExt, StreamExt};
    use tokio::net::TcpListener;
    use tokio_tungstenite::tungstenite::Message as WsMessage;

    use crate::routes::test_support::app;

    #[test]
    fn test_echo_reply() {
        assert_eq!(echo_reply("ping"), "Message received: ping");
        assert_eq!(echo_reply(""), "Message received: ");
    }

    async fn serve() -> (String, crate::routes::test_support::TestApp) {
        let app = app().await;
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = app.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (format!("ws://{addr}/ws/chat"), app)
    }

    #[tokio::test]
    async fn test_echo_session() {
        let (url, _app) = serve().await;
        let (mut ws, _) = tokio_tungstenite::connect_async(url.as_str()).await.unwrap();

        ws.send(WsMessage::text("ping")).await.unwrap();
        assert_eq!(
            ws.next().await.unwrap().unwrap(),
            WsMessage::text("Message received: ping")
        );

        ws.send(WsMessage::text("")).await.unwrap();
        assert_eq!(
            ws.next().await.unwrap().unwrap(),
            WsMessage::text("Message received: ")
        );

        ws.close(None).await.unwrap();
        while let Some(Ok(frame)) = ws.next().await {
            assert!(!frame.is_text(), "unexpected frame after close: {frame:?}");
        }
    }

    #[tokio::test]
    async fn test_binary_frame_ends_session() {
        let (url, _app) = serve().await;
        let (mut ws, _) = tokio_tungstenite::connect_async(url.as_str()).await.unwrap();

        ws.send(WsMessage::binary(vec![1u8, 2, 3])).await.unwrap();

        while let Some(Ok(frame)) = ws.next().await {
            assert!(!frame.is_text(), "unexpected frame after binary: {frame:?}");
        }
    }
}
