/**
 * Relay WebSocket Endpoint
 *
 * Bridges a WebSocket connection onto the hub. Per connection the state
 * machine is Disconnected -> Connected -> (JoinedRoom)*: a connection may
 * join any number of rooms, re-joining is a no-op, and disconnecting drops
 * every subscription implicitly.
 *
 * Inbound frames are JSON [`ClientFrame`]s; outbound frames are
 * [`ServerFrame`]s carrying peers' content changes. Events the connection
 * itself published are filtered out before forwarding, which is what keeps
 * two sessions from echoing each other's updates in a loop.
 */

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamMap;
use uuid::Uuid;

use crate::shared::event::{ClientFrame, ServerFrame};

use super::hub::RelayHub;

/// Handle `GET /relay` (WebSocket upgrade)
pub async fn handle_relay_upgrade(
    State(hub): State<RelayHub>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| handle_relay_socket(socket, hub))
}

async fn handle_relay_socket(socket: WebSocket, hub: RelayHub) {
    let connection = Uuid::new_v4();
    tracing::debug!("[Relay] connection {} opened", connection);

    let (mut sink, mut inbound) = socket.split();
    // Rooms this connection has joined, each as a stream of peer events.
    let mut rooms: StreamMap<String, BroadcastStream<super::hub::RoomEvent>> = StreamMap::new();

    loop {
        tokio::select! {
            message = inbound.next() => {
                match message {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientFrame>(&text) {
                            Ok(ClientFrame::JoinRoom { slug }) => {
                                if !rooms.contains_key(&slug) {
                                    tracing::debug!(
                                        "[Relay] {} joined room '{}'",
                                        connection,
                                        slug
                                    );
                                    rooms.insert(
                                        slug.clone(),
                                        BroadcastStream::new(hub.join(&slug)),
                                    );
                                }
                            }
                            Ok(ClientFrame::CodeChange { slug, new_content }) => {
                                hub.publish(&slug, connection, new_content);
                            }
                            Err(e) => {
                                tracing::warn!(
                                    "[Relay] {} sent an unparseable frame: {}",
                                    connection,
                                    e
                                );
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    // Pings and pongs are answered by the transport.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::debug!("[Relay] {} transport error: {}", connection, e);
                        break;
                    }
                }
            }
            Some((_slug, event)) = tokio_stream::StreamExt::next(&mut rooms), if !rooms.is_empty() => {
                match event {
                    Ok(event) if event.should_forward_to(connection) => {
                        let frame = ServerFrame::CodeChange {
                            content: event.content,
                        };
                        let Ok(text) = serde_json::to_string(&frame) else {
                            continue;
                        };
                        if sink.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    // Our own event coming back around; drop it.
                    Ok(_) => {}
                    Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                        // At-most-once delivery: a slow consumer loses
                        // events rather than stalling the room.
                        tracing::warn!(
                            "[Relay] {} lagged, skipped {} events",
                            connection,
                            skipped
                        );
                    }
                }
            }
        }
    }

    tracing::debug!("[Relay] connection {} closed", connection);
}
