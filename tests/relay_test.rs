//! Realtime relay integration tests
//!
//! Drives the `/relay` WebSocket endpoint over real HTTP and checks the
//! room-scoped fan-out rules: members of a room see each other's changes,
//! senders never see their own, and rooms are isolated from one another.

#![cfg(feature = "server")]

mod common;

use std::time::Duration;

use serde_json::json;

use common::server::test_server_http;

/// Give the server a beat to process joins sent on other connections before
/// publishing; joins and publishes on different sockets are not ordered.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn test_change_reaches_other_room_members() {
    let server = test_server_http();

    let mut alice = server.get_websocket("/relay").await.into_websocket().await;
    let mut bob = server.get_websocket("/relay").await.into_websocket().await;

    alice
        .send_json(&json!({"event": "join-room", "slug": "room1234"}))
        .await;
    bob.send_json(&json!({"event": "join-room", "slug": "room1234"}))
        .await;
    settle().await;

    alice
        .send_json(&json!({
            "event": "code-change",
            "slug": "room1234",
            "new_content": "{\"from\":\"alice\"}"
        }))
        .await;

    let frame: serde_json::Value = bob.receive_json().await;
    assert_eq!(frame["event"], "code-change");
    assert_eq!(frame["content"], "{\"from\":\"alice\"}");
}

#[tokio::test]
async fn test_sender_does_not_receive_own_change() {
    let server = test_server_http();

    let mut alice = server.get_websocket("/relay").await.into_websocket().await;
    let mut bob = server.get_websocket("/relay").await.into_websocket().await;

    alice
        .send_json(&json!({"event": "join-room", "slug": "echo1234"}))
        .await;
    bob.send_json(&json!({"event": "join-room", "slug": "echo1234"}))
        .await;
    settle().await;

    alice
        .send_json(&json!({
            "event": "code-change",
            "slug": "echo1234",
            "new_content": "first"
        }))
        .await;
    // Bob sees Alice's change, proving it went through the room before Bob
    // replies.
    let frame: serde_json::Value = bob.receive_json().await;
    assert_eq!(frame["content"], "first");

    bob.send_json(&json!({
        "event": "code-change",
        "slug": "echo1234",
        "new_content": "second"
    }))
    .await;

    // The first frame Alice ever receives is Bob's, not her own echo.
    let frame: serde_json::Value = alice.receive_json().await;
    assert_eq!(frame["content"], "second");
}

#[tokio::test]
async fn test_rooms_are_isolated() {
    let server = test_server_http();

    let mut alice = server.get_websocket("/relay").await.into_websocket().await;
    let mut bob = server.get_websocket("/relay").await.into_websocket().await;
    let mut carol = server.get_websocket("/relay").await.into_websocket().await;

    alice
        .send_json(&json!({"event": "join-room", "slug": "roomA000"}))
        .await;
    bob.send_json(&json!({"event": "join-room", "slug": "roomA000"}))
        .await;
    carol
        .send_json(&json!({"event": "join-room", "slug": "roomB000"}))
        .await;
    settle().await;

    alice
        .send_json(&json!({
            "event": "code-change",
            "slug": "roomA000",
            "new_content": "for-room-a"
        }))
        .await;
    carol
        .send_json(&json!({
            "event": "code-change",
            "slug": "roomB000",
            "new_content": "for-room-b"
        }))
        .await;

    // Bob only ever sees room A traffic.
    let frame: serde_json::Value = bob.receive_json().await;
    assert_eq!(frame["content"], "for-room-a");

    // Alice, also in room A, must see neither room B's change nor her own
    // echo; the first frame she receives is Bob's sentinel.
    bob.send_json(&json!({
        "event": "code-change",
        "slug": "roomA000",
        "new_content": "sentinel"
    }))
    .await;
    let frame: serde_json::Value = alice.receive_json().await;
    assert_eq!(frame["content"], "sentinel");
}

#[tokio::test]
async fn test_connection_can_join_multiple_rooms() {
    let server = test_server_http();

    let mut watcher = server.get_websocket("/relay").await.into_websocket().await;
    let mut writer = server.get_websocket("/relay").await.into_websocket().await;

    watcher
        .send_json(&json!({"event": "join-room", "slug": "multiA00"}))
        .await;
    watcher
        .send_json(&json!({"event": "join-room", "slug": "multiB00"}))
        .await;

    writer
        .send_json(&json!({"event": "join-room", "slug": "multiB00"}))
        .await;
    settle().await;
    writer
        .send_json(&json!({
            "event": "code-change",
            "slug": "multiB00",
            "new_content": "cross-room"
        }))
        .await;

    let frame: serde_json::Value = watcher.receive_json().await;
    assert_eq!(frame["content"], "cross-room");
}

#[tokio::test]
async fn test_malformed_frame_does_not_kill_connection() {
    let server = test_server_http();

    let mut alice = server.get_websocket("/relay").await.into_websocket().await;
    let mut bob = server.get_websocket("/relay").await.into_websocket().await;

    alice
        .send_json(&json!({"event": "join-room", "slug": "tough123"}))
        .await;
    bob.send_json(&json!({"event": "join-room", "slug": "tough123"}))
        .await;
    settle().await;

    // Garbage and unknown events are dropped, not fatal.
    bob.send_text("this is not json").await;
    bob.send_json(&json!({"event": "self-destruct"})).await;

    bob.send_json(&json!({
        "event": "code-change",
        "slug": "tough123",
        "new_content": "still alive"
    }))
    .await;

    let frame: serde_json::Value = alice.receive_json().await;
    assert_eq!(frame["content"], "still alive");
}
