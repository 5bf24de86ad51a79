/**
 * Relay Wire Protocol
 *
 * This module defines the event frames exchanged over the relay WebSocket.
 * Frames are JSON text messages tagged by an `event` field, mirroring the
 * named events of the transport contract:
 *
 * - `join-room` (client -> server): subscribe to updates for one slug
 * - `code-change` (client -> server): publish new content to a room
 * - `code-change` (server -> client): a peer's content, scoped to the
 *   recipient's room
 *
 * The relay is fire-and-forget: there are no acknowledgments and no
 * persistence at this layer.
 */

use serde::{Deserialize, Serialize};

/// Frames sent from a client to the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientFrame {
    /// Subscribe this connection to the room for `slug`. Idempotent; a
    /// reconnecting client re-joins with no duplicated effects.
    JoinRoom {
        /// Room key (document slug)
        slug: String,
    },
    /// Publish new document content to every *other* member of the room
    CodeChange {
        /// Room key (document slug)
        slug: String,
        /// Full replacement content
        new_content: String,
    },
}

/// Frames sent from the relay to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ServerFrame {
    /// A peer changed the document in a room this connection has joined
    CodeChange {
        /// Full replacement content
        content: String,
    },
}
