/**
 * Relay Hub
 *
 * Server-resident fan-out point for document rooms. Each room (keyed by
 * slug) owns its own `tokio::sync::broadcast` channel, so traffic in one
 * room never contends with another; the mutex guards only the room table
 * itself and is never held across a send.
 *
 * The hub holds no persistent state: its entire world is the set of live
 * subscriptions. It performs no access-control checks — the session layer
 * gates joins and emits before they reach the transport, and record
 * authority lives at the share-link service's persistence boundary. A
 * client that joins and emits anyway is not defended against here.
 *
 * Delivery semantics are fire-and-forget, at-most-once: no acknowledgment,
 * no persistence, FIFO per sender via the channel, no ordering across
 * senders.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use uuid::Uuid;

/// Default per-room channel capacity
pub const DEFAULT_ROOM_CAPACITY: usize = 256;

/// One content change as it travels through a room
#[derive(Debug, Clone)]
pub struct RoomEvent {
    /// Connection that produced the change; receivers use this to drop
    /// their own events (the sender must never hear its own echo)
    pub sender: Uuid,
    /// Full replacement content
    pub content: String,
}

impl RoomEvent {
    /// Whether this event should be forwarded to `connection`.
    ///
    /// The no-echo rule of the relay: a change fans out to every room
    /// member except the connection that sent it.
    pub fn should_forward_to(&self, connection: Uuid) -> bool {
        self.sender != connection
    }
}

/// Room table: slug -> broadcast channel
#[derive(Debug, Clone)]
pub struct RelayHub {
    rooms: Arc<Mutex<HashMap<String, broadcast::Sender<RoomEvent>>>>,
    capacity: usize,
}

impl RelayHub {
    /// Create a hub with the default room capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ROOM_CAPACITY)
    }

    /// Create a hub with an explicit per-room channel capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rooms: Arc::new(Mutex::new(HashMap::new())),
            capacity,
        }
    }

    /// Subscribe to the room for `slug`, creating the room if needed.
    ///
    /// Joining is idempotent from the hub's perspective: every call hands
    /// back an independent receiver, and a connection that already holds
    /// one for this slug simply keeps using it.
    pub fn join(&self, slug: &str) -> broadcast::Receiver<RoomEvent> {
        let mut rooms = self.rooms.lock().unwrap();
        rooms
            .entry(slug.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Publish a change into a room.
    ///
    /// Returns the number of subscriptions the event reached (including the
    /// sender's own, which filters it out on receive). Zero when the room
    /// does not exist or has no members — the event is simply dropped.
    pub fn publish(&self, slug: &str, sender: Uuid, content: String) -> usize {
        let room = {
            let rooms = self.rooms.lock().unwrap();
            rooms.get(slug).cloned()
        };
        match room {
            Some(tx) => tx.send(RoomEvent { sender, content }).unwrap_or(0),
            None => 0,
        }
    }

    /// Number of live subscriptions in a room
    pub fn member_count(&self, slug: &str) -> usize {
        let rooms = self.rooms.lock().unwrap();
        rooms.get(slug).map_or(0, |tx| tx.receiver_count())
    }

    /// Drop rooms whose every member has disconnected
    ///
    /// Returns the number of rooms removed.
    pub fn cleanup_idle_rooms(&self) -> usize {
        let mut rooms = self.rooms.lock().unwrap();
        let before = rooms.len();
        rooms.retain(|_, tx| tx.receiver_count() > 0);
        before - rooms.len()
    }

    /// Number of rooms currently tracked (idle ones included until cleanup)
    pub fn room_count(&self) -> usize {
        self.rooms.lock().unwrap().len()
    }
}

impl Default for RelayHub {
    fn default() -> Self {
        Self::new()
    }
}
