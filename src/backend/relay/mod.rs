//! Relay Module
//!
//! The real-time synchronization relay: per-slug rooms fanning content
//! changes out to every other member. The hub knows nothing about records
//! or permissions; it only routes.

/// Room table and broadcast fan-out
pub mod hub;

/// WebSocket endpoint
#[cfg(feature = "server")]
pub mod ws;

pub use hub::{RelayHub, RoomEvent, DEFAULT_ROOM_CAPACITY};
#[cfg(feature = "server")]
pub use ws::handle_relay_upgrade;
