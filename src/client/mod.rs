//! Client-side modules
//!
//! Everything a presentation layer needs to drive a shared document: the
//! session state machine, change debouncing, local ownership tracking, and
//! the HTTP API wrapper.

pub mod api;
pub mod debounce;
pub mod ownership;
pub mod session;

pub use api::{FetchOutcome, ShareLinkApi};
pub use debounce::{ChangeEmitter, OutboundChange, DEFAULT_DEBOUNCE};
pub use ownership::OwnershipSet;
pub use session::{DocumentSession, SessionPhase};
