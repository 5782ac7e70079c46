//! Live reload and scroll-spy transport.
//!
//! # Module Structure
//!
//! - `message` - JSON message protocol for the preview WebSocket
//! - `active` - process-wide registry of per-viewer active sections
//! - `server` - WebSocket accept loop feeding clients to the WsActor

pub mod active;
pub mod message;
pub mod server;
