//! Actor System for Watch Mode
//!
//! Message-passing concurrency for the dev server:
//!
//! ```text
//! FsActor --> BuildActor --> WsActor
//! (watch)     (rebuild)     (reload + scroll-spy)
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types for inter-actor communication
//! - `fs` - File system watcher with debouncing
//! - `build` - Site rebuild on change
//! - `ws` - WebSocket clients, reload broadcast, scroll-report handling
//! - `coordinator` - Wires up and runs actors

pub mod build;
pub mod coordinator;
pub mod fs;
pub mod messages;
pub mod ws;

pub use coordinator::Coordinator;
