//! Actor Message Definitions
//!
//! Message types for inter-actor communication.
//!
//! ```text
//! FsActor --BuildMsg--> BuildActor --WsMsg--> WsActor
//! ```

use std::path::PathBuf;

// =============================================================================
// BuildActor Messages
// =============================================================================

/// Messages to the Build Actor
#[derive(Debug)]
pub enum BuildMsg {
    /// Content changed: re-render the page
    Rebuild {
        /// Paths that triggered this rebuild (for status display)
        changed_paths: Vec<PathBuf>,
    },
    /// Asset files changed: copy them over, then reload
    AssetChange(Vec<PathBuf>),
    /// Config changed: reload folio.toml and rebuild everything
    FullRebuild,
    /// Shutdown
    Shutdown,
}

// =============================================================================
// WsActor Messages
// =============================================================================

/// Messages to the WebSocket Actor
pub enum WsMsg {
    /// Reload all connected pages
    Reload {
        reason: String,
    },
    /// Rebuild error (display overlay, no reload)
    Error { path: String, error: String },
    /// Clear error overlay (rebuild succeeded after an error)
    ClearError,
    /// Add client
    AddClient(std::net::TcpStream),
    /// Shutdown
    Shutdown,
}
