//! Live Reload Message Protocol
//!
//! Defines the JSON message format for WebSocket communication between the
//! development server and browser clients.
//!
//! # Message Types
//!
//! - `reload`: Trigger full page reload (server → client)
//! - `scroll`: Scroll report with per-section viewport rects (client → server)
//! - `active`: Active section changed, update nav highlight (server → client)
//! - `error`/`clear_error`: Rebuild error overlay control (server → client)
//! - `ping`/`pong`: Keep connection alive

use serde::{Deserialize, Serialize};

use crate::scrollspy::SectionId;

/// One section's viewport-relative rect inside a scroll report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRect {
    pub id: SectionId,
    pub top: f64,
    pub bottom: f64,
}

/// Message sent over the preview WebSocket (either direction).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LiveReloadMessage {
    /// Full page reload after a rebuild
    Reload {
        /// Optional reason for reload
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },

    /// Client scroll report: current offset plus every mounted section's
    /// viewport-relative rect. Sections not in the list are unmounted.
    Scroll {
        offset: f64,
        sections: Vec<SectionRect>,
    },

    /// The evaluated active section for this client changed
    Active { id: SectionId },

    /// Keep-alive ping (server → client)
    Ping {
        /// Timestamp for latency measurement
        ts: u64,
    },

    /// Keep-alive pong (client → server)
    Pong {
        /// Echo back the timestamp
        ts: u64,
    },

    /// Connection established
    Connected {
        /// Server version for compatibility check
        version: String,
    },

    /// Rebuild error (display overlay, no reload)
    Error {
        /// Source file path
        path: String,
        /// Error message
        error: String,
    },

    /// Clear error overlay (rebuild succeeded after an error)
    #[serde(rename = "clear_error")]
    ClearError,
}

impl LiveReloadMessage {
    /// Create a reload message
    pub fn reload() -> Self {
        Self::Reload { reason: None }
    }

    /// Create a reload message with reason
    pub fn reload_with_reason(reason: impl Into<String>) -> Self {
        Self::Reload {
            reason: Some(reason.into()),
        }
    }

    /// Create an active-section message
    pub fn active(id: SectionId) -> Self {
        Self::Active { id }
    }

    /// Create a connected message
    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Create an error message (for rebuild errors)
    pub fn error(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Error {
            path: path.into(),
            error: error.into(),
        }
    }

    /// Create a clear error message
    pub fn clear_error() -> Self {
        Self::ClearError
    }

    /// Create a ping message
    pub fn ping() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self::Ping { ts }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"reload"}"#.to_string())
    }

    /// Parse from JSON string
    pub fn from_json(s: &str) -> Option<Self> {
        serde_json::from_str(s).ok()
    }
}
