//! Actor Coordinator - Wires up the Watch-Mode Actor System
//!
//! # Responsibility
//!
//! The Coordinator is a **thin orchestrator** that:
//! - Creates communication channels
//! - Wires up actors
//! - Runs them concurrently
//!
//! # Architecture
//!
//! ```text
//! FsActor --> BuildActor --> WsActor
//!    |             |            |
//!    +-------------+------------+
//!          Linear Message Flow
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::build::BuildActor;
use super::fs::FsActor;
use super::messages::{BuildMsg, WsMsg};
use super::ws::WsActor;
use crate::config::SiteConfig;

/// Channel buffer size
const CHANNEL_BUFFER: usize = 32;

/// Coordinator - wires up and runs the actor system
pub struct Coordinator {
    config: Arc<SiteConfig>,
    ws_port: Option<u16>,
    /// Optional shutdown signal receiver
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    /// Create from Arc<SiteConfig>
    pub fn with_config(config: Arc<SiteConfig>) -> Self {
        Self {
            config,
            ws_port: None,
            shutdown_rx: None,
        }
    }

    /// Set WebSocket port
    pub fn with_ws_port(mut self, port: u16) -> Self {
        self.ws_port = Some(port);
        self
    }

    /// Set shutdown signal receiver
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system
    pub async fn run(mut self) -> Result<()> {
        // Create channels
        let (build_tx, build_rx) = mpsc::channel::<BuildMsg>(CHANNEL_BUFFER);
        let (ws_tx, ws_rx) = mpsc::channel::<WsMsg>(CHANNEL_BUFFER);

        // Start WebSocket server
        if let Some(port) = self.ws_port {
            match crate::reload::server::start_ws_server_with_channel(port, ws_tx.clone()) {
                Ok(actual_port) => {
                    crate::cli::serve::set_actual_ws_port(actual_port);
                }
                Err(e) => {
                    crate::log!("actor"; "websocket server failed: {}", e);
                }
            }
        }

        // Create actors
        let watch_paths = self.watch_paths();
        let fs_actor = FsActor::new(watch_paths, build_tx.clone(), self.config.clone())
            .map_err(|e| anyhow::anyhow!("watcher failed: {}", e))?;

        let build_actor = BuildActor::new(build_rx, ws_tx.clone(), self.config.clone());

        let registry = self.config.section_registry()?;
        let ws_actor = WsActor::new(ws_rx, registry, self.config.site.nav.activation_line);

        // Run actors until shutdown signal
        crate::debug!("actor"; "start");
        let shutdown_rx = self.shutdown_rx.take();
        let _ = run_actors(fs_actor, build_actor, ws_actor, build_tx, ws_tx, shutdown_rx).await;

        crate::debug!("actor"; "stopped");
        Ok(())
    }

    fn watch_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.config.build.content.clone()];

        if self.config.build.assets.exists() {
            paths.push(self.config.build.assets.clone());
        }

        // Watch the config file for full-rebuild triggers
        if self.config.config_path.exists() {
            paths.push(self.config.config_path.clone());
        }

        paths
    }
}

/// Run all actors concurrently
async fn run_actors(
    fs: FsActor,
    build: BuildActor,
    ws: WsActor,
    build_tx: mpsc::Sender<BuildMsg>,
    ws_tx: mpsc::Sender<WsMsg>,
    shutdown_rx: Option<Receiver<()>>,
) -> Result<()> {
    let fs_handle = tokio::spawn(async move { fs.run().await });
    let build_handle = tokio::spawn(async move { build.run().await });
    let ws_handle = tokio::spawn(async move { ws.run().await });

    // Wait for shutdown signal (poll-based since crossbeam channel)
    if let Some(rx) = shutdown_rx {
        loop {
            if rx.try_recv().is_ok() {
                crate::debug!("actor"; "shutdown signal received");
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
    } else {
        // No shutdown signal, just wait for any actor to complete
        tokio::select! {
            _ = fs_handle => {}
            _ = build_handle => {}
            _ = ws_handle => {}
        }
        return Ok(());
    }

    // Propagate shutdown so actors can close cleanly
    let _ = build_tx.send(BuildMsg::Shutdown).await;
    let _ = ws_tx.send(WsMsg::Shutdown).await;

    Ok(())
}
