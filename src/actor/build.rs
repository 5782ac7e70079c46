//! Build Actor
//!
//! Rebuilds the site when the FsActor reports changes and tells the
//! WsActor what to do with connected clients: reload on success, error
//! overlay on failure.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::messages::{BuildMsg, WsMsg};
use crate::config::SiteConfig;
use crate::logger::{status_error, status_success};

/// Build Actor - rebuilds the page on content changes
pub struct BuildActor {
    rx: mpsc::Receiver<BuildMsg>,
    ws_tx: mpsc::Sender<WsMsg>,
    config: Arc<SiteConfig>,
    /// Whether the previous rebuild failed (to clear the error overlay)
    failed: bool,
}

impl BuildActor {
    pub fn new(
        rx: mpsc::Receiver<BuildMsg>,
        ws_tx: mpsc::Sender<WsMsg>,
        config: Arc<SiteConfig>,
    ) -> Self {
        Self {
            rx,
            ws_tx,
            config,
            failed: false,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                BuildMsg::Rebuild { changed_paths } => {
                    self.rebuild(&changed_paths).await;
                }

                BuildMsg::AssetChange(paths) => {
                    match crate::cli::build::copy_assets(&self.config) {
                        Ok(count) => {
                            status_success(&format!(
                                "assets updated ({})",
                                crate::utils::plural::plural_count(count, "file")
                            ));
                            let _ = self
                                .ws_tx
                                .send(WsMsg::Reload {
                                    reason: "assets changed".into(),
                                })
                                .await;
                        }
                        Err(e) => {
                            status_error("asset copy failed", &format!("{e:#}"));
                        }
                    }
                    crate::debug!("build"; "asset change: {} paths", paths.len());
                }

                BuildMsg::FullRebuild => {
                    // folio.toml changed: swap the global config first
                    match crate::config::reload_config() {
                        Ok(true) => crate::log!("build"; "config reloaded"),
                        Ok(false) => {}
                        Err(e) => {
                            self.report_error("folio.toml", &format!("{e:#}")).await;
                            continue;
                        }
                    }
                    self.config = crate::config::cfg();
                    self.rebuild(&[self.config.config_path.clone()]).await;
                }

                BuildMsg::Shutdown => {
                    crate::debug!("build"; "shutting down");
                    break;
                }
            }
        }
    }

    /// Re-render the page and notify clients.
    async fn rebuild(&mut self, changed_paths: &[PathBuf]) {
        let changed = changed_paths
            .first()
            .map(|p| self.config.root_relative(p).display().to_string())
            .unwrap_or_else(|| "content".into());

        match crate::cli::build::rebuild_site(&self.config) {
            Ok(()) => {
                status_success(&format!("rebuilt: {changed}"));
                if self.failed {
                    self.failed = false;
                    let _ = self.ws_tx.send(WsMsg::ClearError).await;
                }
                let _ = self
                    .ws_tx
                    .send(WsMsg::Reload {
                        reason: format!("{changed} changed"),
                    })
                    .await;
            }
            Err(e) => {
                self.report_error(&changed, &format!("{e:#}")).await;
            }
        }
    }

    /// Show the error in the terminal and as a client overlay.
    async fn report_error(&mut self, path: &str, error: &str) {
        self.failed = true;
        status_error(&format!("rebuild failed: {path}"), error);
        let _ = self
            .ws_tx
            .send(WsMsg::Error {
                path: path.to_string(),
                error: error.to_string(),
            })
            .await;
    }
}
