//! Folio - a static site generator for single-page portfolio sites.

#![allow(dead_code)]

mod actor;
mod cli;
mod config;
mod content;
mod core;
mod embed;
mod fetch;
mod generator;
mod logger;
mod reload;
mod render;
mod scrollspy;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, clear_clean_flag, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(SiteConfig::load(cli)?);

    match &cli.command {
        Commands::Init { .. } => cli::init::new_site(&config),
        Commands::Build { .. } => cli::build::build_site(&config),
        Commands::Serve { .. } => serve(&config),
        Commands::Check { .. } => cli::check::check_site(&config),
    }
}

// =============================================================================
// Serve Command
// =============================================================================

/// Start the dev server: bind first (requests get a loading page), build in
/// the background, then flip to serving.
fn serve(config: &SiteConfig) -> Result<()> {
    use crate::core::set_serving;

    // Bind HTTP server first so the browser can connect during the build
    let bound_server = cli::serve::bind_server()?;

    // Initial build on a background thread
    let config_arc = config::cfg();
    std::thread::spawn(move || {
        match cli::build::build_site(&config_arc) {
            Ok(()) => {
                clear_clean_flag();
                set_serving();
            }
            Err(e) => {
                // Serve whatever exists; the watcher rebuilds on the next change
                log!("build"; "initial build failed: {e:#}");
                logger::status_error("initial build failed", &format!("{e:#}"));
                set_serving();
            }
        }
    });

    bound_server.run()
}
