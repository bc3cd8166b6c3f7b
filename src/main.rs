//! Segment leaderboard scraper
//!
//! Walks a segment leaderboard in a real browser, reads the split table of every listed
//! athlete, pairs athletes with the sex, age and weight filters they appear under, and
//! writes everything as one CSV table.
//!
//! # Run protocol
//!
//! 1. Main traversal: listing pages, then one athlete page per listed athlete
//! 2. Filter traversal for each of the three filter menus
//! 3. Left join of the filter datasets onto the main dataset by athlete name
//! 4. CSV export (UTF-8 with byte-order marker)
//!
//! The run aborts without writing anything when step 1 yields no table, and on
//! SIGTERM/SIGINT. The browser is closed in every case.

mod browser;
mod config;
mod error;
mod export;
mod leaderboard;
mod model;
mod orchestrator;

#[cfg(test)]
mod test_utils;

use crate::browser::{ChromiumSession, Session};
use crate::config::ScraperConfig;
use crate::error::{Error, Result};
use crate::orchestrator::{Orchestrator, RunSettings, RunSummary};
use anyhow::anyhow;
use std::path::Path;
use std::process::ExitCode;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};

#[tokio::main]
async fn main() -> ExitCode {
    let app_config = config::load_app_config().expect("Failed to load AppConfig");
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    let scraper_config = config::load_scraper_config().expect("Failed to load ScraperConfig");
    let browser_config = config::load_browser_config().expect("Failed to load BrowserConfig");

    tracing::info!("Launching browser...");
    let session = match ChromiumSession::launch(&browser_config).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to launch browser: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = run(&session, &scraper_config).await;

    tracing::info!("Closing browser.");
    if let Err(e) = session.close().await {
        tracing::warn!("Failed to close browser cleanly: {}", e);
    }

    match result {
        Ok(summary) => {
            tracing::info!(
                "Visited {} athletes, collected {} tables, exported {} rows x {} columns.",
                summary.athletes_visited,
                summary.tables_collected,
                summary.rows,
                summary.columns
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Run aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs all four steps, racing them against termination signals.
///
/// A signal drops the in-flight step, so no output file is written.
async fn run(session: &dyn Session, config: &ScraperConfig) -> Result<RunSummary> {
    let orchestrator = Orchestrator::new(session, RunSettings::from(config));
    let output = Path::new(&config.output);

    let mut sig_term = signal(SignalKind::terminate())
        .map_err(|e| anyhow!("Failed to register SIGTERM handler: {}", e))?;
    tracing::info!("Scraping {}. Press Ctrl-C or send SIGTERM to abort.", config.url);

    tokio::select! {
        result = orchestrator.run_and_export(output) => result,
        _ = sig_term.recv() => {
            tracing::info!("Received SIGTERM. Aborting...");
            Err(Error::Interrupted)
        }
        _ = ctrl_c() => {
            tracing::info!("Received SIGINT. Aborting...");
            Err(Error::Interrupted)
        }
    }
}
