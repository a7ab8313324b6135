//! The fetch-layout-print loop.
//!
//! Two states: idle between ticks and one cycle in progress. Stage failures
//! cost at most that cycle's output; nothing short of Ctrl-C (or SIGTERM on
//! unix) stops the loop.

use std::path::PathBuf;
use std::time::Duration;

use tokio::time::interval;
use tracing::{error, info, warn};

use crate::app::{AppContext, Result};
use crate::domain::NormalizedEntry;
use crate::fetcher::FetchOutcome;
use crate::layout::{self, PageGeometry};
use crate::render::pdf;

pub struct Scheduler {
    ctx: AppContext,
}

impl Scheduler {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Run cycles on the configured interval until interrupted. The first
    /// cycle starts immediately.
    pub async fn run(&self) -> Result<()> {
        info!("Starting newsprint. Press Ctrl+C to stop.");

        let period = Duration::from_secs(self.ctx.config.interval_minutes * 60);
        let mut timer = interval(period);

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    run_cycle(&self.ctx).await;
                    info!("Next run in {} minutes...", self.ctx.config.interval_minutes);
                }
                _ = shutdown_signal() => {
                    info!("Stopped by user.");
                    return Ok(());
                }
            }
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to set up SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// One full cycle: select, fetch, normalize, layout, render, print, cleanup.
///
/// Every stage returns a typed result; this function owns the logging and
/// the decision to continue, so no failure escapes to the loop above.
pub async fn run_cycle(ctx: &AppContext) {
    let source = ctx.registry.pick();
    info!("Fetching from: {} ({})", source.url, source.name);

    let raw = match ctx.fetcher.fetch(&source.url).await {
        FetchOutcome::Parsed(entries) => entries,
        FetchOutcome::Failed(reason) => {
            warn!("Error fetching feed: {}", reason);
            Vec::new()
        }
    };

    // The banner leads the page whether or not the fetch produced entries.
    let mut entries = vec![NormalizedEntry::banner(&source.name)];
    entries.extend(ctx.normalizer.normalize(&raw));

    let geometry = PageGeometry::a4();
    let document = match layout::layout(&entries, &geometry) {
        Ok(doc) => doc,
        Err(e) => {
            error!("Layout failed: {}", e);
            return;
        }
    };

    let out_dir = ctx
        .config
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let path = match pdf::save_document(&document, &out_dir) {
        Ok(path) => {
            info!("Saved PDF: {}", path.display());
            path
        }
        Err(e) => {
            error!("Failed to save PDF: {}", e);
            return;
        }
    };

    match ctx.dispatcher.dispatch(&path, &ctx.config.printer).await {
        Ok(()) => info!(
            "Printed PDF {} to {} successfully.",
            path.display(),
            ctx.config.printer
        ),
        Err(e) => error!("Printing failed: {}", e),
    }

    // Cleanup runs regardless of the print result.
    if !ctx.config.keep_pdf {
        match std::fs::remove_file(&path) {
            Ok(()) => info!("Deleted PDF: {}", path.display()),
            Err(e) => warn!("Failed to delete PDF {}: {}", path.display(), e),
        }
    }
}
