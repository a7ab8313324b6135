//! # Newsprint
//!
//! A periodic RSS-to-printer news digest.
//!
//! ## Architecture
//!
//! Newsprint follows a one-way pipeline, driven by a scheduler:
//!
//! ```text
//! Registry → Fetcher → Normalizer → Layout → Renderer → Dispatcher
//! ```
//!
//! Each cycle picks one feed source at random, fetches and parses it, lays
//! the entries out on a single A4 page, writes the page as a PDF, and hands
//! the file to the system print spooler. The generated file is deleted after
//! printing unless configured otherwise.
//!
//! The heart of the crate is the [`layout`] engine: it takes a variable
//! number of variable-length entries and deterministically produces a page
//! that never overflows, truncating trailing content instead.
//!
//! ## Quick Start
//!
//! ```bash
//! # Print one digest and exit
//! newsprint once
//!
//! # Run the loop (default: every 7 minutes)
//! newsprint run
//!
//! # List the configured feed sources
//! newsprint sources
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires together all components: registry,
/// fetcher, normalizer, print dispatcher.
pub mod app;

/// Command-line interface using clap.
///
/// - `run` - fetch/layout/print loop until interrupted
/// - `once` - a single cycle
/// - `sources` - list configured feed sources
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/newsprint/config.toml`: feed sources, printer name,
/// cycle interval, file retention.
pub mod config;

/// Core domain models.
///
/// - [`FeedSource`](domain::FeedSource) / [`SourceRegistry`](domain::SourceRegistry)
/// - [`RawEntry`](domain::RawEntry): optional fields straight from the feed
/// - [`NormalizedEntry`](domain::NormalizedEntry): escaped, layout-ready text
pub mod domain;

/// Feed fetching and parsing.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for fetch-and-parse
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest + feed-rs
///
/// Failures cross this boundary as data, never as panics: a bad network or a
/// malformed feed yields [`FetchOutcome::Failed`](fetcher::FetchOutcome) and
/// the cycle continues with zero entries.
pub mod fetcher;

/// Entry normalization.
///
/// HTML-escapes titles and dates so feed text renders literally; summaries
/// pass through untouched so their inline emphasis markup survives.
pub mod normalizer;

/// The page-fitting layout engine (the core of the crate).
///
/// Fixed A4 geometry, deterministic word wrap against Times metrics, and
/// strict head-first truncation when content exceeds one page.
pub mod layout;

/// Print dispatch through the system spooler (`lpr`).
pub mod printer;

/// Document rendering.
///
/// A minimal single-page PDF writer over `std::io::Write`.
pub mod render;

/// The scheduler loop: interval ticker, per-cycle orchestration, graceful
/// Ctrl-C shutdown.
pub mod scheduler;
