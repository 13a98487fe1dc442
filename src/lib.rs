//! Monthlify Library
//!
//! This library keeps a Spotify account's playlists curated: it collects the
//! songs liked during a month into a monthly playlist, archives the rotating
//! Discover Weekly playlist, backfills monthly playlists from the saved-tracks
//! history and bulk-deletes playlists whose names match a pattern.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Settings loaded from environment variables and `.env`
//! - `curate` - Playlist synchronisation: pagination, dedup insert, month buckets, orchestrators
//! - `error` - Tagged error type used across the crate
//! - `logging` - Diagnostic logger setup
//! - `management` - Token cache and persisted local state
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API seam and its HTTP implementation
//! - `types` - Wire types of the Spotify Web API
//! - `utils` - Small helpers
//!
//! # Example
//!
//! ```
//! use monthlify::{config, curate::Curator};
//!
//! #[tokio::main]
//! async fn main() -> monthlify::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     // Build a SpotifyClient, then a Curator...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod curate;
pub mod error;
pub mod logging;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::CurateError;

/// Result alias used throughout the crate.
///
/// Every fallible operation reports a [`CurateError`], whose variants tell the
/// retry policy whether another attempt is worthwhile.
pub type Res<T> = std::result::Result<T, CurateError>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Scanning saved tracks...");
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Added {} tracks", added);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the binary and the CLI layer use this macro; library code returns
/// errors instead.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Rate limited, retrying in {:?}", delay);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
