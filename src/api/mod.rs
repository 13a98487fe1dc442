//! # API Module
//!
//! HTTP endpoints served by the short-lived local server that runs during
//! `monthlify auth`.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the authorization code from Spotify, checks the
//!   `state` value and exchanges the code for a token.
//! - [`health`] - Reports that the server is up, with the crate version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use monthlify::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
