//! # imagerec
//!
//! Client library (and CLI) for a text-to-image recommendation service:
//! take user text (typed directly or extracted from an uploaded document),
//! send it to the service, and keep a per-session history of the results.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Text ─────────┐
//!               ├─ 1. Extract   decode txt / docx / pdf payload to plain text
//! Document ─────┘
//!                  2. Gate      probe /status, proceed only when Running
//!                  3. Fetch     GET /recommend_images?query=…&use_ai=…
//!                  4. Record    append the result to the session history
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use imagerec::{recommend, ClientConfig, ImageMode, QueryInput, RecommendClient, SessionHistory};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Base URL from IMAGEREC_API_URL
//!     let client = RecommendClient::new(ClientConfig::from_env()?)?;
//!     let mut history = SessionHistory::new();
//!
//!     let result = recommend(
//!         QueryInput::Text("a lighthouse at dusk".into()),
//!         ImageMode::Stock,
//!         &client,
//!         &mut history,
//!     )
//!     .await?;
//!
//!     println!("{}", result.images);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `imagerec` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! imagerec = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod history;
pub mod recommend;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{ApiStatus, ImageMode, RecommendClient};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use document::{Document, MediaType};
pub use error::RecommendError;
pub use extract::extract_text;
pub use history::{Recommendation, SessionHistory};
pub use recommend::{recommend, QueryInput};
