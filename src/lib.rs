//! # Xenoglot-RS: Language Weirdness Analysis Engine
//!
//! A Rust implementation of typological weirdness scoring over WALS-style
//! feature tables. For every categorical feature the engine estimates a
//! discrete value distribution and converts it into rarity scores; per
//! language, rarities are aggregated into a mean weirdness score with a
//! ranked list of the features contributing most.
//!
//! ## Pipeline
//!
//! ```text
//! raw table ──► per-feature rarity maps ──► per-language weirdness records
//!               (Rarity Estimator)          (Weirdness Aggregator)
//! ```
//!
//! Data flows one way; the rarity table is built once per run and treated
//! as immutable while languages are scored.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xenoglot_rs::{XenoglotConfig, XenoglotEngine};
//! use xenoglot_rs::io::wals;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = XenoglotConfig::default();
//!     let dataset = wals::load_dataset("language.csv", &config.dataset)?;
//!
//!     let engine = XenoglotEngine::new(config)?;
//!     let results = engine.analyze(&dataset)?;
//!
//!     println!("Scored {} languages", results.scored_count());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core analysis engine modules
pub mod core {
    //! Core analysis algorithms and data structures.

    pub mod config;
    pub mod dataset;
    pub mod errors;
    pub mod ranking;
    pub mod rarity;
    pub mod weirdness;
}

// I/O and reporting
pub mod io {
    //! Dataset ingestion and result reporting.

    pub mod reports;
    pub mod wals;
}

// Public API and engine interface
pub mod api {
    //! High-level API and engine interface.

    pub mod engine;
    pub mod results;
}

// Re-export primary types for convenience
pub use api::engine::XenoglotEngine;
pub use api::results::AnalysisResults;
pub use core::config::XenoglotConfig;
pub use core::errors::{Result, XenoglotError, XenoglotResultExt};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
