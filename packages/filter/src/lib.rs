#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District filtering by multi-category criteria.
//!
//! [`evaluate::matches`] decides whether a single district satisfies a
//! [`FilterCriteria`](district_map_filter_models::FilterCriteria), and
//! [`evaluate::filter_districts`] applies it across a collection. Criteria
//! come from the caller, from JSON/TOML files via [`load`], or from the
//! built-in presets in [`registry`].

pub mod evaluate;
pub mod load;
pub mod registry;

pub use evaluate::{CategoryFilter, filter_districts, matches, retain_matching};

use thiserror::Error;

/// Errors that can occur while obtaining filter criteria.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Reading a criteria file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON criteria file was invalid.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML criteria file was invalid.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// No built-in preset has the requested name.
    #[error("Unknown preset '{name}' (available: {available})")]
    UnknownPreset {
        /// The requested preset name.
        name: String,
        /// Comma-separated list of registered preset names.
        available: String,
    },
}
