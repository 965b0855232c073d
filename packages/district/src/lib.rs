#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District record loading and shape normalization.
//!
//! Records arrive from the data source with flat, snake_case statistics.
//! [`normalize::to_display_shape`] nests them by category for filtering and
//! rendering, and [`normalize::to_storage_shape`] recovers the flat row from
//! either shape.

pub mod load;
pub mod normalize;

pub use load::{ShapeCounts, load_districts, load_districts_from_path};
pub use normalize::{display_view, normalize_all, to_display_shape, to_storage_shape};

use thiserror::Error;

/// Errors that can occur while loading district records.
#[derive(Debug, Error)]
pub enum DistrictError {
    /// Reading the input failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input was not a valid JSON array of districts.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
