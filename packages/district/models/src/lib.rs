#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District record types, category taxonomy, and the field table.
//!
//! A district's statistics travel in one of two shapes: the flat
//! [`StorageFilterData`] row delivered by the data source, and the nested
//! [`DisplayFilterData`] grouped by [`Category`] that filtering and rendering
//! consume. [`FilterData`] tags which shape a record currently carries, so
//! consumers never have to probe fields to find out.

mod fields;
mod lenient;

pub use fields::{
    CommerceStats, DisplayFilterData, EducationStats, FIELDS, FieldMapping, GeneralStats,
    MedicineStats, SafetyStats, SocialStats, StorageFilterData, TransportStats, UtilitiesStats,
    fields_for, is_storage_key,
};

use serde::{Deserialize, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Statistic groupings of a district.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    /// Price, density, green space, area, population
    General,
    /// Schools, kindergartens, universities
    Education,
    /// Hospitals, clinics, pharmacies, dentists
    Medicine,
    /// Public transit, parking, bike lanes
    Transport,
    /// Parks, playgrounds, culture and community facilities
    Social,
    /// Crime level and emergency services
    Safety,
    /// Shops, restaurants, banks, gyms
    Commerce,
    /// Utility availability, quality and cost
    Utilities,
}

impl Category {
    /// Returns whether filter criteria can target this category.
    ///
    /// [`Category::General`] is informational only.
    #[must_use]
    pub const fn is_filterable(self) -> bool {
        !matches!(self, Self::General)
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::General,
            Self::Education,
            Self::Medicine,
            Self::Transport,
            Self::Social,
            Self::Safety,
            Self::Commerce,
            Self::Utilities,
        ]
    }
}

/// How often public transport serves a district.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransportFrequency {
    /// Frequent service
    High,
    /// Regular service
    Medium,
    /// Infrequent service
    Low,
}

/// How densely shops and services are packed in a district.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CommerceDensity {
    /// Dense commercial area
    High,
    /// Mixed use
    Medium,
    /// Mostly residential
    Low,
}

/// Errors raised while classifying raw filter data into a shape.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// `filterData` was not a JSON object.
    #[error("filterData must be an object, got {kind}")]
    NotAnObject {
        /// JSON type that was found instead.
        kind: &'static str,
    },

    /// The object mixes nested category keys with flat storage keys.
    #[error("filterData mixes display key '{display}' with storage key '{storage}'")]
    Mixed {
        /// A category key holding an object.
        display: String,
        /// A flat storage key from the field table.
        storage: String,
    },

    /// A field held a value of the wrong type.
    #[error("Invalid filterData: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// A district's statistics in whichever shape they currently have.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum FilterData {
    /// Flat snake_case row.
    Storage(StorageFilterData),
    /// Nested by category.
    Display(DisplayFilterData),
}

impl FilterData {
    /// Returns `true` if the data is already nested by category.
    #[must_use]
    pub const fn is_display(&self) -> bool {
        matches!(self, Self::Display(_))
    }
}

impl TryFrom<serde_json::Value> for FilterData {
    type Error = ShapeError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let serde_json::Value::Object(map) = &value else {
            return Err(ShapeError::NotAnObject {
                kind: json_kind(&value),
            });
        };

        let display = map
            .iter()
            .find(|(key, nested)| nested.is_object() && key.parse::<Category>().is_ok())
            .map(|(key, _)| key.clone());
        let storage = map.keys().find(|key| is_storage_key(key)).cloned();

        match (display, storage) {
            (Some(display), Some(storage)) => Err(ShapeError::Mixed { display, storage }),
            (Some(_), None) => Ok(Self::Display(serde_json::from_value(value)?)),
            (None, _) => Ok(Self::Storage(serde_json::from_value(value)?)),
        }
    }
}

impl Serialize for FilterData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Storage(flat) => flat.serialize(serializer),
            Self::Display(nested) => nested.serialize(serializer),
        }
    }
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// A district record as exchanged with the data source and the view layer.
///
/// Everything except `filterData` is kept verbatim in [`District::attributes`]
/// so that no top-level field is lost when the statistics change shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct District {
    /// District statistics, if the source provided any.
    #[serde(
        rename = "filterData",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub filter_data: Option<FilterData>,
    /// All other top-level fields (`id`, `name`, `city`, ...).
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl District {
    /// Returns the `id` attribute, if present.
    #[must_use]
    pub fn id(&self) -> Option<&serde_json::Value> {
        self.attributes.get("id")
    }

    /// Returns the `name` attribute, if it is a string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").and_then(serde_json::Value::as_str)
    }

    /// Returns a short label for log messages: the name, else the id, else
    /// `"<unnamed>"`.
    #[must_use]
    pub fn label(&self) -> String {
        match (self.name(), self.id()) {
            (Some(name), _) => name.to_string(),
            (None, Some(serde_json::Value::String(id))) => id.clone(),
            (None, Some(id)) => id.to_string(),
            (None, None) => "<unnamed>".to_string(),
        }
    }
}
