//! Coarse labels derived from raw numeric statistics.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Crime level bucket of a district.
///
/// Derived from the raw 0-10 `crime_level`: `low` up to 3, `medium` up to 6,
/// `high` above 6.
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
pub enum CrimeBucket {
    /// Crime level 0-3
    Low,
    /// Crime level above 3, up to 6
    Medium,
    /// Crime level above 6
    High,
}

impl CrimeBucket {
    /// Crime level assumed for districts that do not report one.
    pub const DEFAULT_LEVEL: f64 = 5.0;

    /// Buckets a raw crime level, treating a missing level as
    /// [`Self::DEFAULT_LEVEL`].
    #[must_use]
    pub fn from_level(level: Option<f64>) -> Self {
        let level = level.unwrap_or(Self::DEFAULT_LEVEL);

        if level <= 3.0 {
            Self::Low
        } else if level <= 6.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Utilities quality bucket of a district.
///
/// Derived from the raw 0-10 `utilities_quality_rating`: `poor` below 5,
/// `average` from 5 up to (not including) 8, `good` from 8.
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
pub enum QualityBucket {
    /// Rating below 5
    Poor,
    /// Rating 5 to below 8
    Average,
    /// Rating 8 and above
    Good,
}

impl QualityBucket {
    /// Quality rating assumed for districts that do not report one.
    pub const DEFAULT_RATING: f64 = 5.0;

    /// Buckets a raw quality rating, treating a missing rating as
    /// [`Self::DEFAULT_RATING`].
    #[must_use]
    pub fn from_rating(rating: Option<f64>) -> Self {
        let rating = rating.unwrap_or(Self::DEFAULT_RATING);

        if rating < 5.0 {
            Self::Poor
        } else if rating < 8.0 {
            Self::Average
        } else {
            Self::Good
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crime_level_boundaries() {
        assert_eq!(CrimeBucket::from_level(Some(0.0)), CrimeBucket::Low);
        assert_eq!(CrimeBucket::from_level(Some(3.0)), CrimeBucket::Low);
        assert_eq!(CrimeBucket::from_level(Some(3.5)), CrimeBucket::Medium);
        assert_eq!(CrimeBucket::from_level(Some(4.0)), CrimeBucket::Medium);
        assert_eq!(CrimeBucket::from_level(Some(6.0)), CrimeBucket::Medium);
        assert_eq!(CrimeBucket::from_level(Some(6.1)), CrimeBucket::High);
        assert_eq!(CrimeBucket::from_level(Some(10.0)), CrimeBucket::High);
    }

    #[test]
    fn missing_crime_level_is_medium() {
        assert_eq!(CrimeBucket::from_level(None), CrimeBucket::Medium);
    }

    #[test]
    fn quality_boundaries() {
        assert_eq!(QualityBucket::from_rating(Some(0.0)), QualityBucket::Poor);
        assert_eq!(QualityBucket::from_rating(Some(4.9)), QualityBucket::Poor);
        assert_eq!(QualityBucket::from_rating(Some(5.0)), QualityBucket::Average);
        assert_eq!(QualityBucket::from_rating(Some(7.9)), QualityBucket::Average);
        assert_eq!(QualityBucket::from_rating(Some(8.0)), QualityBucket::Good);
        assert_eq!(QualityBucket::from_rating(Some(10.0)), QualityBucket::Good);
    }

    #[test]
    fn missing_quality_is_average() {
        assert_eq!(QualityBucket::from_rating(None), QualityBucket::Average);
    }
}
