#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District filter criteria types.
//!
//! Criteria mirror the display shape of a district: one optional
//! sub-criteria per filterable [`Category`], each holding presence flags,
//! minimum counts, a minimum rating, and in some categories an enumerated
//! [`Selection`]. A category left as `None` imposes no constraint.

mod bucket;

pub use bucket::{CrimeBucket, QualityBucket};

use std::fmt;
use std::str::FromStr;

use district_map_district_models::{Category, CommerceDensity, TransportFrequency};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Literal that selects every value of an enumerated criterion.
pub const ANY: &str = "any";

/// An enumerated criterion: either `"any"` or one required value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection<T> {
    /// No constraint.
    #[default]
    Any,
    /// The district's value must equal this one.
    Only(T),
}

impl<T> Selection<T> {
    /// Returns `true` if this selection imposes no constraint.
    #[must_use]
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

/// Error returned when a selection string is neither `"any"` nor a known
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSelectionError {
    /// The unrecognized value.
    pub value: String,
}

impl fmt::Display for ParseSelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown selection '{}'", self.value)
    }
}

impl std::error::Error for ParseSelectionError {}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(ANY) {
            return Ok(Self::Any);
        }

        s.parse().map(Self::Only).map_err(|_| ParseSelectionError {
            value: s.to_string(),
        })
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(ANY),
            Self::Only(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl<T: fmt::Display> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: FromStr> Deserialize<'de> for Selection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

fn active_flags(flags: &[Option<bool>]) -> usize {
    flags.iter().filter(|flag| **flag == Some(true)).count()
}

fn active_minimums(minimums: &[Option<u32>]) -> usize {
    minimums
        .iter()
        .filter(|min| min.is_some_and(|n| n > 0))
        .count()
}

fn active_rating(min_rating: Option<f64>) -> usize {
    usize::from(min_rating.is_some_and(|r| r > 0.0))
}

fn active_selection<T>(selection: Option<&Selection<T>>) -> usize {
    usize::from(selection.is_some_and(|s| !s.is_any()))
}

/// Education constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationCriteria {
    /// Require at least one school.
    pub schools: Option<bool>,
    /// Require at least one kindergarten.
    pub kindergartens: Option<bool>,
    /// Require at least one university.
    pub universities: Option<bool>,
    /// Minimum number of schools.
    pub min_schools: Option<u32>,
    /// Minimum number of kindergartens.
    pub min_kindergartens: Option<u32>,
    /// Minimum number of universities.
    pub min_universities: Option<u32>,
    /// Minimum education rating (0-10).
    pub min_rating: Option<f64>,
}

impl EducationCriteria {
    /// Number of constraints that can reject a district.
    #[must_use]
    pub fn active_constraints(&self) -> usize {
        active_flags(&[self.schools, self.kindergartens, self.universities])
            + active_minimums(&[
                self.min_schools,
                self.min_kindergartens,
                self.min_universities,
            ])
            + active_rating(self.min_rating)
    }
}

/// Medical care constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicineCriteria {
    /// Require at least one hospital.
    pub hospitals: Option<bool>,
    /// Require at least one clinic.
    pub clinics: Option<bool>,
    /// Require at least one pharmacy.
    pub pharmacies: Option<bool>,
    /// Require at least one dentist.
    pub dentists: Option<bool>,
    /// Minimum number of hospitals.
    pub min_hospitals: Option<u32>,
    /// Minimum number of clinics.
    pub min_clinics: Option<u32>,
    /// Minimum number of pharmacies.
    pub min_pharmacies: Option<u32>,
    /// Minimum number of dentists.
    pub min_dentists: Option<u32>,
    /// Minimum medicine rating (0-10).
    pub min_rating: Option<f64>,
}

impl MedicineCriteria {
    /// Number of constraints that can reject a district.
    #[must_use]
    pub fn active_constraints(&self) -> usize {
        active_flags(&[self.hospitals, self.clinics, self.pharmacies, self.dentists])
            + active_minimums(&[
                self.min_hospitals,
                self.min_clinics,
                self.min_pharmacies,
                self.min_dentists,
            ])
            + active_rating(self.min_rating)
    }
}

/// Transport constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransportCriteria {
    /// Require at least one bus stop.
    pub bus_stops: Option<bool>,
    /// Require at least one metro station.
    pub metro_stations: Option<bool>,
    /// Require at least one tram stop.
    pub tram_stops: Option<bool>,
    /// Require at least one train station.
    pub train_stations: Option<bool>,
    /// Require at least one parking lot.
    pub parking_lots: Option<bool>,
    /// Require some bike lane length.
    pub bike_lanes: Option<bool>,
    /// Minimum number of bus stops.
    pub min_bus_stops: Option<u32>,
    /// Minimum number of metro stations.
    pub min_metro_stations: Option<u32>,
    /// Minimum number of tram stops.
    pub min_tram_stops: Option<u32>,
    /// Minimum number of train stations.
    pub min_train_stations: Option<u32>,
    /// Minimum number of parking lots.
    pub min_parking_lots: Option<u32>,
    /// Required service frequency.
    pub frequency: Option<Selection<TransportFrequency>>,
    /// Minimum transport rating (0-10).
    pub min_rating: Option<f64>,
}

impl TransportCriteria {
    /// Number of constraints that can reject a district.
    #[must_use]
    pub fn active_constraints(&self) -> usize {
        active_flags(&[
            self.bus_stops,
            self.metro_stations,
            self.tram_stops,
            self.train_stations,
            self.parking_lots,
            self.bike_lanes,
        ]) + active_minimums(&[
            self.min_bus_stops,
            self.min_metro_stations,
            self.min_tram_stops,
            self.min_train_stations,
            self.min_parking_lots,
        ]) + active_selection(self.frequency.as_ref())
            + active_rating(self.min_rating)
    }
}

/// Social infrastructure constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialCriteria {
    /// Require at least one park.
    pub parks: Option<bool>,
    /// Require at least one playground.
    pub playgrounds: Option<bool>,
    /// Require at least one sports facility.
    pub sports_facilities: Option<bool>,
    /// Require at least one library.
    pub libraries: Option<bool>,
    /// Require at least one cultural center.
    pub cultural_centers: Option<bool>,
    /// Require at least one community center.
    pub community_centers: Option<bool>,
    /// Require at least one theater.
    pub theaters: Option<bool>,
    /// Require at least one cinema.
    pub cinemas: Option<bool>,
    /// Minimum number of parks.
    pub min_parks: Option<u32>,
    /// Minimum number of playgrounds.
    pub min_playgrounds: Option<u32>,
    /// Minimum number of sports facilities.
    pub min_sports_facilities: Option<u32>,
    /// Minimum number of libraries.
    pub min_libraries: Option<u32>,
    /// Minimum social rating (0-10).
    pub min_rating: Option<f64>,
}

impl SocialCriteria {
    /// Number of constraints that can reject a district.
    #[must_use]
    pub fn active_constraints(&self) -> usize {
        active_flags(&[
            self.parks,
            self.playgrounds,
            self.sports_facilities,
            self.libraries,
            self.cultural_centers,
            self.community_centers,
            self.theaters,
            self.cinemas,
        ]) + active_minimums(&[
            self.min_parks,
            self.min_playgrounds,
            self.min_sports_facilities,
            self.min_libraries,
        ]) + active_rating(self.min_rating)
    }
}

/// Safety constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SafetyCriteria {
    /// Required crime level bucket.
    pub crime_level: Option<Selection<CrimeBucket>>,
    /// Require at least one police station.
    pub police_stations: Option<bool>,
    /// Require at least one fire station.
    pub fire_stations: Option<bool>,
    /// Require at least one CCTV camera.
    pub cctv_cameras: Option<bool>,
    /// Minimum number of police stations.
    pub min_police_stations: Option<u32>,
    /// Minimum number of CCTV cameras.
    pub min_cctv_cameras: Option<u32>,
    /// Minimum safety rating (0-10).
    pub min_rating: Option<f64>,
}

impl SafetyCriteria {
    /// Number of constraints that can reject a district.
    #[must_use]
    pub fn active_constraints(&self) -> usize {
        active_selection(self.crime_level.as_ref())
            + active_flags(&[self.police_stations, self.fire_stations, self.cctv_cameras])
            + active_minimums(&[self.min_police_stations, self.min_cctv_cameras])
            + active_rating(self.min_rating)
    }
}

/// Commerce constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommerceCriteria {
    /// Require at least one grocery store.
    pub grocery_stores: Option<bool>,
    /// Require at least one shopping mall.
    pub shopping_malls: Option<bool>,
    /// Require at least one restaurant.
    pub restaurants: Option<bool>,
    /// Require at least one cafe.
    pub cafes: Option<bool>,
    /// Require at least one bank.
    pub banks: Option<bool>,
    /// Require at least one market.
    pub markets: Option<bool>,
    /// Require at least one gym.
    pub gyms: Option<bool>,
    /// Minimum number of grocery stores.
    pub min_grocery_stores: Option<u32>,
    /// Minimum number of shopping malls.
    pub min_shopping_malls: Option<u32>,
    /// Minimum number of restaurants.
    pub min_restaurants: Option<u32>,
    /// Minimum number of cafes.
    pub min_cafes: Option<u32>,
    /// Required commercial density.
    pub density: Option<Selection<CommerceDensity>>,
    /// Minimum commerce rating (0-10).
    pub min_rating: Option<f64>,
}

impl CommerceCriteria {
    /// Number of constraints that can reject a district.
    #[must_use]
    pub fn active_constraints(&self) -> usize {
        active_flags(&[
            self.grocery_stores,
            self.shopping_malls,
            self.restaurants,
            self.cafes,
            self.banks,
            self.markets,
            self.gyms,
        ]) + active_minimums(&[
            self.min_grocery_stores,
            self.min_shopping_malls,
            self.min_restaurants,
            self.min_cafes,
        ]) + active_selection(self.density.as_ref())
            + active_rating(self.min_rating)
    }
}

/// Utilities constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UtilitiesCriteria {
    /// Require water supply.
    pub has_water_supply: Option<bool>,
    /// Require gas supply.
    pub has_gas_supply: Option<bool>,
    /// Require electricity.
    pub has_electricity: Option<bool>,
    /// Require central heating.
    pub has_central_heating: Option<bool>,
    /// Require high-speed internet.
    pub has_high_speed_internet: Option<bool>,
    /// Lowest acceptable monthly utilities cost (inclusive).
    pub min_cost: Option<f64>,
    /// Highest acceptable monthly utilities cost (inclusive).
    pub max_cost: Option<f64>,
    /// Required quality bucket.
    pub quality: Option<Selection<QualityBucket>>,
    /// Minimum utilities quality rating (0-10).
    pub min_rating: Option<f64>,
}

impl UtilitiesCriteria {
    /// Number of constraints that can reject a district.
    ///
    /// A cost range counts once regardless of how many bounds it sets.
    #[must_use]
    pub fn active_constraints(&self) -> usize {
        active_flags(&[
            self.has_water_supply,
            self.has_gas_supply,
            self.has_electricity,
            self.has_central_heating,
            self.has_high_speed_internet,
        ]) + usize::from(self.min_cost.is_some() || self.max_cost.is_some())
            + active_selection(self.quality.as_ref())
            + active_rating(self.min_rating)
    }
}

/// User-selected filter constraints, one optional entry per filterable
/// category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Education constraints.
    pub education: Option<EducationCriteria>,
    /// Medicine constraints.
    pub medicine: Option<MedicineCriteria>,
    /// Transport constraints.
    pub transport: Option<TransportCriteria>,
    /// Social constraints.
    pub social: Option<SocialCriteria>,
    /// Safety constraints.
    pub safety: Option<SafetyCriteria>,
    /// Commerce constraints.
    pub commerce: Option<CommerceCriteria>,
    /// Utilities constraints.
    pub utilities: Option<UtilitiesCriteria>,
}

impl FilterCriteria {
    /// Returns `true` if no category is present at all.
    ///
    /// Empty criteria pass every district, including ones without
    /// statistics.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.education.is_none()
            && self.medicine.is_none()
            && self.transport.is_none()
            && self.social.is_none()
            && self.safety.is_none()
            && self.commerce.is_none()
            && self.utilities.is_none()
    }

    /// Returns the categories that have an entry, in display order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        [
            (Category::Education, self.education.is_some()),
            (Category::Medicine, self.medicine.is_some()),
            (Category::Transport, self.transport.is_some()),
            (Category::Social, self.social.is_some()),
            (Category::Safety, self.safety.is_some()),
            (Category::Commerce, self.commerce.is_some()),
            (Category::Utilities, self.utilities.is_some()),
        ]
        .into_iter()
        .filter_map(|(category, present)| present.then_some(category))
        .collect()
    }

    /// Number of constraints across all categories that can reject a
    /// district.
    ///
    /// `false` flags, zero minimums and `"any"` selections do not count.
    #[must_use]
    pub fn active_constraint_count(&self) -> usize {
        self.education
            .as_ref()
            .map_or(0, EducationCriteria::active_constraints)
            + self
                .medicine
                .as_ref()
                .map_or(0, MedicineCriteria::active_constraints)
            + self
                .transport
                .as_ref()
                .map_or(0, TransportCriteria::active_constraints)
            + self
                .social
                .as_ref()
                .map_or(0, SocialCriteria::active_constraints)
            + self
                .safety
                .as_ref()
                .map_or(0, SafetyCriteria::active_constraints)
            + self
                .commerce
                .as_ref()
                .map_or(0, CommerceCriteria::active_constraints)
            + self
                .utilities
                .as_ref()
                .map_or(0, UtilitiesCriteria::active_constraints)
    }
}

/// A named, reusable set of criteria, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaPreset {
    /// Unique preset identifier (e.g., `"family"`).
    pub name: String,
    /// One-line human-readable summary.
    pub description: String,
    /// The criteria this preset applies.
    #[serde(default)]
    pub criteria: FilterCriteria,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_is_empty_criteria() {
        let criteria: FilterCriteria = serde_json::from_value(json!({})).unwrap();
        assert!(criteria.is_empty());
        assert_eq!(criteria.active_constraint_count(), 0);
        assert!(criteria.categories().is_empty());
    }

    #[test]
    fn empty_category_is_not_empty_criteria() {
        let criteria: FilterCriteria =
            serde_json::from_value(json!({ "education": {} })).unwrap();
        assert!(!criteria.is_empty());
        assert_eq!(criteria.active_constraint_count(), 0);
        assert_eq!(criteria.categories(), vec![Category::Education]);
    }

    #[test]
    fn parses_camel_case_fields() {
        let criteria: FilterCriteria = serde_json::from_value(json!({
            "education": { "schools": true, "minSchools": 3, "minRating": 7 },
            "transport": { "frequency": "high", "busStops": true },
            "safety": { "crimeLevel": "low" },
            "commerce": { "density": "any" },
            "utilities": { "hasWaterSupply": true, "minCost": 50, "maxCost": 150, "quality": "good" }
        }))
        .unwrap();

        let education = criteria.education.as_ref().unwrap();
        assert_eq!(education.schools, Some(true));
        assert_eq!(education.min_schools, Some(3));
        assert_eq!(education.min_rating, Some(7.0));

        let transport = criteria.transport.as_ref().unwrap();
        assert_eq!(
            transport.frequency,
            Some(Selection::Only(TransportFrequency::High))
        );

        assert_eq!(
            criteria.safety.as_ref().unwrap().crime_level,
            Some(Selection::Only(CrimeBucket::Low))
        );
        assert_eq!(
            criteria.commerce.as_ref().unwrap().density,
            Some(Selection::Any)
        );

        let utilities = criteria.utilities.as_ref().unwrap();
        assert_eq!(utilities.quality, Some(Selection::Only(QualityBucket::Good)));

        // schools + minSchools + minRating, frequency + busStops, crimeLevel,
        // hasWaterSupply + cost range + quality
        assert_eq!(criteria.active_constraint_count(), 9);
    }

    #[test]
    fn inactive_values_do_not_count() {
        let criteria: FilterCriteria = serde_json::from_value(json!({
            "education": { "schools": false, "minSchools": 0, "minRating": 0 },
            "safety": { "crimeLevel": "any" }
        }))
        .unwrap();
        assert_eq!(criteria.active_constraint_count(), 0);
    }

    #[test]
    fn rejects_unknown_selection() {
        let err = serde_json::from_value::<FilterCriteria>(json!({
            "transport": { "frequency": "hourly" }
        }))
        .unwrap_err();
        assert!(
            err.to_string().contains("unknown selection 'hourly'"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn selection_parses_any_case_insensitively() {
        assert_eq!(
            "ANY".parse::<Selection<CrimeBucket>>().unwrap(),
            Selection::Any
        );
        assert_eq!(
            "medium".parse::<Selection<CrimeBucket>>().unwrap(),
            Selection::Only(CrimeBucket::Medium)
        );
    }

    #[test]
    fn selection_serializes_as_string() {
        assert_eq!(
            serde_json::to_value(Selection::Only(QualityBucket::Poor)).unwrap(),
            json!("poor")
        );
        assert_eq!(
            serde_json::to_value(Selection::<QualityBucket>::Any).unwrap(),
            json!("any")
        );
    }

    #[test]
    fn parses_toml_criteria() {
        let criteria: FilterCriteria = toml::from_str(
            r#"
            [safety]
            crimeLevel = "low"
            minRating = 6.5

            [social]
            parks = true
            minPlaygrounds = 2
            "#,
        )
        .unwrap();

        assert_eq!(criteria.categories(), vec![Category::Social, Category::Safety]);
        assert_eq!(criteria.active_constraint_count(), 4);
    }
}
