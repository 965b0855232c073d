//! Decides whether a district satisfies a set of filter criteria.
//!
//! Every constraint of every present category must hold; evaluation stops at
//! the first violation. Missing statistics never panic: a missing count or
//! rating behaves as zero, a missing enumerated value matches nothing, and a
//! missing crime level or quality rating falls back to its bucket default.

use district_map_district::display_view;
use district_map_district_models::{
    CommerceStats, District, EducationStats, MedicineStats, SafetyStats, SocialStats,
    TransportStats, UtilitiesStats,
};
use district_map_filter_models::{
    CommerceCriteria, CrimeBucket, EducationCriteria, FilterCriteria, MedicineCriteria,
    QualityBucket, SafetyCriteria, Selection, SocialCriteria, TransportCriteria,
    UtilitiesCriteria,
};

/// Constraints of one category, checked against that category's statistics.
pub trait CategoryFilter {
    /// Display-shape statistics this criteria applies to.
    type Stats;

    /// Returns `true` if `stats` violate none of the constraints.
    fn admits(&self, stats: &Self::Stats) -> bool;
}

/// Returns `true` if the district satisfies every constraint in `criteria`.
///
/// Empty criteria admit every district. A district without statistics fails
/// any criteria that names at least one category.
#[must_use]
pub fn matches(district: &District, criteria: &FilterCriteria) -> bool {
    if criteria.is_empty() {
        return true;
    }

    let Some(data) = &district.filter_data else {
        return false;
    };
    let stats = display_view(data);

    admits(criteria.education.as_ref(), &stats.education)
        && admits(criteria.medicine.as_ref(), &stats.medicine)
        && admits(criteria.transport.as_ref(), &stats.transport)
        && admits(criteria.social.as_ref(), &stats.social)
        && admits(criteria.safety.as_ref(), &stats.safety)
        && admits(criteria.commerce.as_ref(), &stats.commerce)
        && admits(criteria.utilities.as_ref(), &stats.utilities)
}

/// Returns the districts that satisfy `criteria`, in their original order.
#[must_use]
pub fn filter_districts<'a>(
    districts: &'a [District],
    criteria: &FilterCriteria,
) -> Vec<&'a District> {
    let matched: Vec<&District> = districts
        .iter()
        .filter(|district| matches(district, criteria))
        .collect();

    log::debug!(
        "{} of {} districts match {} active constraints in [{}]",
        matched.len(),
        districts.len(),
        criteria.active_constraint_count(),
        criteria
            .categories()
            .iter()
            .map(|category| category.as_ref())
            .collect::<Vec<_>>()
            .join(", "),
    );

    matched
}

/// Owned variant of [`filter_districts`] that drops non-matching districts.
#[must_use]
pub fn retain_matching(mut districts: Vec<District>, criteria: &FilterCriteria) -> Vec<District> {
    districts.retain(|district| matches(district, criteria));
    districts
}

fn admits<C: CategoryFilter>(criteria: Option<&C>, stats: &C::Stats) -> bool {
    criteria.is_none_or(|criteria| criteria.admits(stats))
}

fn has_any(required: Option<bool>, count: Option<u32>) -> bool {
    required != Some(true) || count.is_some_and(|n| n > 0)
}

fn has_length(required: Option<bool>, length: Option<f64>) -> bool {
    required != Some(true) || length.is_some_and(|n| n > 0.0)
}

fn at_least(min: Option<u32>, count: Option<u32>) -> bool {
    min.is_none_or(|min| count.unwrap_or(0) >= min)
}

fn rated_at_least(min: Option<f64>, rating: Option<f64>) -> bool {
    min.is_none_or(|min| rating.unwrap_or(0.0) >= min)
}

fn is_available(required: Option<bool>, available: Option<bool>) -> bool {
    required != Some(true) || available == Some(true)
}

fn selected<T: PartialEq>(selection: Option<&Selection<T>>, actual: Option<T>) -> bool {
    match selection {
        None | Some(Selection::Any) => true,
        Some(Selection::Only(wanted)) => actual.as_ref() == Some(wanted),
    }
}

fn within(min: Option<f64>, max: Option<f64>, value: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }

    value.is_some_and(|v| min.is_none_or(|min| v >= min) && max.is_none_or(|max| v <= max))
}

impl CategoryFilter for EducationCriteria {
    type Stats = EducationStats;

    fn admits(&self, stats: &EducationStats) -> bool {
        has_any(self.schools, stats.schools)
            && has_any(self.kindergartens, stats.kindergartens)
            && has_any(self.universities, stats.universities)
            && at_least(self.min_schools, stats.schools)
            && at_least(self.min_kindergartens, stats.kindergartens)
            && at_least(self.min_universities, stats.universities)
            && rated_at_least(self.min_rating, stats.rating)
    }
}

impl CategoryFilter for MedicineCriteria {
    type Stats = MedicineStats;

    fn admits(&self, stats: &MedicineStats) -> bool {
        has_any(self.hospitals, stats.hospitals)
            && has_any(self.clinics, stats.clinics)
            && has_any(self.pharmacies, stats.pharmacies)
            && has_any(self.dentists, stats.dentists)
            && at_least(self.min_hospitals, stats.hospitals)
            && at_least(self.min_clinics, stats.clinics)
            && at_least(self.min_pharmacies, stats.pharmacies)
            && at_least(self.min_dentists, stats.dentists)
            && rated_at_least(self.min_rating, stats.rating)
    }
}

impl CategoryFilter for TransportCriteria {
    type Stats = TransportStats;

    fn admits(&self, stats: &TransportStats) -> bool {
        has_any(self.bus_stops, stats.bus_stops)
            && has_any(self.metro_stations, stats.metro_stations)
            && has_any(self.tram_stops, stats.tram_stops)
            && has_any(self.train_stations, stats.train_stations)
            && has_any(self.parking_lots, stats.parking_lots)
            && has_length(self.bike_lanes, stats.bike_lanes)
            && at_least(self.min_bus_stops, stats.bus_stops)
            && at_least(self.min_metro_stations, stats.metro_stations)
            && at_least(self.min_tram_stops, stats.tram_stops)
            && at_least(self.min_train_stations, stats.train_stations)
            && at_least(self.min_parking_lots, stats.parking_lots)
            && selected(self.frequency.as_ref(), stats.frequency)
            && rated_at_least(self.min_rating, stats.rating)
    }
}

impl CategoryFilter for SocialCriteria {
    type Stats = SocialStats;

    fn admits(&self, stats: &SocialStats) -> bool {
        has_any(self.parks, stats.parks)
            && has_any(self.playgrounds, stats.playgrounds)
            && has_any(self.sports_facilities, stats.sports_facilities)
            && has_any(self.libraries, stats.libraries)
            && has_any(self.cultural_centers, stats.cultural_centers)
            && has_any(self.community_centers, stats.community_centers)
            && has_any(self.theaters, stats.theaters)
            && has_any(self.cinemas, stats.cinemas)
            && at_least(self.min_parks, stats.parks)
            && at_least(self.min_playgrounds, stats.playgrounds)
            && at_least(self.min_sports_facilities, stats.sports_facilities)
            && at_least(self.min_libraries, stats.libraries)
            && rated_at_least(self.min_rating, stats.rating)
    }
}

impl CategoryFilter for SafetyCriteria {
    type Stats = SafetyStats;

    fn admits(&self, stats: &SafetyStats) -> bool {
        selected(
            self.crime_level.as_ref(),
            Some(CrimeBucket::from_level(stats.crime_level)),
        ) && has_any(self.police_stations, stats.police_stations)
            && has_any(self.fire_stations, stats.fire_stations)
            && has_any(self.cctv_cameras, stats.cctv_cameras)
            && at_least(self.min_police_stations, stats.police_stations)
            && at_least(self.min_cctv_cameras, stats.cctv_cameras)
            && rated_at_least(self.min_rating, stats.rating)
    }
}

impl CategoryFilter for CommerceCriteria {
    type Stats = CommerceStats;

    fn admits(&self, stats: &CommerceStats) -> bool {
        has_any(self.grocery_stores, stats.grocery_stores)
            && has_any(self.shopping_malls, stats.shopping_malls)
            && has_any(self.restaurants, stats.restaurants)
            && has_any(self.cafes, stats.cafes)
            && has_any(self.banks, stats.banks)
            && has_any(self.markets, stats.markets)
            && has_any(self.gyms, stats.gyms)
            && at_least(self.min_grocery_stores, stats.grocery_stores)
            && at_least(self.min_shopping_malls, stats.shopping_malls)
            && at_least(self.min_restaurants, stats.restaurants)
            && at_least(self.min_cafes, stats.cafes)
            && selected(self.density.as_ref(), stats.density)
            && rated_at_least(self.min_rating, stats.rating)
    }
}

impl CategoryFilter for UtilitiesCriteria {
    type Stats = UtilitiesStats;

    fn admits(&self, stats: &UtilitiesStats) -> bool {
        is_available(self.has_water_supply, stats.has_water_supply)
            && is_available(self.has_gas_supply, stats.has_gas_supply)
            && is_available(self.has_electricity, stats.has_electricity)
            && is_available(self.has_central_heating, stats.has_central_heating)
            && is_available(self.has_high_speed_internet, stats.has_high_speed_internet)
            && within(self.min_cost, self.max_cost, stats.cost)
            && selected(
                self.quality.as_ref(),
                Some(QualityBucket::from_rating(stats.rating)),
            )
            && rated_at_least(self.min_rating, stats.rating)
    }
}
