//! The district field table.
//!
//! Every filterable statistic is declared exactly once in the
//! `district_fields!` invocation below. The invocation generates the flat
//! [`StorageFilterData`] row, one display-shape struct per [`Category`], the
//! nested [`DisplayFilterData`], both conversion directions, and the
//! [`FIELDS`] table used for introspection. Adding a field is a one-line
//! change to the invocation.

use serde::{Deserialize, Serialize};

use crate::{Category, CommerceDensity, TransportFrequency};

/// One entry of the field table: where a statistic lives in each shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Category the field is grouped under in the display shape.
    pub category: Category,
    /// Flat snake_case key in the storage shape (e.g. `"schools_count"`).
    pub storage_key: &'static str,
    /// Field name inside the category struct (e.g. `"bus_stops"`).
    pub display_field: &'static str,
}

impl FieldMapping {
    /// Returns the camelCase key this field serializes under in the display
    /// shape (e.g. `"busStops"`).
    #[must_use]
    pub fn display_key(&self) -> String {
        let mut key = String::with_capacity(self.display_field.len());
        let mut upper = false;

        for ch in self.display_field.chars() {
            if ch == '_' {
                upper = true;
            } else if upper {
                key.push(ch.to_ascii_uppercase());
                upper = false;
            } else {
                key.push(ch);
            }
        }

        key
    }
}

/// Returns `true` if `key` is a storage-shape key from the field table.
#[must_use]
pub fn is_storage_key(key: &str) -> bool {
    FIELDS.iter().any(|field| field.storage_key == key)
}

/// Returns the field table entries for a single category, in table order.
pub fn fields_for(category: Category) -> impl Iterator<Item = &'static FieldMapping> {
    FIELDS.iter().filter(move |field| field.category == category)
}

macro_rules! district_fields {
    ($(
        $category:ident: $stats:ident as $variant:ident {
            $($storage:ident => $display:ident: $ty:ty,)+
        }
    )+) => {
        $(
            #[doc = concat!("Display-shape statistics of the `", stringify!($category), "` category.")]
            #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
            #[serde(rename_all = "camelCase", default)]
            pub struct $stats {
                $(
                    #[doc = concat!("Stored as `", stringify!($storage), "`.")]
                    #[serde(
                        skip_serializing_if = "Option::is_none",
                        deserialize_with = "crate::lenient::statistic"
                    )]
                    pub $display: Option<$ty>,
                )+
            }
        )+

        /// Flat filter data with one snake_case key per statistic, as
        /// delivered by the data source. Unknown keys are ignored and
        /// mistyped values read as missing on deserialization.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct StorageFilterData {
            $($(
                #[serde(deserialize_with = "crate::lenient::statistic")]
                pub $storage: Option<$ty>,
            )+)+
        }

        /// Filter data nested one level under the category keys.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct DisplayFilterData {
            $(
                #[serde(deserialize_with = "crate::lenient::category")]
                pub $category: $stats,
            )+
        }

        impl From<&StorageFilterData> for DisplayFilterData {
            fn from(flat: &StorageFilterData) -> Self {
                Self {
                    $($category: $stats {
                        $($display: flat.$storage,)+
                    },)+
                }
            }
        }

        impl From<&DisplayFilterData> for StorageFilterData {
            fn from(nested: &DisplayFilterData) -> Self {
                Self {
                    $($($storage: nested.$category.$display,)+)+
                }
            }
        }

        /// Every statistic known to the system, grouped by category in
        /// display order.
        pub const FIELDS: &[FieldMapping] = &[
            $($(
                FieldMapping {
                    category: Category::$variant,
                    storage_key: stringify!($storage),
                    display_field: stringify!($display),
                },
            )+)+
        ];
    };
}

district_fields! {
    general: GeneralStats as General {
        property_price => property_price: f64,
        population_density => population_density: f64,
        green_space_percentage => green_space_percentage: f64,
        area_km2 => area: f64,
        population => population: u64,
    }
    education: EducationStats as Education {
        education_rating => rating: f64,
        schools_count => schools: u32,
        kindergartens_count => kindergartens: u32,
        universities_count => universities: u32,
    }
    medicine: MedicineStats as Medicine {
        medicine_rating => rating: f64,
        hospitals_count => hospitals: u32,
        clinics_count => clinics: u32,
        pharmacies_count => pharmacies: u32,
        dentists_count => dentists: u32,
    }
    transport: TransportStats as Transport {
        transport_rating => rating: f64,
        bus_stops_count => bus_stops: u32,
        metro_stations_count => metro_stations: u32,
        tram_stops_count => tram_stops: u32,
        train_stations_count => train_stations: u32,
        parking_lots_count => parking_lots: u32,
        bike_lanes_km => bike_lanes: f64,
        transport_frequency => frequency: TransportFrequency,
    }
    social: SocialStats as Social {
        social_rating => rating: f64,
        parks_count => parks: u32,
        playgrounds_count => playgrounds: u32,
        sports_facilities_count => sports_facilities: u32,
        libraries_count => libraries: u32,
        cultural_centers_count => cultural_centers: u32,
        community_centers_count => community_centers: u32,
        theaters_count => theaters: u32,
        cinemas_count => cinemas: u32,
        average_park_size => average_park_size: f64,
    }
    safety: SafetyStats as Safety {
        safety_rating => rating: f64,
        crime_level => crime_level: f64,
        police_stations_count => police_stations: u32,
        fire_stations_count => fire_stations: u32,
        cctv_cameras_count => cctv_cameras: u32,
    }
    commerce: CommerceStats as Commerce {
        commerce_rating => rating: f64,
        grocery_stores_count => grocery_stores: u32,
        shopping_malls_count => shopping_malls: u32,
        restaurants_count => restaurants: u32,
        cafes_count => cafes: u32,
        banks_count => banks: u32,
        markets_count => markets: u32,
        gyms_count => gyms: u32,
        commerce_density => density: CommerceDensity,
    }
    utilities: UtilitiesStats as Utilities {
        utilities_quality_rating => rating: f64,
        utilities_cost => cost: f64,
        has_water_supply => has_water_supply: bool,
        has_gas_supply => has_gas_supply: bool,
        has_electricity => has_electricity: bool,
        has_central_heating => has_central_heating: bool,
        has_high_speed_internet => has_high_speed_internet: bool,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn storage_keys_are_unique() {
        let mut seen = BTreeSet::new();
        for field in FIELDS {
            assert!(
                seen.insert(field.storage_key),
                "Duplicate storage key: {}",
                field.storage_key
            );
        }
    }

    #[test]
    fn display_keys_are_unique_within_category() {
        for category in Category::all() {
            let mut seen = BTreeSet::new();
            for field in fields_for(*category) {
                assert!(
                    seen.insert(field.display_key()),
                    "Duplicate display key {} in {category}",
                    field.display_key()
                );
            }
        }
    }

    #[test]
    fn every_category_has_fields() {
        for category in Category::all() {
            assert!(
                fields_for(*category).next().is_some(),
                "{category} has no fields in the table"
            );
        }
    }

    #[test]
    fn display_key_is_camel_case() {
        let field = FIELDS
            .iter()
            .find(|f| f.storage_key == "sports_facilities_count")
            .unwrap();
        assert_eq!(field.category, Category::Social);
        assert_eq!(field.display_key(), "sportsFacilities");

        let area = FIELDS.iter().find(|f| f.storage_key == "area_km2").unwrap();
        assert_eq!(area.display_key(), "area");
    }

    #[test]
    fn storage_row_serializes_every_table_key() {
        let value = serde_json::to_value(StorageFilterData::default()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), FIELDS.len());
        for field in FIELDS {
            assert!(
                object.get(field.storage_key).is_some_and(serde_json::Value::is_null),
                "{} missing from serialized storage row",
                field.storage_key
            );
        }
    }

    #[test]
    fn display_stats_serialize_under_display_keys() {
        let mut nested = DisplayFilterData::default();
        nested.transport.bus_stops = Some(12);
        nested.utilities.has_water_supply = Some(true);

        let value = serde_json::to_value(&nested).unwrap();
        assert_eq!(value["transport"]["busStops"], 12);
        assert_eq!(value["utilities"]["hasWaterSupply"], true);
        assert!(value["education"].as_object().unwrap().is_empty());
    }

    #[test]
    fn conversion_moves_values_between_shapes() {
        let flat = StorageFilterData {
            schools_count: Some(0),
            crime_level: Some(2.5),
            commerce_density: Some(CommerceDensity::High),
            ..StorageFilterData::default()
        };

        let nested = DisplayFilterData::from(&flat);
        assert_eq!(nested.education.schools, Some(0));
        assert_eq!(nested.safety.crime_level, Some(2.5));
        assert_eq!(nested.commerce.density, Some(CommerceDensity::High));
        assert_eq!(nested.education.rating, None);

        assert_eq!(StorageFilterData::from(&nested), flat);
    }
}
