//! Reads district collections from JSON.
//!
//! The input is a JSON array of district records as returned by the data
//! source. Each record's `filterData` may be in either shape; it is
//! classified once here and tagged from then on.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use district_map_district_models::District;

use crate::DistrictError;

/// How many districts of a collection carry each statistics shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeCounts {
    /// Districts with flat statistics.
    pub storage: usize,
    /// Districts with nested statistics.
    pub display: usize,
    /// Districts without any statistics.
    pub missing: usize,
}

impl ShapeCounts {
    /// Tallies the statistics shapes of `districts`.
    #[must_use]
    pub fn of(districts: &[District]) -> Self {
        districts
            .iter()
            .fold(Self::default(), |mut counts, district| {
                match &district.filter_data {
                    Some(data) if data.is_display() => counts.display += 1,
                    Some(_) => counts.storage += 1,
                    None => counts.missing += 1,
                }
                counts
            })
    }
}

/// Parses a JSON array of districts.
///
/// # Errors
///
/// * If the input cannot be read
/// * If the input is not a JSON array of district objects
/// * If any `filterData` is not an object or mixes shapes
///
/// A statistic of the wrong type reads as missing instead of failing the
/// collection.
pub fn load_districts(reader: impl Read) -> Result<Vec<District>, DistrictError> {
    let districts: Vec<District> = serde_json::from_reader(reader)?;
    let counts = ShapeCounts::of(&districts);

    log::info!(
        "Loaded {} districts ({} storage-shaped, {} display-shaped, {} without statistics)",
        districts.len(),
        counts.storage,
        counts.display,
        counts.missing,
    );

    Ok(districts)
}

/// Opens `path` and parses it with [`load_districts`].
///
/// # Errors
///
/// * If the file cannot be opened
/// * If the contents are not a valid district array
pub fn load_districts_from_path(path: &Path) -> Result<Vec<District>, DistrictError> {
    log::debug!("Reading districts from {}", path.display());
    let file = File::open(path)?;
    load_districts(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use district_map_district_models::FilterData;

    #[test]
    fn loads_mixed_shapes() {
        let input = r#"[
            { "id": 1, "filterData": { "schools_count": 2 } },
            { "id": 2, "filterData": { "education": { "schools": 2 } } },
            { "id": 3 }
        ]"#;

        let districts = load_districts(input.as_bytes()).unwrap();
        assert_eq!(districts.len(), 3);
        assert_eq!(
            ShapeCounts::of(&districts),
            ShapeCounts {
                storage: 1,
                display: 1,
                missing: 1,
            }
        );
    }

    #[test]
    fn rejects_mixed_record() {
        let input = r#"[
            { "id": 1, "filterData": { "schools_count": 2, "safety": { "crimeLevel": 3 } } }
        ]"#;

        let err = load_districts(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DistrictError::Json(_)));
        assert!(
            err.to_string().contains("safety"),
            "error should name the offending key: {err}"
        );
    }

    #[test]
    fn integral_float_counts_load() {
        let input = r#"[
            { "id": 1, "filterData": { "schools_count": 4 } },
            { "id": 2, "filterData": { "schools_count": 3.0 } }
        ]"#;

        let districts = load_districts(input.as_bytes()).unwrap();
        assert_eq!(districts.len(), 2);

        let Some(FilterData::Storage(flat)) = &districts[1].filter_data else {
            panic!("expected storage shape, got {:?}", districts[1].filter_data);
        };
        assert_eq!(flat.schools_count, Some(3));
    }

    #[test]
    fn mistyped_statistics_keep_the_rest_of_the_collection() {
        let input = r#"[
            { "id": 1, "filterData": { "education": null, "safety": { "crimeLevel": 2 } } },
            { "id": 2, "filterData": { "schools_count": "lots", "crime_level": 4 } },
            { "id": 3, "filterData": { "parks_count": 1 } }
        ]"#;

        let districts = load_districts(input.as_bytes()).unwrap();
        assert_eq!(districts.len(), 3);

        let Some(FilterData::Display(nested)) = &districts[0].filter_data else {
            panic!("expected display shape, got {:?}", districts[0].filter_data);
        };
        assert_eq!(nested.education.schools, None);
        assert_eq!(nested.safety.crime_level, Some(2.0));

        let Some(FilterData::Storage(flat)) = &districts[1].filter_data else {
            panic!("expected storage shape, got {:?}", districts[1].filter_data);
        };
        assert_eq!(flat.schools_count, None);
        assert_eq!(flat.crime_level, Some(4.0));
    }

    #[test]
    fn rejects_non_array() {
        let err = load_districts(r#"{ "id": 1 }"#.as_bytes()).unwrap_err();
        assert!(matches!(err, DistrictError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_districts_from_path(Path::new("/nonexistent/districts.json")).unwrap_err();
        assert!(matches!(err, DistrictError::Io(_)));
    }
}
