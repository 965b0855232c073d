//! Converts district statistics between the storage and display shapes.
//!
//! Both directions are driven by the field table in
//! [`district_map_district_models`], so a record converted one way and back
//! reproduces its original fields exactly, including explicit zeros.

use std::borrow::Cow;

use district_map_district_models::{DisplayFilterData, District, FilterData, StorageFilterData};

/// Nests a district's statistics by category.
///
/// Records that are already in display shape, or that carry no statistics at
/// all, are returned as-is. Every top-level attribute is preserved.
#[must_use]
pub fn to_display_shape(district: District) -> District {
    let Some(FilterData::Storage(flat)) = &district.filter_data else {
        return district;
    };

    let nested = DisplayFilterData::from(flat);

    District {
        filter_data: Some(FilterData::Display(nested)),
        ..district
    }
}

/// Returns the flat storage row for a district's statistics.
///
/// Storage-shaped data is returned unchanged. Display-shaped data is
/// flattened back to the storage keys, with `None` for anything the nested
/// record did not carry. Returns `None` when the district has no statistics.
#[must_use]
pub fn to_storage_shape(district: &District) -> Option<StorageFilterData> {
    district.filter_data.as_ref().map(|data| match data {
        FilterData::Storage(flat) => flat.clone(),
        FilterData::Display(nested) => StorageFilterData::from(nested),
    })
}

/// Borrows display-shaped statistics, converting only when the data is still
/// in storage shape.
#[must_use]
pub fn display_view(data: &FilterData) -> Cow<'_, DisplayFilterData> {
    match data {
        FilterData::Display(nested) => Cow::Borrowed(nested),
        FilterData::Storage(flat) => Cow::Owned(DisplayFilterData::from(flat)),
    }
}

/// Converts every district to display shape, preserving order.
pub fn normalize_all(districts: impl IntoIterator<Item = District>) -> Vec<District> {
    districts.into_iter().map(to_display_shape).collect()
}
