//! Reads filter criteria from JSON or TOML files.

use std::path::Path;

use district_map_filter_models::FilterCriteria;

use crate::FilterError;

/// Parses criteria from a file, choosing TOML for a `.toml` extension and
/// JSON otherwise.
///
/// # Errors
///
/// * If the file cannot be read
/// * If the contents are not valid criteria in the detected format
pub fn load_criteria_from_path(path: &Path) -> Result<FilterCriteria, FilterError> {
    let contents = std::fs::read_to_string(path)?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let criteria = if is_toml {
        parse_toml_criteria(&contents)?
    } else {
        parse_json_criteria(&contents)?
    };

    log::debug!(
        "Loaded criteria from {} ({} active constraints)",
        path.display(),
        criteria.active_constraint_count(),
    );

    Ok(criteria)
}

/// Parses criteria from a JSON document.
///
/// # Errors
///
/// * If the document is not a valid criteria object
pub fn parse_json_criteria(contents: &str) -> Result<FilterCriteria, FilterError> {
    Ok(serde_json::from_str(contents)?)
}

/// Parses criteria from a TOML document with one table per category.
///
/// # Errors
///
/// * If the document is not valid criteria TOML
pub fn parse_toml_criteria(contents: &str) -> Result<FilterCriteria, FilterError> {
    Ok(toml::from_str(contents)?)
}
