//! Compile-time registry of built-in criteria presets.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Adding a preset requires creating a TOML file in `presets/` and adding a
//! corresponding entry here.

use district_map_filter_models::{CriteriaPreset, FilterCriteria};

use crate::FilterError;

/// Number of registered presets. Enforced by a test.
#[cfg(test)]
const EXPECTED_PRESET_COUNT: usize = 4;

/// Embedded TOML preset definitions.
const PRESET_TOMLS: &[(&str, &str)] = &[
    ("family", include_str!("../presets/family.toml")),
    ("commuter", include_str!("../presets/commuter.toml")),
    (
        "safe_and_quiet",
        include_str!("../presets/safe_and_quiet.toml"),
    ),
    (
        "connected_living",
        include_str!("../presets/connected_living.toml"),
    ),
];

/// Returns all registered presets in registry order.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught by the tests below.
#[must_use]
pub fn all_presets() -> Vec<CriteriaPreset> {
    PRESET_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse criteria preset '{name}': {e}"))
        })
        .collect()
}

/// Returns the names of all registered presets.
#[must_use]
pub fn preset_names() -> Vec<&'static str> {
    PRESET_TOMLS.iter().map(|(name, _)| *name).collect()
}

/// Looks up a preset's criteria by name.
///
/// # Errors
///
/// * If no preset is registered under `name`
pub fn preset(name: &str) -> Result<FilterCriteria, FilterError> {
    all_presets()
        .into_iter()
        .find(|preset| preset.name == name)
        .map(|preset| preset.criteria)
        .ok_or_else(|| FilterError::UnknownPreset {
            name: name.to_string(),
            available: preset_names().join(", "),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_presets() {
        let presets = all_presets();
        assert_eq!(
            presets.len(),
            EXPECTED_PRESET_COUNT,
            "Expected {EXPECTED_PRESET_COUNT} presets, found {}. \
             Update EXPECTED_PRESET_COUNT after adding/removing presets.",
            presets.len()
        );
    }

    #[test]
    fn preset_names_match_registry_keys() {
        for (preset, key) in all_presets().iter().zip(preset_names()) {
            assert_eq!(preset.name, key, "Preset file for '{key}' declares another name");
        }
    }

    #[test]
    fn preset_names_are_unique() {
        let mut seen = BTreeSet::new();
        for name in preset_names() {
            assert!(seen.insert(name), "Duplicate preset name: {name}");
        }
    }

    #[test]
    fn every_preset_constrains_something() {
        for preset in &all_presets() {
            assert!(
                !preset.description.is_empty(),
                "Preset {} has empty description",
                preset.name
            );
            assert!(
                preset.criteria.active_constraint_count() > 0,
                "Preset {} has no active constraints",
                preset.name
            );
        }
    }

    #[test]
    fn unknown_preset_lists_available_names() {
        let err = preset("luxury").unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, FilterError::UnknownPreset { .. }));
        assert!(message.contains("luxury"), "{message}");
        assert!(message.contains("family"), "{message}");
    }

    #[test]
    fn finds_preset_by_name() {
        let criteria = preset("family").unwrap();
        assert!(criteria.education.is_some());
    }
}
