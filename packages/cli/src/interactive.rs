//! Interactive mode: pick a district file and a preset, see what matches.

use std::path::PathBuf;

use dialoguer::{Input, Select};
use district_map_filter::registry::all_presets;
use district_map_filter_models::FilterCriteria;

/// Runs the interactive filter prompt.
///
/// # Errors
///
/// Returns an error if a prompt fails or the district file cannot be loaded.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let input: String = Input::new()
        .with_prompt("District JSON file")
        .default("districts.json".to_string())
        .interact_text()?;

    let presets = all_presets();
    let mut labels: Vec<String> = vec!["No criteria (show all)".to_string()];
    labels.extend(
        presets
            .iter()
            .map(|preset| format!("{} - {}", preset.name, preset.description)),
    );

    let idx = Select::new()
        .with_prompt("Criteria preset")
        .items(&labels)
        .default(0)
        .interact()?;

    let criteria = if idx == 0 {
        FilterCriteria::default()
    } else {
        presets[idx - 1].criteria.clone()
    };

    let matched = crate::run_filter(&PathBuf::from(input), &criteria)?;

    if matched.is_empty() {
        println!("No districts match.");
        return Ok(());
    }

    for district in &matched {
        println!("  {}", district.label());
    }

    println!("\n{} district(s) match", matched.len());

    Ok(())
}
