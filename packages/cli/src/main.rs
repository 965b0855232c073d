#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for normalizing and filtering district statistics.
//!
//! ```text
//! district_map normalize <districts.json>
//! district_map flatten <districts.json>
//! district_map filter <districts.json> [--criteria <file>] [--preset <name>] [--count]
//! district_map presets
//! district_map fields
//! ```
//!
//! Running `district_map` with no subcommand enters interactive mode.

mod interactive;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use district_map_district::{load_districts_from_path, normalize_all, to_storage_shape};
use district_map_district_models::{Category, District, FIELDS, FilterData, fields_for};
use district_map_filter::load::load_criteria_from_path;
use district_map_filter::registry::{all_presets, preset};
use district_map_filter::retain_matching;
use district_map_filter_models::FilterCriteria;

#[derive(Parser)]
#[command(
    name = "district_map",
    about = "Normalize and filter district statistics"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print districts with statistics nested by category
    Normalize {
        /// JSON array of district records
        input: PathBuf,
    },
    /// Print districts with flat, snake_case statistics
    Flatten {
        /// JSON array of district records
        input: PathBuf,
    },
    /// Print the districts that match the given criteria
    Filter {
        /// JSON array of district records
        input: PathBuf,
        /// Criteria file (`.toml`, otherwise JSON)
        #[arg(long, conflicts_with = "preset")]
        criteria: Option<PathBuf>,
        /// Built-in criteria preset name
        #[arg(long)]
        preset: Option<String>,
        /// Only print how many districts match
        #[arg(long)]
        count: bool,
    },
    /// List built-in criteria presets
    Presets,
    /// Print the storage/display field table
    Fields,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run();
    };

    match command {
        Commands::Normalize { input } => {
            let districts = normalize_all(load_districts_from_path(&input)?);
            println!("{}", serde_json::to_string_pretty(&districts)?);
        }
        Commands::Flatten { input } => {
            let districts: Vec<District> = load_districts_from_path(&input)?
                .into_iter()
                .map(|district| District {
                    filter_data: to_storage_shape(&district).map(FilterData::Storage),
                    ..district
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&districts)?);
        }
        Commands::Filter {
            input,
            criteria,
            preset: preset_name,
            count,
        } => {
            let criteria = match (criteria, preset_name) {
                (Some(path), _) => load_criteria_from_path(&path)?,
                (None, Some(name)) => preset(&name)?,
                (None, None) => FilterCriteria::default(),
            };

            let matched = run_filter(&input, &criteria)?;

            if count {
                println!("{}", matched.len());
            } else {
                println!("{}", serde_json::to_string_pretty(&matched)?);
            }
        }
        Commands::Presets => {
            let presets = all_presets();

            println!("{:<20} {:<6} DESCRIPTION", "NAME", "RULES");
            println!("{}", "-".repeat(80));

            for preset in &presets {
                println!(
                    "{:<20} {:<6} {}",
                    preset.name,
                    preset.criteria.active_constraint_count(),
                    preset.description
                );
            }
        }
        Commands::Fields => {
            for category in Category::all() {
                let note = if category.is_filterable() {
                    ""
                } else {
                    " (informational, not filterable)"
                };
                println!("{}{note}", category.as_ref());
                println!("  {:<28} DISPLAY KEY", "STORAGE KEY");

                for field in fields_for(*category) {
                    println!("  {:<28} {}", field.storage_key, field.display_key());
                }

                println!();
            }

            println!("{} field(s)", FIELDS.len());
        }
    }

    Ok(())
}

/// Loads, normalizes and filters the districts in `input`.
fn run_filter(
    input: &Path,
    criteria: &FilterCriteria,
) -> Result<Vec<District>, Box<dyn std::error::Error>> {
    let districts = normalize_all(load_districts_from_path(input)?);
    let total = districts.len();
    let matched = retain_matching(districts, criteria);

    log::info!(
        "{} of {total} districts match {} active constraints",
        matched.len(),
        criteria.active_constraint_count(),
    );

    Ok(matched)
}
