// Checks on the files shipped alongside the crate: default config and the
// sample league data it points at.

use std::path::Path;

use draft_lottery::data;

/// Verify that defaults/league.toml is valid TOML.
#[test]
fn default_league_toml_is_valid() {
    let content = std::fs::read_to_string("defaults/league.toml")
        .expect("defaults/league.toml should exist");
    let parsed: Result<toml::Value, _> = toml::from_str(&content);
    assert!(parsed.is_ok(), "defaults/league.toml is not valid TOML: {:?}", parsed.err());
}

/// Verify that the data paths in the default config resolve to loadable CSVs.
#[test]
fn default_data_paths_load() {
    let content = std::fs::read_to_string("defaults/league.toml").unwrap();
    let parsed: toml::Value = toml::from_str(&content).unwrap();
    let paths = &parsed["data_paths"];

    let standings_path = paths["standings"].as_str().expect("standings path");
    let prospects_path = paths["prospects"].as_str().expect("prospects path");

    let standings = data::load_standings(Path::new(standings_path)).expect("standings load");
    let prospects = data::load_prospects(Path::new(prospects_path)).expect("prospects load");
    assert_eq!(standings.len(), 12);
    assert!(prospects.len() >= standings.len());
}

/// Verify that all expected directories exist.
#[test]
fn directory_structure_exists() {
    let expected_dirs = ["src", "src/lottery", "src/mock", "defaults", "data", "tests/fixtures"];
    for dir in &expected_dirs {
        assert!(Path::new(dir).is_dir(), "Expected directory '{}' to exist", dir);
    }
}
