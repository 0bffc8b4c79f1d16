// Standings and prospect CSV loading.
//
// Standings CSV: team_id,team_name,wins,losses[,ties][,winning_pct]
// Prospects CSV: id,name,rank

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::DataPaths;
use crate::lottery::standings::TeamStanding;
use crate::mock::simulator::Prospect;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV rows
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStanding {
    team_id: String,
    team_name: String,
    wins: u32,
    losses: u32,
    #[serde(default)]
    ties: u32,
    /// Overrides the derived percentage when the league reports its own.
    #[serde(default)]
    winning_pct: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawProspect {
    id: String,
    name: String,
    rank: u32,
}

// ---------------------------------------------------------------------------
// Reader-based loaders
// ---------------------------------------------------------------------------

fn load_standings_from_reader<R: Read>(rdr: R) -> Result<Vec<TeamStanding>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut standings = Vec::new();
    let mut seen = HashSet::new();
    for result in reader.deserialize::<RawStanding>() {
        match result {
            Ok(raw) => {
                let team_id = raw.team_id.trim();
                if team_id.is_empty() {
                    warn!("skipping standings row for '{}': empty team_id", raw.team_name.trim());
                    continue;
                }
                // A team listed twice would take two slots in the draft order.
                if !seen.insert(team_id.to_string()) {
                    warn!("duplicate team_id '{}', keeping first entry", team_id);
                    continue;
                }
                let mut standing =
                    TeamStanding::new(team_id, raw.team_name.trim(), raw.wins, raw.losses, raw.ties);
                match raw.winning_pct {
                    Some(pct) if pct.is_finite() => standing.winning_pct = pct,
                    Some(_) => {
                        warn!("ignoring non-finite winning_pct for '{}'", standing.team_name);
                    }
                    None => {}
                }
                standings.push(standing);
            }
            Err(e) => {
                warn!("skipping malformed standings row: {}", e);
            }
        }
    }
    Ok(standings)
}

fn load_prospects_from_reader<R: Read>(rdr: R) -> Result<Vec<Prospect>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut prospects = Vec::new();
    let mut seen = HashSet::new();
    for result in reader.deserialize::<RawProspect>() {
        match result {
            Ok(raw) => {
                let id = raw.id.trim().to_string();
                if id.is_empty() {
                    warn!("skipping prospect row for '{}': empty id", raw.name.trim());
                    continue;
                }
                if !seen.insert(id.clone()) {
                    warn!("duplicate prospect id '{}', keeping first entry", id);
                    continue;
                }
                prospects.push(Prospect {
                    id,
                    name: raw.name.trim().to_string(),
                    rank: raw.rank,
                });
            }
            Err(e) => {
                warn!("skipping malformed prospect row: {}", e);
            }
        }
    }
    Ok(prospects)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load final standings from a CSV file. The rows may be in any order.
pub fn load_standings(path: &Path) -> Result<Vec<TeamStanding>, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let standings = load_standings_from_reader(file).map_err(|e| DataError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    if standings.is_empty() {
        return Err(DataError::Validation(format!(
            "standings CSV {} produced zero valid rows",
            path.display()
        )));
    }
    info!("Loaded {} team standings from {}", standings.len(), path.display());
    Ok(standings)
}

/// Load the prospect board from a CSV file.
pub fn load_prospects(path: &Path) -> Result<Vec<Prospect>, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let prospects = load_prospects_from_reader(file).map_err(|e| DataError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    info!("Loaded {} prospects from {}", prospects.len(), path.display());
    Ok(prospects)
}

/// Load standings using the configured path.
pub fn load_configured_standings(paths: &DataPaths) -> Result<Vec<TeamStanding>, DataError> {
    load_standings(Path::new(&paths.standings))
}

/// Load prospects using the configured path.
pub fn load_configured_prospects(paths: &DataPaths) -> Result<Vec<Prospect>, DataError> {
    load_prospects(Path::new(&paths.prospects))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standings_csv_with_ties_column() {
        let csv_data = "\
team_id,team_name,wins,losses,ties
t1, Sluggers ,10,3,1
t2,Moonshots,4,9,1";

        let standings = load_standings_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].team_name, "Sluggers");
        assert_eq!(standings[0].ties, 1);
        assert!((standings[0].winning_pct - 10.5 / 14.0).abs() < 1e-12);
    }

    #[test]
    fn standings_csv_without_ties_defaults_to_zero() {
        let csv_data = "\
team_id,team_name,wins,losses
t1,Sluggers,10,3";

        let standings = load_standings_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(standings[0].ties, 0);
        assert_eq!(standings[0].record(), "10-3");
    }

    #[test]
    fn standings_csv_reported_pct_overrides_derived() {
        let csv_data = "\
team_id,team_name,wins,losses,ties,winning_pct
t1,Sluggers,10,3,0,0.700";

        let standings = load_standings_from_reader(csv_data.as_bytes()).unwrap();
        assert!((standings[0].winning_pct - 0.7).abs() < 1e-12);
    }

    #[test]
    fn standings_csv_skips_malformed_rows() {
        let csv_data = "\
team_id,team_name,wins,losses
t1,Sluggers,10,3
t2,Moonshots,many,9
,Nameless,5,5";

        let standings = load_standings_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].team_id, "t1");
    }

    #[test]
    fn standings_csv_drops_duplicate_team_ids() {
        let csv_data = "\
team_id,team_name,wins,losses
t1,Sluggers,10,3
t2,Moonshots,4,9
t1,Sluggers Again,2,11
t3,Bunters,7,6";

        let standings = load_standings_from_reader(csv_data.as_bytes()).unwrap();
        let ids: Vec<&str> = standings.iter().map(|t| t.team_id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);
        assert_eq!(standings[0].team_name, "Sluggers");
    }

    #[test]
    fn duplicate_standings_rows_cannot_double_book_a_team() {
        use crate::lottery::drawer::draw;
        use crate::lottery::standings::{classify, rank_standings};
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let csv_data = "\
team_id,team_name,wins,losses
t1,Sluggers,10,3
t2,Moonshots,4,9
t1,Sluggers,10,3
t3,Bunters,7,6";

        let standings = load_standings_from_reader(csv_data.as_bytes()).unwrap();
        let split = classify(&rank_standings(&standings), 1);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let results = draw(&split.lottery_teams, &split.money_teams, &mut rng);

        let ids: HashSet<&str> = results.iter().map(|r| r.team_id.as_str()).collect();
        assert_eq!(results.len(), 3);
        assert_eq!(ids.len(), results.len());
    }

    #[test]
    fn prospects_csv_skips_blank_ids() {
        let csv_data = "\
id,name,rank
 ,Ghost One,1
,Ghost Two,2
p3,Real Guy,3";

        let prospects = load_prospects_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(prospects.len(), 1);
        assert_eq!(prospects[0].id, "p3");
    }

    #[test]
    fn prospects_csv_drops_duplicate_ids() {
        let csv_data = "\
id,name,rank
p1,First Guy,1
p2,Second Guy,2
p1,Imposter,9";

        let prospects = load_prospects_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(prospects.len(), 2);
        assert_eq!(prospects[0].name, "First Guy");
    }

    #[test]
    fn prospects_csv_rejects_negative_rank_row() {
        let csv_data = "\
id,name,rank
p1,First Guy,1
p2,Second Guy,-2";

        let prospects = load_prospects_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(prospects.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_standings(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn header_only_standings_is_validation_error() {
        let path = std::env::temp_dir().join("draft_lottery_empty_standings.csv");
        std::fs::write(&path, "team_id,team_name,wins,losses\n").unwrap();
        let err = load_standings(&path).unwrap_err();
        assert!(matches!(err, DataError::Validation(_)));
        let _ = std::fs::remove_file(&path);
    }
}
