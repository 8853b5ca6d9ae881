//! Season player stats loaded from CSV

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use super::labels::{team_display_name, Metric};
use crate::{PlayStatsError, Result};

/// Columns the explorer needs to find in the header
pub const REQUIRED_COLUMNS: [&str; 19] = [
    "PTS", "FGA", "FTA", "TOV", "MP", "FG", "3P", "STL", "BLK", "ORB", "DRB", "AST", "TRB", "FG%",
    "FT%", "3P%", "Team", "Pos", "Player",
];

/// One player's season line. Numeric cells that are blank or unparseable
/// are undefined (`None`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatRow {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Pos")]
    pub pos: String,
    #[serde(rename = "PTS", default, deserialize_with = "csv::invalid_option")]
    pub pts: Option<f64>,
    #[serde(rename = "FGA", default, deserialize_with = "csv::invalid_option")]
    pub fga: Option<f64>,
    #[serde(rename = "FTA", default, deserialize_with = "csv::invalid_option")]
    pub fta: Option<f64>,
    #[serde(rename = "TOV", default, deserialize_with = "csv::invalid_option")]
    pub tov: Option<f64>,
    #[serde(rename = "MP", default, deserialize_with = "csv::invalid_option")]
    pub mp: Option<f64>,
    #[serde(rename = "FG", default, deserialize_with = "csv::invalid_option")]
    pub fg: Option<f64>,
    #[serde(rename = "3P", default, deserialize_with = "csv::invalid_option")]
    pub three_p: Option<f64>,
    #[serde(rename = "STL", default, deserialize_with = "csv::invalid_option")]
    pub stl: Option<f64>,
    #[serde(rename = "BLK", default, deserialize_with = "csv::invalid_option")]
    pub blk: Option<f64>,
    #[serde(rename = "ORB", default, deserialize_with = "csv::invalid_option")]
    pub orb: Option<f64>,
    #[serde(rename = "DRB", default, deserialize_with = "csv::invalid_option")]
    pub drb: Option<f64>,
    #[serde(rename = "AST", default, deserialize_with = "csv::invalid_option")]
    pub ast: Option<f64>,
    #[serde(rename = "TRB", default, deserialize_with = "csv::invalid_option")]
    pub trb: Option<f64>,
    #[serde(rename = "FG%", default, deserialize_with = "csv::invalid_option")]
    pub fg_pct: Option<f64>,
    #[serde(rename = "FT%", default, deserialize_with = "csv::invalid_option")]
    pub ft_pct: Option<f64>,
    #[serde(rename = "3P%", default, deserialize_with = "csv::invalid_option")]
    pub three_pct: Option<f64>,

    #[serde(rename = "TS%", skip_deserializing)]
    pub ts_pct: Option<f64>,
    #[serde(rename = "USG%", skip_deserializing)]
    pub usg_pct: Option<f64>,
    #[serde(rename = "eFG%", skip_deserializing)]
    pub efg_pct: Option<f64>,
}

impl PlayerStatRow {
    /// Value of a metric column, `None` when undefined.
    ///
    /// Cells such as `NaN` or `inf` parse as floats but count as undefined.
    pub fn value(&self, metric: Metric) -> Option<f64> {
        let value = match metric {
            Metric::Points => self.pts,
            Metric::Assists => self.ast,
            Metric::Rebounds => self.trb,
            Metric::MinutesPlayed => self.mp,
            Metric::FieldGoalPct => self.fg_pct,
            Metric::FreeThrowPct => self.ft_pct,
            Metric::ThreePointPct => self.three_pct,
            Metric::FieldGoalAttempts => self.fga,
            Metric::FreeThrowAttempts => self.fta,
            Metric::Turnovers => self.tov,
            Metric::TrueShootingPct => self.ts_pct,
            Metric::UsageRate => self.usg_pct,
            Metric::EffectiveFgPct => self.efg_pct,
            Metric::Steals => self.stl,
            Metric::Blocks => self.blk,
            Metric::OffensiveRebounds => self.orb,
            Metric::DefensiveRebounds => self.drb,
        };
        value.filter(|v| v.is_finite())
    }

    /// Full team name, `None` when the code is not in the team table
    pub fn team_full(&self) -> Option<&'static str> {
        team_display_name(&self.team)
    }
}

/// Read rows from any CSV source
pub fn load_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerStatRow>> {
    let mut reader = csv::Reader::from_reader(rdr);

    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h.trim() == *col))
        .collect();
    if !missing.is_empty() {
        return Err(PlayStatsError::InvalidInput(format!(
            "stats CSV is missing columns: {}",
            missing.join(", ")
        )));
    }

    let mut rows = Vec::new();
    for result in reader.deserialize::<PlayerStatRow>() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Read rows from a CSV file
pub fn load_csv(path: &Path) -> Result<Vec<PlayerStatRow>> {
    let file = std::fs::File::open(path).map_err(|e| {
        PlayStatsError::InvalidInput(format!("cannot open {}: {}", path.display(), e))
    })?;
    let rows = load_from_reader(file)?;
    log::info!("Loaded {} player rows from {}", rows.len(), path.display());
    Ok(rows)
}
