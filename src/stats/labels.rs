//! Static display tables for team codes and metric columns

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::{PlayStatsError, Result};

/// Franchise code → display name
pub const TEAM_NAMES: [(&str, &str); 30] = [
    ("ATL", "Atlanta Hawks (ATL)"),
    ("BOS", "Boston Celtics (BOS)"),
    ("BRK", "Brooklyn Nets (BRK)"),
    ("CHI", "Chicago Bulls (CHI)"),
    ("CHO", "Charlotte Hornets (CHO)"),
    ("CLE", "Cleveland Cavaliers (CLE)"),
    ("DAL", "Dallas Mavericks (DAL)"),
    ("DEN", "Denver Nuggets (DEN)"),
    ("DET", "Detroit Pistons (DET)"),
    ("GSW", "Golden State Warriors (GSW)"),
    ("HOU", "Houston Rockets (HOU)"),
    ("IND", "Indiana Pacers (IND)"),
    ("LAC", "Los Angeles Clippers (LAC)"),
    ("LAL", "Los Angeles Lakers (LAL)"),
    ("MEM", "Memphis Grizzlies (MEM)"),
    ("MIA", "Miami Heat (MIA)"),
    ("MIL", "Milwaukee Bucks (MIL)"),
    ("MIN", "Minnesota Timberwolves (MIN)"),
    ("NOP", "New Orleans Pelicans (NOP)"),
    ("NYK", "New York Knicks (NYK)"),
    ("OKC", "Oklahoma City Thunder (OKC)"),
    ("ORL", "Orlando Magic (ORL)"),
    ("PHI", "Philadelphia 76ers (PHI)"),
    ("PHO", "Phoenix Suns (PHO)"),
    ("POR", "Portland Trail Blazers (POR)"),
    ("SAC", "Sacramento Kings (SAC)"),
    ("SAS", "San Antonio Spurs (SAS)"),
    ("TOR", "Toronto Raptors (TOR)"),
    ("UTA", "Utah Jazz (UTA)"),
    ("WAS", "Washington Wizards (WAS)"),
];

/// Display name for a team code; `None` for codes outside the table (e.g. "2TM")
pub fn team_display_name(code: &str) -> Option<&'static str> {
    TEAM_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Resolve a user-supplied team (code or display name) to its display name
pub fn resolve_team(input: &str) -> Option<&'static str> {
    let input = input.trim();
    team_display_name(&input.to_uppercase()).or_else(|| {
        TEAM_NAMES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(input))
            .map(|(_, name)| *name)
    })
}

/// Metric columns that can be plotted or tabulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    Points,
    Assists,
    Rebounds,
    MinutesPlayed,
    FieldGoalPct,
    FreeThrowPct,
    ThreePointPct,
    FieldGoalAttempts,
    FreeThrowAttempts,
    Turnovers,
    TrueShootingPct,
    UsageRate,
    EffectiveFgPct,
    Steals,
    Blocks,
    OffensiveRebounds,
    DefensiveRebounds,
}

impl Metric {
    /// Selector order
    pub const ALL: [Metric; 17] = [
        Metric::Points,
        Metric::Assists,
        Metric::Rebounds,
        Metric::MinutesPlayed,
        Metric::FieldGoalPct,
        Metric::FreeThrowPct,
        Metric::ThreePointPct,
        Metric::FieldGoalAttempts,
        Metric::FreeThrowAttempts,
        Metric::Turnovers,
        Metric::TrueShootingPct,
        Metric::UsageRate,
        Metric::EffectiveFgPct,
        Metric::Steals,
        Metric::Blocks,
        Metric::OffensiveRebounds,
        Metric::DefensiveRebounds,
    ];

    /// Raw column name in the dataset
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Points => "PTS",
            Metric::Assists => "AST",
            Metric::Rebounds => "TRB",
            Metric::MinutesPlayed => "MP",
            Metric::FieldGoalPct => "FG%",
            Metric::FreeThrowPct => "FT%",
            Metric::ThreePointPct => "3P%",
            Metric::FieldGoalAttempts => "FGA",
            Metric::FreeThrowAttempts => "FTA",
            Metric::Turnovers => "TOV",
            Metric::TrueShootingPct => "TS%",
            Metric::UsageRate => "USG%",
            Metric::EffectiveFgPct => "eFG%",
            Metric::Steals => "STL",
            Metric::Blocks => "BLK",
            Metric::OffensiveRebounds => "ORB",
            Metric::DefensiveRebounds => "DRB",
        }
    }

    /// Human-friendly label
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Points => "Points Per Season",
            Metric::Assists => "Assists",
            Metric::Rebounds => "Rebounds",
            Metric::MinutesPlayed => "Minutes Played",
            Metric::FieldGoalPct => "Field Goal %",
            Metric::FreeThrowPct => "Free Throw %",
            Metric::ThreePointPct => "3-Point %",
            Metric::FieldGoalAttempts => "Field Goal Attempts",
            Metric::FreeThrowAttempts => "Free Throw Attempts",
            Metric::Turnovers => "Turnovers",
            Metric::TrueShootingPct => "True Shooting %",
            Metric::UsageRate => "Usage Rate (Proxy)",
            Metric::EffectiveFgPct => "Effective FG %",
            Metric::Steals => "Steals",
            Metric::Blocks => "Blocks",
            Metric::OffensiveRebounds => "Offensive Rebounds",
            Metric::DefensiveRebounds => "Defensive Rebounds",
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.column() == column)
    }

    /// Inverse of [`Metric::label`]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.label() == label)
    }
}

impl FromStr for Metric {
    type Err = PlayStatsError;

    /// Accepts a column name or a display label
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::from_column(s)
            .or_else(|| Self::from_label(s))
            .or_else(|| {
                Self::ALL.iter().copied().find(|m| {
                    m.column().eq_ignore_ascii_case(s) || m.label().eq_ignore_ascii_case(s)
                })
            })
            .ok_or_else(|| PlayStatsError::UnknownMetric(s.to_string()))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
