//! Raw player profile as collected at the input boundary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{PlayStatsError, Result};

/// Game difficulty chosen by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// One-hot triple (easy, medium, hard)
    pub fn one_hot(&self) -> [f32; 3] {
        match self {
            Difficulty::Easy => [1.0, 0.0, 0.0],
            Difficulty::Medium => [0.0, 1.0, 0.0],
            Difficulty::Hard => [0.0, 0.0, 1.0],
        }
    }
}

impl FromStr for Difficulty {
    type Err = PlayStatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(PlayStatsError::InvalidInput(format!(
                "unknown game difficulty '{}' (expected Easy, Medium or Hard)",
                s
            ))),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn is_male(&self) -> f32 {
        match self {
            Gender::Male => 1.0,
            Gender::Female => 0.0,
        }
    }
}

impl FromStr for Gender {
    type Err = PlayStatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "female" | "f" | "0" => Ok(Gender::Female),
            "male" | "m" | "1" => Ok(Gender::Male),
            _ => Err(PlayStatsError::InvalidInput(format!("unknown gender '{}'", s))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => write!(f, "Female"),
            Gender::Male => write!(f, "Male"),
        }
    }
}

/// Player location; USA is the baseline category with no indicator column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Europe,
    Other,
    Usa,
}

impl Location {
    /// Indicator pair (europe, other)
    pub fn indicators(&self) -> [f32; 2] {
        match self {
            Location::Europe => [1.0, 0.0],
            Location::Other => [0.0, 1.0],
            Location::Usa => [0.0, 0.0],
        }
    }
}

impl FromStr for Location {
    type Err = PlayStatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "europe" => Ok(Location::Europe),
            "other" => Ok(Location::Other),
            "usa" | "us" => Ok(Location::Usa),
            _ => Err(PlayStatsError::InvalidInput(format!(
                "unknown location '{}' (expected Europe, Other or USA)",
                s
            ))),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Europe => write!(f, "Europe"),
            Location::Other => write!(f, "Other"),
            Location::Usa => write!(f, "USA"),
        }
    }
}

/// Favourite game genre. Only RPG, Simulation and Sports have indicator columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Rpg,
    Simulation,
    Sports,
    Strategy,
}

impl Genre {
    /// Indicator triple (rpg, simulation, sports)
    pub fn indicators(&self) -> [f32; 3] {
        match self {
            Genre::Rpg => [1.0, 0.0, 0.0],
            Genre::Simulation => [0.0, 1.0, 0.0],
            Genre::Sports => [0.0, 0.0, 1.0],
            Genre::Action | Genre::Strategy => [0.0, 0.0, 0.0],
        }
    }
}

impl FromStr for Genre {
    type Err = PlayStatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "action" => Ok(Genre::Action),
            "rpg" => Ok(Genre::Rpg),
            "simulation" => Ok(Genre::Simulation),
            "sports" => Ok(Genre::Sports),
            "strategy" => Ok(Genre::Strategy),
            _ => Err(PlayStatsError::InvalidInput(format!("unknown game genre '{}'", s))),
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Genre::Action => write!(f, "Action"),
            Genre::Rpg => write!(f, "RPG"),
            Genre::Simulation => write!(f, "Simulation"),
            Genre::Sports => write!(f, "Sports"),
            Genre::Strategy => write!(f, "Strategy"),
        }
    }
}

/// Player attributes fed to the engagement classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlayerProfile {
    pub age: u32,
    /// Average play time per session, in hours
    pub play_time_hours: f32,
    /// 0 or 1
    pub in_game_purchases: u8,
    pub difficulty: Difficulty,
    pub sessions_per_week: u32,
    pub avg_session_minutes: u32,
    pub player_level: u32,
    pub achievements_unlocked: u32,
    pub gender: Gender,
    pub location: Location,
    pub genre: Genre,
}

impl Default for RawPlayerProfile {
    fn default() -> Self {
        RawPlayerProfile {
            age: 25,
            play_time_hours: 5.0,
            in_game_purchases: 0,
            difficulty: Difficulty::Easy,
            sessions_per_week: 5,
            avg_session_minutes: 90,
            player_level: 20,
            achievements_unlocked: 10,
            gender: Gender::Female,
            location: Location::Usa,
            genre: Genre::Action,
        }
    }
}

impl RawPlayerProfile {
    pub const AGE_RANGE: (u32, u32) = (10, 60);
    pub const PLAY_TIME_RANGE: (f32, f32) = (0.0, 20.0);
    pub const SESSIONS_RANGE: (u32, u32) = (1, 30);
    pub const DURATION_RANGE: (u32, u32) = (10, 300);
    pub const LEVEL_RANGE: (u32, u32) = (1, 100);
    pub const ACHIEVEMENTS_RANGE: (u32, u32) = (0, 100);

    /// Check every field against the ranges the input form allows
    pub fn validate(&self) -> Result<()> {
        check_range("age", self.age, Self::AGE_RANGE)?;
        if !(Self::PLAY_TIME_RANGE.0..=Self::PLAY_TIME_RANGE.1).contains(&self.play_time_hours) {
            return Err(PlayStatsError::InvalidInput(format!(
                "play time {} outside [{}, {}]",
                self.play_time_hours,
                Self::PLAY_TIME_RANGE.0,
                Self::PLAY_TIME_RANGE.1
            )));
        }
        if self.in_game_purchases > 1 {
            return Err(PlayStatsError::InvalidInput(format!(
                "in-game purchases must be 0 or 1, got {}",
                self.in_game_purchases
            )));
        }
        check_range("sessions per week", self.sessions_per_week, Self::SESSIONS_RANGE)?;
        check_range("session duration", self.avg_session_minutes, Self::DURATION_RANGE)?;
        check_range("player level", self.player_level, Self::LEVEL_RANGE)?;
        check_range("achievements", self.achievements_unlocked, Self::ACHIEVEMENTS_RANGE)?;
        Ok(())
    }
}

fn check_range(field: &str, value: u32, (lo, hi): (u32, u32)) -> Result<()> {
    if value < lo || value > hi {
        return Err(PlayStatsError::InvalidInput(format!(
            "{} {} outside [{}, {}]",
            field, value, lo, hi
        )));
    }
    Ok(())
}
