//! Fixed-order feature vector consumed by the engagement classifier

use serde::Serialize;

use super::profile::RawPlayerProfile;
use crate::{PlayStatsError, Result};

/// Encoded player profile, one row of classifier input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    values: Vec<f32>,
}

impl FeatureVector {
    /// Number of features the classifier was trained on
    pub const DIM: usize = 16;

    /// Column names in vector order
    pub const NAMES: [&'static str; Self::DIM] = [
        "age",
        "play_time",
        "in_game_purchase",
        "sessions_per_week",
        "avg_duration",
        "level",
        "achievements",
        "difficulty_easy",
        "difficulty_medium",
        "difficulty_hard",
        "gender_male",
        "location_europe",
        "location_other",
        "genre_rpg",
        "genre_simulation",
        "genre_sports",
    ];

    /// Wrap raw values, rejecting anything that is not exactly `DIM` long
    pub fn from_values(values: Vec<f32>) -> Result<Self> {
        if values.len() != Self::DIM {
            return Err(PlayStatsError::ShapeMismatch {
                expected: Self::DIM,
                actual: values.len(),
            });
        }
        Ok(FeatureVector { values })
    }

    /// Encode a profile. No scaling is applied; values go to the model raw.
    pub fn encode(profile: &RawPlayerProfile) -> Result<Self> {
        let mut values = Vec::with_capacity(Self::DIM);
        values.extend([
            profile.age as f32,
            profile.play_time_hours,
            profile.in_game_purchases as f32,
            profile.sessions_per_week as f32,
            profile.avg_session_minutes as f32,
            profile.player_level as f32,
            profile.achievements_unlocked as f32,
        ]);
        values.extend(profile.difficulty.one_hot());
        values.push(profile.gender.is_male());
        values.extend(profile.location.indicators());
        values.extend(profile.genre.indicators());

        Self::from_values(values)
    }

    /// Shape of the single-row batch handed to the classifier
    pub fn shape(&self) -> (usize, usize) {
        (1, self.values.len())
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::profile::{Difficulty, Gender, Genre, Location};

    fn sample_profile() -> RawPlayerProfile {
        RawPlayerProfile {
            age: 34,
            play_time_hours: 7.5,
            in_game_purchases: 1,
            difficulty: Difficulty::Medium,
            sessions_per_week: 12,
            avg_session_minutes: 140,
            player_level: 55,
            achievements_unlocked: 31,
            gender: Gender::Male,
            location: Location::Europe,
            genre: Genre::Simulation,
        }
    }

    #[test]
    fn test_encode_order() {
        let v = FeatureVector::encode(&sample_profile()).unwrap();
        assert_eq!(
            v.as_slice(),
            &[
                34.0, 7.5, 1.0, 12.0, 140.0, 55.0, 31.0, // numeric block
                0.0, 1.0, 0.0, // difficulty
                1.0, // gender_male
                1.0, 0.0, // location
                0.0, 1.0, 0.0, // genre
            ]
        );
    }

    #[test]
    fn test_always_sixteen() {
        for difficulty in Difficulty::ALL {
            for location in [Location::Europe, Location::Other, Location::Usa] {
                let profile = RawPlayerProfile {
                    difficulty,
                    location,
                    ..RawPlayerProfile::default()
                };
                let v = FeatureVector::encode(&profile).unwrap();
                assert_eq!(v.len(), FeatureVector::DIM);
                assert_eq!(v.shape(), (1, 16));
            }
        }
    }

    #[test]
    fn test_difficulty_slot_positions() {
        // Positions 8-10 (1-indexed) hold the difficulty one-hot
        let expected = [
            (Difficulty::Easy, [1.0, 0.0, 0.0]),
            (Difficulty::Medium, [0.0, 1.0, 0.0]),
            (Difficulty::Hard, [0.0, 0.0, 1.0]),
        ];
        for (difficulty, triple) in expected {
            let profile = RawPlayerProfile {
                difficulty,
                ..sample_profile()
            };
            let v = FeatureVector::encode(&profile).unwrap();
            assert_eq!(&v.as_slice()[7..10], &triple);
        }
    }

    #[test]
    fn test_unknown_difficulty_never_encodes() {
        let parsed = "Impossible".parse::<Difficulty>();
        assert!(matches!(parsed, Err(PlayStatsError::InvalidInput(_))));
    }

    #[test]
    fn test_shape_mismatch() {
        let err = FeatureVector::from_values(vec![0.0; 15]).unwrap_err();
        match err {
            PlayStatsError::ShapeMismatch { expected, actual } => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 15);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
