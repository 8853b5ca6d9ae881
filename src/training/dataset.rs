//! Labelled engagement dataset for classifier training

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::features::{FeatureVector, RawPlayerProfile};
use crate::model::LabelEncoder;
use crate::{PlayStatsError, Result};

/// One row of the behaviour survey CSV
#[derive(Debug, Clone, Deserialize)]
struct EngagementRecord {
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "GameGenre")]
    genre: String,
    #[serde(rename = "PlayTimeHours")]
    play_time_hours: f32,
    #[serde(rename = "InGamePurchases")]
    in_game_purchases: u8,
    #[serde(rename = "GameDifficulty")]
    difficulty: String,
    #[serde(rename = "SessionsPerWeek")]
    sessions_per_week: u32,
    #[serde(rename = "AvgSessionDurationMinutes")]
    avg_session_minutes: u32,
    #[serde(rename = "PlayerLevel")]
    player_level: u32,
    #[serde(rename = "AchievementsUnlocked")]
    achievements_unlocked: u32,
    #[serde(rename = "EngagementLevel")]
    engagement_level: String,
}

impl EngagementRecord {
    fn to_profile(&self) -> Result<RawPlayerProfile> {
        Ok(RawPlayerProfile {
            age: self.age,
            play_time_hours: self.play_time_hours,
            in_game_purchases: self.in_game_purchases,
            difficulty: self.difficulty.parse()?,
            sessions_per_week: self.sessions_per_week,
            avg_session_minutes: self.avg_session_minutes,
            player_level: self.player_level,
            achievements_unlocked: self.achievements_unlocked,
            gender: self.gender.parse()?,
            location: self.location.parse()?,
            genre: self.genre.parse()?,
        })
    }
}

/// Encoded features with class indices
#[derive(Debug, Clone)]
pub struct EngagementDataset {
    pub features: Vec<FeatureVector>,
    pub labels: Vec<usize>,
}

impl EngagementDataset {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Labels as the integer type burn expects for targets
    pub fn labels_i64(&self) -> Vec<i64> {
        self.labels.iter().map(|&l| l as i64).collect()
    }

    /// Shuffle with a fixed seed and split off `validation_fraction` of rows
    pub fn split(self, validation_fraction: f64, seed: u64) -> (Self, Self) {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let n_val = ((self.len() as f64) * validation_fraction.clamp(0.0, 1.0)).round() as usize;
        let (val_idx, train_idx) = indices.split_at(n_val);

        let pick = |idx: &[usize]| EngagementDataset {
            features: idx.iter().map(|&i| self.features[i].clone()).collect(),
            labels: idx.iter().map(|&i| self.labels[i]).collect(),
        };
        (pick(train_idx), pick(val_idx))
    }
}

/// Read a labelled CSV, fit the label encoder and encode every usable row.
///
/// Rows with categories the encoder does not know are skipped with a warning.
pub fn load_from_reader<R: Read>(rdr: R) -> Result<(EngagementDataset, LabelEncoder)> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut samples = Vec::new();
    let mut skipped = 0usize;

    for (line, result) in reader.deserialize::<EngagementRecord>().enumerate() {
        let record = result?;
        let encoded = record
            .to_profile()
            .and_then(|profile| FeatureVector::encode(&profile));
        match encoded {
            Ok(features) => samples.push((features, record.engagement_level)),
            Err(PlayStatsError::InvalidInput(msg)) => {
                log::warn!("Skipping row {}: {}", line + 1, msg);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if samples.is_empty() {
        return Err(PlayStatsError::InvalidInput(
            "training CSV contains no usable rows".to_string(),
        ));
    }
    if skipped > 0 {
        log::warn!("Skipped {} rows with unrecognized categories", skipped);
    }

    let encoder = LabelEncoder::fit(samples.iter().map(|(_, label)| label.as_str()));
    let labels = samples
        .iter()
        .map(|(_, label)| encoder.transform(label))
        .collect::<Result<Vec<_>>>()?;
    let features = samples.into_iter().map(|(f, _)| f).collect();

    Ok((EngagementDataset { features, labels }, encoder))
}

pub fn load_csv(path: &Path) -> Result<(EngagementDataset, LabelEncoder)> {
    let file = std::fs::File::open(path)?;
    let (dataset, encoder) = load_from_reader(file)?;
    log::info!(
        "Loaded {} training rows from {} ({} classes)",
        dataset.len(),
        path.display(),
        encoder.len()
    );
    Ok((dataset, encoder))
}
