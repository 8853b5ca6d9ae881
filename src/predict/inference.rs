//! Engagement-level inference

use serde::Serialize;

use crate::features::{FeatureVector, RawPlayerProfile};
use crate::model::{Classifier, LabelEncoder};
use crate::{PlayStatsError, Result};

/// Result of a single prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementPrediction {
    pub label: String,
    pub class_index: usize,
    /// Shape of the feature batch that was fed to the classifier
    pub shape: (usize, usize),
}

/// Predictor for engagement levels
///
/// Both artifacts are loaded once and handed in; the predictor never reaches
/// for global state.
pub struct Predictor<C: Classifier> {
    classifier: C,
    encoder: LabelEncoder,
}

impl<C: Classifier> Predictor<C> {
    pub fn new(classifier: C, encoder: LabelEncoder) -> Self {
        Predictor {
            classifier,
            encoder,
        }
    }

    /// Encode a profile and predict its engagement level
    pub fn predict(&self, profile: &RawPlayerProfile) -> Result<EngagementPrediction> {
        let features = FeatureVector::encode(profile)?;
        self.predict_vector(&features)
    }

    /// Predict from an already-encoded vector
    pub fn predict_vector(&self, features: &FeatureVector) -> Result<EngagementPrediction> {
        if features.len() != FeatureVector::DIM {
            return Err(PlayStatsError::ShapeMismatch {
                expected: FeatureVector::DIM,
                actual: features.len(),
            });
        }

        log::debug!("Feature vector: {:?}", features.as_slice());

        let classes = self.classifier.predict(std::slice::from_ref(features))?;
        let class_index = *classes.first().ok_or_else(|| {
            PlayStatsError::Inference("classifier returned no prediction".to_string())
        })?;

        let label = self.encoder.decode(class_index)?.to_string();
        log::info!("Predicted class {} -> {}", class_index, label);

        Ok(EngagementPrediction {
            label,
            class_index,
            shape: features.shape(),
        })
    }

    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }
}

/// Format a prediction for display
pub fn format_prediction(pred: &EngagementPrediction, profile: &RawPlayerProfile) -> String {
    format!(
        r#"
┌─────────────────────────────────────────────────┐
│  Player engagement prediction
├─────────────────────────────────────────────────┤
│  Profile:          age {}, level {}, {} / {} / {}
│  Input shape:      ({}, {})
│  Engagement level: {}
└─────────────────────────────────────────────────┘
"#,
        profile.age,
        profile.player_level,
        profile.difficulty,
        profile.location,
        profile.genre,
        pred.shape.0,
        pred.shape.1,
        pred.label,
    )
}
