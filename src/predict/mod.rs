//! Prediction and inference
//!
//! Turn a player profile into an engagement label using loaded artifacts.

pub mod inference;

pub use inference::{EngagementPrediction, Predictor};
