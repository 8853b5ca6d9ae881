//! Feature extraction and encoding
//!
//! Converts a raw player profile into model-ready features.

pub mod profile;
pub mod vector;

pub use profile::{Difficulty, Gender, Genre, Location, RawPlayerProfile};
pub use vector::FeatureVector;
