//! Classifier training
//!
//! Produces the classifier and label encoder artifacts from a labelled CSV.

pub mod dataset;
pub mod metrics;
pub mod trainer;

pub use dataset::EngagementDataset;
pub use metrics::{Metrics, TrainingHistory};
pub use trainer::EngagementTrainer;
