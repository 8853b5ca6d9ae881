//! Classifier and label encoder artifacts

pub mod classifier;
pub mod label_encoder;

pub use classifier::{Classifier, EngagementNet, EngagementNetConfig, NetClassifier};
pub use label_encoder::LabelEncoder;
