//! Load classifier and label encoder, fetching them first if needed

use burn::tensor::backend::Backend;
use std::path::PathBuf;

use super::{ensure_local, Fetcher};
use crate::model::{EngagementNet, EngagementNetConfig, LabelEncoder, NetClassifier};
use crate::predict::Predictor;
use crate::{ArtifactConfig, ClassifierConfig, Result};

/// Both artifacts, deserialized and ready for inference
pub struct LoadedArtifacts<B: Backend> {
    pub classifier: NetClassifier<B>,
    pub encoder: LabelEncoder,
}

impl<B: Backend> LoadedArtifacts<B> {
    pub fn into_predictor(self) -> Predictor<NetClassifier<B>> {
        Predictor::new(self.classifier, self.encoder)
    }
}

/// Resolves artifact locations from config and materializes them
pub struct ArtifactLoader<F: Fetcher> {
    fetcher: F,
    config: ArtifactConfig,
}

impl<F: Fetcher> ArtifactLoader<F> {
    pub fn new(fetcher: F, config: ArtifactConfig) -> Self {
        ArtifactLoader { fetcher, config }
    }

    /// On-disk model file (burn adds the `.mpk` extension)
    pub fn model_file(&self) -> PathBuf {
        PathBuf::from(format!("{}.mpk", self.config.model_path))
    }

    pub fn encoder_file(&self) -> PathBuf {
        PathBuf::from(&self.config.encoder_path)
    }

    /// Make sure both artifacts exist locally. Returns how many were downloaded.
    pub fn ensure_present(&self) -> Result<usize> {
        Ok(self.fetch_missing()?.len())
    }

    /// Local paths downloaded by this call
    fn fetch_missing(&self) -> Result<Vec<PathBuf>> {
        let wanted = [
            (&self.config.model_id, self.model_file()),
            (&self.config.encoder_id, self.encoder_file()),
        ];
        let mut fetched = Vec::new();
        for (remote_id, path) in wanted {
            if ensure_local(&self.fetcher, remote_id, &path)? {
                fetched.push(path);
            }
        }
        Ok(fetched)
    }

    /// Fetch if absent, then deserialize both artifacts.
    ///
    /// Files downloaded by this call are removed again when they fail to
    /// deserialize, so the next run fetches fresh copies.
    pub fn load<B: Backend>(
        &self,
        classifier: &ClassifierConfig,
        device: B::Device,
    ) -> Result<LoadedArtifacts<B>>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        let fetched = self.fetch_missing()?;

        match self.read_local::<B>(classifier, device) {
            Ok(loaded) => Ok(loaded),
            Err(e) => {
                for path in &fetched {
                    log::warn!("Discarding unreadable download {}", path.display());
                    if let Err(err) = std::fs::remove_file(path) {
                        log::warn!("Could not remove {}: {}", path.display(), err);
                    }
                }
                Err(e)
            }
        }
    }

    fn read_local<B: Backend>(
        &self,
        classifier: &ClassifierConfig,
        device: B::Device,
    ) -> Result<LoadedArtifacts<B>>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        let encoder = LabelEncoder::load(&self.encoder_file())?;
        let net_config = EngagementNetConfig::from_config(classifier, encoder.len());
        let model = EngagementNet::<B>::load(&device, &self.config.model_path, &net_config)?;

        log::info!(
            "Loaded classifier ({} classes: {})",
            encoder.len(),
            encoder.classes().join(", ")
        );

        Ok(LoadedArtifacts {
            classifier: NetClassifier::new(model, device),
            encoder,
        })
    }
}
