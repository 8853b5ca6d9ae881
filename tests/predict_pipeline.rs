use std::collections::HashMap;

use burn::backend::NdArray;
use playstats::artifacts::{ArtifactLoader, Fetcher};
use playstats::features::{Difficulty, FeatureVector, RawPlayerProfile};
use playstats::model::{Classifier, EngagementNet, EngagementNetConfig, LabelEncoder};
use playstats::predict::Predictor;
use playstats::{ArtifactConfig, ClassifierConfig, PlayStatsError, Result};

type TestBackend = NdArray<f32>;

/// Serves artifact bytes from memory keyed by remote ID
struct MemoryFetcher {
    blobs: HashMap<String, Vec<u8>>,
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, remote_id: &str) -> Result<Vec<u8>> {
        self.blobs
            .get(remote_id)
            .cloned()
            .ok_or_else(|| PlayStatsError::Inference(format!("no blob {}", remote_id)))
    }
}

fn classifier_config() -> ClassifierConfig {
    ClassifierConfig {
        hidden_dims: vec![8],
        dropout: 0.0,
    }
}

#[test]
fn test_fetch_load_and_predict() {
    let source = tempfile::tempdir().unwrap();
    let encoder = LabelEncoder::fit(["Low", "Medium", "High"]);
    let encoder_src = source.path().join("encoder.json");
    encoder.save(&encoder_src).unwrap();

    let net_config = EngagementNetConfig::from_config(&classifier_config(), encoder.len());
    let model_src = source.path().join("net");
    EngagementNet::<TestBackend>::new(&Default::default(), &net_config)
        .save(model_src.to_str().unwrap())
        .unwrap();

    let mut blobs = HashMap::new();
    blobs.insert(
        "model-id".to_string(),
        std::fs::read(source.path().join("net.mpk")).unwrap(),
    );
    blobs.insert("encoder-id".to_string(), std::fs::read(&encoder_src).unwrap());

    let target = tempfile::tempdir().unwrap();
    let config = ArtifactConfig {
        model_id: "model-id".to_string(),
        encoder_id: "encoder-id".to_string(),
        model_path: target.path().join("model/net").to_str().unwrap().to_string(),
        encoder_path: target
            .path()
            .join("model/encoder.json")
            .to_str()
            .unwrap()
            .to_string(),
        url_template: "memory://{id}".to_string(),
    };
    let loader = ArtifactLoader::new(MemoryFetcher { blobs }, config);
    assert_eq!(loader.ensure_present().unwrap(), 2);
    assert_eq!(loader.ensure_present().unwrap(), 0);

    let predictor = loader
        .load::<TestBackend>(&classifier_config(), Default::default())
        .unwrap()
        .into_predictor();
    assert_eq!(predictor.encoder().classes(), &["High", "Low", "Medium"]);

    let profile = RawPlayerProfile {
        age: 30,
        difficulty: Difficulty::Hard,
        ..Default::default()
    };
    let pred = predictor.predict(&profile).unwrap();
    assert_eq!(pred.shape, (1, FeatureVector::DIM));
    assert!(predictor.encoder().classes().contains(&pred.label));
}

/// Always answers with the class that matches the session count bucket
struct SessionsRule;

impl Classifier for SessionsRule {
    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<usize>> {
        Ok(batch
            .iter()
            .map(|f| match f.as_slice()[3] {
                s if s >= 12.0 => 0,
                s if s <= 3.0 => 1,
                _ => 2,
            })
            .collect())
    }
}

#[test]
fn test_predictor_sees_raw_sessions() {
    let predictor = Predictor::new(
        SessionsRule,
        LabelEncoder::fit(["High", "Low", "Medium"]),
    );

    let busy = RawPlayerProfile {
        sessions_per_week: 20,
        ..Default::default()
    };
    let idle = RawPlayerProfile {
        sessions_per_week: 1,
        ..Default::default()
    };

    assert_eq!(predictor.predict(&busy).unwrap().label, "High");
    assert_eq!(predictor.predict(&idle).unwrap().label, "Low");
    assert_eq!(
        predictor.predict(&RawPlayerProfile::default()).unwrap().label,
        "Medium"
    );
}
