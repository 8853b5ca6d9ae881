//! Full-batch trainer for the engagement classifier

use burn::module::AutodiffModule;
use burn::nn::loss::CrossEntropyLossConfig;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::tensor::backend::{AutodiffBackend, Backend};
use burn::tensor::{ElementConversion, Int, Tensor, TensorData};

use super::dataset::EngagementDataset;
use super::metrics::{Metrics, TrainingHistory};
use crate::model::classifier::batch_to_tensor;
use crate::model::{EngagementNet, EngagementNetConfig};
use crate::{PlayStatsError, Result, TrainingConfig};

/// Trainer for the engagement network.
///
/// Features are fed raw, exactly as the predictor will see them.
pub struct EngagementTrainer<B: AutodiffBackend> {
    model: EngagementNet<B>,
    optimizer: burn::optim::adaptor::OptimizerAdaptor<burn::optim::Adam, EngagementNet<B>, B>,
    learning_rate: f64,
    device: B::Device,
}

impl<B: AutodiffBackend> EngagementTrainer<B> {
    pub fn new(device: B::Device, config: &EngagementNetConfig, learning_rate: f64) -> Self {
        let model = EngagementNet::new(&device, config);
        let optimizer = AdamConfig::new().init();

        EngagementTrainer {
            model,
            optimizer,
            learning_rate,
            device,
        }
    }

    /// Train and return the best model by validation accuracy
    pub fn train(
        mut self,
        train: &EngagementDataset,
        val: &EngagementDataset,
        config: &TrainingConfig,
    ) -> Result<(EngagementNet<B::InnerBackend>, TrainingHistory)> {
        if train.is_empty() {
            return Err(PlayStatsError::InvalidInput(
                "training split is empty".to_string(),
            ));
        }
        // Tiny datasets may leave nothing for validation
        let val = if val.is_empty() {
            log::warn!("Validation split is empty, evaluating on the training split");
            train
        } else {
            val
        };

        log::info!(
            "Training on {} rows, validating on {} rows",
            train.len(),
            val.len()
        );

        let x_train = batch_to_tensor::<B>(&train.features, &self.device);
        let y_train = Tensor::<B, 1, Int>::from_data(
            TensorData::new(train.labels_i64(), [train.len()]),
            &self.device,
        );
        let x_val = batch_to_tensor::<B::InnerBackend>(&val.features, &self.device);
        let loss_fn = CrossEntropyLossConfig::new().init(&self.device);

        let mut history = TrainingHistory::new();
        let mut best_model = self.model.valid();

        log::info!("Starting training for {} epochs", config.epochs);

        for epoch in 0..config.epochs {
            let logits = self.model.forward(x_train.clone());
            let train_pred = predicted_classes(logits.clone());
            let loss = loss_fn.forward(logits, y_train.clone());
            let loss_val: f32 = loss.clone().into_scalar().elem();

            let grads = loss.backward();
            let grads_params = GradientsParams::from_grads(grads, &self.model);
            self.model = self
                .optimizer
                .step(self.learning_rate, self.model, grads_params);

            let mut train_metrics = Metrics::new();
            train_metrics.update(loss_val, &train_pred, &train.labels);

            let valid_model = self.model.valid();
            let val_pred = valid_model.predict_classes(x_val.clone());
            let mut val_metrics = Metrics::new();
            val_metrics.update(0.0, &val_pred, &val.labels);

            if history.record_epoch(epoch, &train_metrics, &val_metrics) {
                best_model = valid_model;
                log::debug!(
                    "  New best model (val_acc: {:.1}%)",
                    val_metrics.accuracy() * 100.0
                );
            }

            if epoch % 10 == 0 || epoch + 1 == config.epochs {
                log::info!(
                    "Epoch {}/{}: loss={:.4}, train_acc={:.1}%, val_acc={:.1}%",
                    epoch + 1,
                    config.epochs,
                    loss_val,
                    train_metrics.accuracy() * 100.0,
                    val_metrics.accuracy() * 100.0
                );
            }

            if history.should_early_stop(config.early_stopping_patience) {
                log::info!(
                    "Early stopping at epoch {} (best epoch {})",
                    epoch + 1,
                    history.best_epoch + 1
                );
                break;
            }
        }

        Ok((best_model, history))
    }
}

fn predicted_classes<B: Backend>(logits: Tensor<B, 2>) -> Vec<usize> {
    logits
        .argmax(1)
        .into_data()
        .iter::<i64>()
        .map(|i| i as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classifier, LabelEncoder, NetClassifier};
    use crate::predict::Predictor;
    use crate::training::dataset::{load_from_reader, tests::SAMPLE};
    use burn::backend::{Autodiff, NdArray};

    type TestBackend = Autodiff<NdArray<f32>>;

    fn config(epochs: usize) -> TrainingConfig {
        TrainingConfig {
            epochs,
            learning_rate: 1e-2,
            validation_fraction: 0.3,
            seed: 1,
            early_stopping_patience: 0,
        }
    }

    #[test]
    fn test_train_records_history() {
        let (dataset, encoder) = load_from_reader(SAMPLE.as_bytes()).unwrap();
        let (train, val) = dataset.split(0.3, 1);

        let device = Default::default();
        let net_config = EngagementNetConfig::new(vec![16], encoder.len(), 0.0);
        let trainer = EngagementTrainer::<TestBackend>::new(device, &net_config, 1e-2);
        let (model, history) = trainer.train(&train, &val, &config(5)).unwrap();

        assert_eq!(history.train_losses.len(), 5);
        assert!(history.train_losses.iter().all(|l| l.is_finite()));
        assert!(history.best_epoch < 5);

        let classifier = NetClassifier::new(model, Default::default());
        let classes = classifier.predict(&val.features).unwrap();
        assert!(classes.iter().all(|&c| c < encoder.len()));
    }

    #[test]
    fn test_empty_validation_falls_back_to_train() {
        let (dataset, encoder) = load_from_reader(SAMPLE.as_bytes()).unwrap();
        let (train, val) = dataset.split(0.0, 1);
        assert!(val.is_empty());

        let device = Default::default();
        let net_config = EngagementNetConfig::new(vec![8], encoder.len(), 0.0);
        let trainer = EngagementTrainer::<TestBackend>::new(device, &net_config, 1e-2);
        let (model, history) = trainer.train(&train, &val, &config(2)).unwrap();
        assert_eq!(history.val_accuracies.len(), 2);

        let predictor = Predictor::new(
            NetClassifier::new(model, Default::default()),
            LabelEncoder::new(encoder.classes().to_vec()),
        );
        let pred = predictor
            .predict(&crate::features::RawPlayerProfile::default())
            .unwrap();
        assert!(encoder.classes().contains(&pred.label));
    }
}
