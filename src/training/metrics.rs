//! Training metrics and evaluation

use std::fmt;

/// Metrics for one pass over a split
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    pub total_loss: f64,
    pub correct: usize,
    pub total_predictions: usize,
    pub batch_count: usize,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update metrics with a batch result
    pub fn update(&mut self, loss: f32, predicted: &[usize], targets: &[usize]) {
        self.total_loss += loss as f64;
        self.correct += predicted
            .iter()
            .zip(targets.iter())
            .filter(|(p, t)| p == t)
            .count();
        self.total_predictions += targets.len();
        self.batch_count += 1;
    }

    pub fn avg_loss(&self) -> f64 {
        if self.batch_count == 0 {
            0.0
        } else {
            self.total_loss / self.batch_count as f64
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.total_predictions == 0 {
            0.0
        } else {
            self.correct as f64 / self.total_predictions as f64
        }
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loss: {:.4} | Acc: {:.2}%",
            self.avg_loss(),
            self.accuracy() * 100.0
        )
    }
}

/// Training history for tracking progress
#[derive(Debug, Clone, Default)]
pub struct TrainingHistory {
    pub train_losses: Vec<f64>,
    pub train_accuracies: Vec<f64>,
    pub val_accuracies: Vec<f64>,
    pub best_val_accuracy: f64,
    pub best_epoch: usize,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an epoch. Returns true when validation accuracy improved.
    pub fn record_epoch(&mut self, epoch: usize, train: &Metrics, val: &Metrics) -> bool {
        self.train_losses.push(train.avg_loss());
        self.train_accuracies.push(train.accuracy());
        self.val_accuracies.push(val.accuracy());

        let improved = self.val_accuracies.len() == 1 || val.accuracy() > self.best_val_accuracy;
        if improved {
            self.best_val_accuracy = val.accuracy();
            self.best_epoch = epoch;
        }
        improved
    }

    /// Check if we should early stop
    pub fn should_early_stop(&self, patience: usize) -> bool {
        if patience == 0 || self.val_accuracies.is_empty() {
            return false;
        }
        let current_epoch = self.val_accuracies.len() - 1;
        current_epoch - self.best_epoch >= patience
    }
}
