use burn::{
    nn::{Dropout, DropoutConfig, Linear, LinearConfig},
    prelude::*,
    tensor::activation::{log_softmax, relu},
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct RatingClassifierConfig {
    pub input_dim:   usize,
    pub num_classes: usize,
    #[config(default = 64)]
    pub hidden_dim:  usize,
    #[config(default = 0.2)]
    pub dropout:     f64,
}

impl RatingClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> RatingClassifier<B> {
        let hidden  = LinearConfig::new(self.input_dim, self.hidden_dim).init(device);
        let output  = LinearConfig::new(self.hidden_dim, self.num_classes).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        RatingClassifier { hidden, output, dropout }
    }
}

/// Review vector → hidden (ReLU, dropout) → one logit per star class.
#[derive(Module, Debug)]
pub struct RatingClassifier<B: Backend> {
    pub hidden:  Linear<B>,
    pub output:  Linear<B>,
    pub dropout: Dropout,
}

impl<B: Backend> RatingClassifier<B> {
    /// features: [batch, input_dim] → logits: [batch, num_classes]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = relu(self.hidden.forward(features));
        let x = self.dropout.forward(x);
        self.output.forward(x)
    }

    pub fn forward_loss(
        &self,
        features: Tensor<B, 2>,
        targets:  Tensor<B, 2>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(features);
        let loss   = soft_cross_entropy(logits.clone(), targets);
        (loss, logits)
    }
}

/// Cross-entropy against probability targets (one-hot rows here):
/// mean over the batch of −Σ target · log_softmax(logits).
pub fn soft_cross_entropy<B: Backend>(logits: Tensor<B, 2>, targets: Tensor<B, 2>) -> Tensor<B, 1> {
    (targets * log_softmax(logits, 1)).sum_dim(1).mean().neg()
}

/// Number of rows whose highest logit sits on the target's set bit.
pub fn count_correct<B: Backend>(logits: Tensor<B, 2>, targets: Tensor<B, 2>) -> usize {
    let predicted = logits.argmax(1);
    let expected  = targets.argmax(1);
    let correct: i64 = predicted.equal(expected).int().sum().into_scalar().elem::<i64>();
    correct as usize
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type B = NdArray;

    fn tensor(values: Vec<f32>, rows: usize, cols: usize) -> Tensor<B, 2> {
        Tensor::from_data(TensorData::new(values, [rows, cols]), &Default::default())
    }

    #[test]
    fn test_forward_shape() {
        let cfg   = RatingClassifierConfig::new(4, 6).with_hidden_dim(8);
        let model = cfg.init::<B>(&Default::default());
        let out   = model.forward(tensor(vec![0.5; 12], 3, 4));
        assert_eq!(out.dims(), [3, 6]);
    }

    #[test]
    fn test_config_defaults() {
        let cfg = RatingClassifierConfig::new(300, 6);
        assert_eq!(cfg.hidden_dim, 64);
        assert!((cfg.dropout - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_soft_cross_entropy_uniform_logits() {
        // uniform logits over two classes → loss = ln 2
        let loss: f64 = soft_cross_entropy(
            tensor(vec![0.0, 0.0], 1, 2),
            tensor(vec![1.0, 0.0], 1, 2),
        )
        .into_scalar()
        .elem::<f64>();
        assert!((loss - std::f64::consts::LN_2).abs() < 1e-5);
    }

    #[test]
    fn test_soft_cross_entropy_prefers_correct_logits() {
        let targets = tensor(vec![0.0, 1.0], 1, 2);
        let good: f64 = soft_cross_entropy(tensor(vec![-2.0, 2.0], 1, 2), targets.clone())
            .into_scalar()
            .elem::<f64>();
        let bad: f64 = soft_cross_entropy(tensor(vec![2.0, -2.0], 1, 2), targets)
            .into_scalar()
            .elem::<f64>();
        assert!(good < bad);
    }

    #[test]
    fn test_count_correct() {
        let logits  = tensor(vec![0.9, 0.1, 0.2, 0.8, 0.7, 0.3], 3, 2);
        let targets = tensor(vec![1.0, 0.0, 0.0, 1.0, 0.0, 1.0], 3, 2);
        assert_eq!(count_correct(logits, targets), 2);
    }
}
