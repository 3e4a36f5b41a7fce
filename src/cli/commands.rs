// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// One subcommand per pipeline stage:
//
//   preprocess → embed → train → predict
//
// Normalisation flags are shared by `preprocess` and `predict`
// so a prediction sees the same token pipeline the model was
// trained on.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::{
    embed_use_case::EmbedConfig,
    predict_use_case::PredictConfig,
    preprocess_use_case::PreprocessConfig,
    train_use_case::TrainConfig,
};
use crate::data::{
    normalizer::{NormalizerConfig, TransformFlags},
    sampler::SamplingMethod,
};
use crate::domain::language::Language;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalise raw TSV reviews into the intermediate JSON file
    Preprocess(PreprocessArgs),

    /// Embed preprocessed reviews into an .npz vector store
    Embed(EmbedArgs),

    /// Train the rating classifier on preprocessed reviews and vectors
    Train(TrainArgs),

    /// Rate a review with a trained model
    Predict(PredictArgs),
}

/// Token pipeline settings
#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    /// Reduce tokens to their Snowball stem
    #[arg(long)]
    pub stemming: bool,

    /// Replace tokens by their lemma (applied before stemming)
    #[arg(long)]
    pub lemmatization: bool,

    #[arg(long)]
    pub remove_stopwords: bool,

    #[arg(long)]
    pub remove_punctuation: bool,

    /// Drop reviews not written in --language
    #[arg(long)]
    pub language_filter: bool,

    /// Review language: de or en
    #[arg(long, default_value = "de")]
    pub language: Language,

    /// Tab-separated `form<TAB>lemma` table used for lemmatization
    #[arg(long)]
    pub lemma_table: Option<String>,
}

impl From<&NormalizeArgs> for NormalizerConfig {
    fn from(a: &NormalizeArgs) -> Self {
        NormalizerConfig {
            flags: TransformFlags {
                stemming:            a.stemming,
                lemmatization:       a.lemmatization,
                stopword_removal:    a.remove_stopwords,
                punctuation_removal: a.remove_punctuation,
            },
            language_filter: a.language_filter,
            language:        a.language,
        }
    }
}

#[derive(Args, Debug)]
pub struct PreprocessArgs {
    /// Raw reviews: url<TAB>stars<TAB>text per line
    #[arg(long)]
    pub input: String,

    /// Where to write the preprocessed JSON
    #[arg(long, default_value = "data/preprocessed.json")]
    pub output: String,

    #[arg(long, default_value_t = '\t')]
    pub delimiter: char,

    #[arg(long, default_value = "utf-8")]
    pub encoding: String,

    #[command(flatten)]
    pub normalize: NormalizeArgs,
}

impl From<PreprocessArgs> for PreprocessConfig {
    fn from(a: PreprocessArgs) -> Self {
        PreprocessConfig {
            normalizer:  NormalizerConfig::from(&a.normalize),
            input_path:  a.input,
            output_path: a.output,
            delimiter:   a.delimiter,
            encoding:    a.encoding,
            lemma_table: a.normalize.lemma_table,
        }
    }
}

#[derive(Args, Debug)]
pub struct EmbedArgs {
    #[arg(long, default_value = "data/preprocessed.json")]
    pub data: String,

    #[arg(long, default_value = "data/vectors.npz")]
    pub vectors: String,

    /// Width of every review vector
    #[arg(long, default_value_t = 300)]
    pub dims: usize,
}

impl From<EmbedArgs> for EmbedConfig {
    fn from(a: EmbedArgs) -> Self {
        EmbedConfig {
            data_path:    a.data,
            vectors_path: a.vectors,
            dims:         a.dims,
        }
    }
}

/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    #[arg(long, default_value = "data/preprocessed.json")]
    pub data: String,

    #[arg(long, default_value = "data/vectors.npz")]
    pub vectors: String,

    /// Directory for weights, configs and metrics.csv
    #[arg(long, default_value = "models")]
    pub model_dir: String,

    #[arg(long, default_value = "rating_classifier")]
    pub model_name: String,

    /// Seed for the split, the sampler and weight initialisation
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Class balancing for the training partition:
    /// none, undersampling, oversampling or mediansampling
    #[arg(long, default_value = "none")]
    pub sampling: SamplingMethod,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    #[arg(long, default_value_t = 64)]
    pub hidden_dim: usize,

    /// Dropout probability on the hidden layer
    #[arg(long, default_value_t = 0.2)]
    pub dropout: f64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:     a.data,
            vectors_path:  a.vectors,
            model_dir:     a.model_dir,
            model_name:    a.model_name,
            seed:          a.seed,
            sampling:      a.sampling,
            batch_size:    a.batch_size,
            epochs:        a.epochs,
            learning_rate: a.lr,
            hidden_dim:    a.hidden_dim,
            dropout:       a.dropout,
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// The review text to rate
    #[arg(long)]
    pub text: String,

    #[arg(long, default_value = "models")]
    pub model_dir: String,

    #[arg(long, default_value = "rating_classifier")]
    pub model_name: String,

    #[command(flatten)]
    pub normalize: NormalizeArgs,
}

impl From<PredictArgs> for PredictConfig {
    fn from(a: PredictArgs) -> Self {
        PredictConfig {
            normalizer:  NormalizerConfig::from(&a.normalize),
            model_dir:   a.model_dir,
            model_name:  a.model_name,
            lemma_table: a.normalize.lemma_table,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_preprocess_flags_reach_config() {
        let cli = Cli::try_parse_from([
            "review-rating", "preprocess", "--input", "r.tsv",
            "--stemming", "--remove-stopwords", "--language", "en",
        ])
        .unwrap();

        let Commands::Preprocess(args) = cli.command else {
            panic!("expected preprocess");
        };
        let cfg = PreprocessConfig::from(args);
        assert_eq!(cfg.input_path, "r.tsv");
        assert_eq!(cfg.delimiter, '\t');
        assert!(cfg.normalizer.flags.stemming);
        assert!(cfg.normalizer.flags.stopword_removal);
        assert!(!cfg.normalizer.flags.lemmatization);
        assert_eq!(cfg.normalizer.language, Language::English);
    }

    #[test]
    fn test_train_sampling_is_parsed() {
        let cli = Cli::try_parse_from(["review-rating", "train", "--sampling", "oversampling"]).unwrap();
        let Commands::Train(args) = cli.command else {
            panic!("expected train");
        };
        let cfg = TrainConfig::from(args);
        assert_eq!(cfg.sampling, SamplingMethod::Oversampling);
        assert_eq!(cfg.seed, 42);
    }

    #[test]
    fn test_unknown_language_is_a_usage_error() {
        let result = Cli::try_parse_from([
            "review-rating", "predict", "--text", "gut", "--language", "xx",
        ]);
        assert!(result.is_err());
    }
}
