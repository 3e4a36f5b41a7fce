// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses command line arguments with `clap` and hands each
// stage to its use case in Layer 2. The only printing in the
// program happens here.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EmbedArgs, PredictArgs, PreprocessArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "review-rating",
    version = "0.1.0",
    about = "Normalise movie reviews, build rating datasets and train a star-rating classifier."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch the subcommand to its use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Preprocess(args) => run_preprocess(args),
            Commands::Embed(args)      => run_embed(args),
            Commands::Train(args)      => run_train(args),
            Commands::Predict(args)    => run_predict(args),
        }
    }
}

fn run_preprocess(args: PreprocessArgs) -> Result<()> {
    use crate::application::preprocess_use_case::PreprocessUseCase;

    let output = args.output.clone();
    let stats  = PreprocessUseCase::new(args.into()).execute()?;

    println!(
        "Kept {} of {} reviews ({} dropped). Written to {}",
        stats.kept,
        stats.seen,
        stats.dropped(),
        output
    );
    Ok(())
}

fn run_embed(args: EmbedArgs) -> Result<()> {
    use crate::application::embed_use_case::EmbedUseCase;

    let vectors = args.vectors.clone();
    let written = EmbedUseCase::new(args.into()).execute()?;

    println!("Embedded {} reviews into {}", written, vectors);
    Ok(())
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on '{}'", args.data);
    let model_dir = args.model_dir.clone();
    let report    = TrainUseCase::new(args.into()).execute()?;

    println!(
        "Training complete: {} train / {} val / {} test, {} classes, test accuracy {:.1}%",
        report.train_size,
        report.val_size,
        report.test_size,
        report.num_classes,
        report.test_accuracy * 100.0,
    );
    println!("Model saved in {}", model_dir);
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let text       = args.text.clone();
    let use_case   = PredictUseCase::new(args.into())?;
    let prediction = use_case.predict(&text)?;

    println!("\nPredicted stars: {}", prediction.stars);
    for (stars, p) in prediction.probabilities.iter().enumerate() {
        println!("  {stars}: {:.1}%", p * 100.0);
    }
    Ok(())
}
