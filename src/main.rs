use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use emoji_sentiment::batch::{analyze_file, default_output_path, BatchOutput};
use emoji_sentiment::sentiment::{
    SentimentLabel, SentimentScorer, SentimentScorerBuilder, StarModel, StarRatingModel,
};

const PREVIEW_ROWS: usize = 10;

#[derive(Parser)]
#[command(name = "emoji-sentiment")]
#[command(about = "Classify comments (emoji included) as negative, neutral or positive", long_about = None)]
struct Cli {
    /// Hugging Face repo of the 1-5 star rating model
    #[arg(long, env = "EMOJI_SENTIMENT_MODEL", global = true)]
    model: Option<String>,

    /// Run on this CUDA device instead of the CPU
    #[arg(long, env = "EMOJI_SENTIMENT_CUDA", global = true)]
    cuda: Option<usize>,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Annotate every comment of a CSV file
    Analyze {
        /// CSV file with a header row
        input: PathBuf,

        /// Column holding the comments (detected when omitted)
        #[arg(short, long)]
        column: Option<String>,

        /// Where to write the results (default: sentiment_<input> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Analyze a single comment
    Test {
        /// The comment to analyze
        comment: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let model = cli
        .model
        .as_deref()
        .map(StarModel::from)
        .unwrap_or_default();
    let mut builder = SentimentScorerBuilder::bert(model);
    if let Some(index) = cli.cuda {
        builder = builder.cuda(index);
    }
    let scorer = builder
        .build()
        .context("Could not load the sentiment model")?;

    match cli.command {
        Command::Analyze {
            input,
            column,
            output,
        } => {
            let result = analyze_file(&scorer, &input, column.as_deref())
                .with_context(|| format!("Failed to analyze '{}'", input.display()))?;
            let output = output.unwrap_or_else(|| default_output_path(&input));
            result
                .table
                .write_csv(&output)
                .with_context(|| format!("Failed to write '{}'", output.display()))?;

            print_report(&result);
            println!("\nResults written to {}", output.display());
        }
        Command::Test { comment } => print_single(&scorer, &comment),
    }

    Ok(())
}

fn print_report(result: &BatchOutput) {
    println!("Using column '{}' for the comments.", result.comment_column);

    println!("\nPreview of the results");
    println!("{}", result.table.headers().join(" | "));
    for row in result.table.rows().iter().take(PREVIEW_ROWS) {
        println!("{}", row.join(" | "));
    }

    println!("\nSentiment distribution:");
    for (label, count) in result.summary.counts() {
        println!(
            "- {label}: {count} ({:.2}%)",
            result.summary.percentage(label)
        );
    }

    println!(
        "\nAnalyzed {} comments in {:.2}s",
        result.stats.items_processed,
        result.stats.total_time.as_secs_f64()
    );
}

fn print_single<M: StarRatingModel>(scorer: &SentimentScorer<M>, comment: &str) {
    let score = scorer.score(comment);
    println!(
        "Sentiment: {} (confidence: {:.4})",
        score.label, score.confidence
    );
    println!("Probabilities:");
    for label in SentimentLabel::ALL {
        println!("- {label}: {:.4}", score.probabilities.get(label));
    }
}
