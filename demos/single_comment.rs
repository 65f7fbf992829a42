use emoji_sentiment::error::Result;
use emoji_sentiment::sentiment::{normalize, SentimentScorerBuilder, StarModel};

fn main() -> Result<()> {
    println!("Building scorer...");

    let scorer = SentimentScorerBuilder::bert(StarModel::MultilingualUncased).build()?;

    println!("Scorer built successfully.");

    let comments = [
        "¡Me encanta este producto! 😍",
        "No funciona como esperaba 😠",
        "Llegó el paquete ayer",
    ];

    for comment in comments {
        let score = scorer.score(comment);
        println!("\n=== {comment} ===");
        println!("Model input: \"{}\"", normalize(comment));
        println!(
            "Sentiment: {} (confidence: {:.4})",
            score.label, score.confidence
        );
        for (label, weight) in score.probabilities.iter() {
            println!("- {label}: {weight:.4}");
        }
    }

    Ok(())
}
