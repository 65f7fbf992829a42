use emoji_sentiment::batch::{analyze_file, default_output_path};
use emoji_sentiment::error::Result;
use emoji_sentiment::sentiment::{SentimentLabel, SentimentScorerBuilder, StarModel};

fn main() -> Result<()> {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "comments.csv".to_string());

    let scorer = SentimentScorerBuilder::bert(StarModel::default()).build()?;
    let output = analyze_file(&scorer, &input, None)?;

    println!("Column: {}", output.comment_column);
    for label in SentimentLabel::ALL {
        println!(
            "{label}: {} ({:.2}%)",
            output.summary.count(label),
            output.summary.percentage(label)
        );
    }
    println!(
        "Completed in {:.2}ms ({:.2}ms per comment)",
        output.stats.total_time.as_secs_f64() * 1000.0,
        output.stats.time_per_item().as_secs_f64() * 1000.0
    );

    let path = default_output_path(&input);
    output.table.write_csv(&path)?;
    println!("Wrote {}", path.display());

    Ok(())
}
