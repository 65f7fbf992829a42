//! Runs the real checkpoint. Downloads ~700MB on first use.
//! Run with: cargo test --features integration

#![cfg(feature = "integration")]

use emoji_sentiment::error::Result;
use emoji_sentiment::sentiment::{
    SentimentLabel, SentimentScorerBuilder, StarModel, StarRatingModel,
};

#[test]
fn returns_five_star_classes() -> Result<()> {
    let model = SentimentScorerBuilder::bert(StarModel::MultilingualUncased).build_model()?;

    let scores = model.rate("I love Rust!")?;
    assert_eq!(scores.len(), 5);
    assert_eq!(scores[0].label, "1 star");
    assert_eq!(scores[4].label, "5 stars");
    let total: f32 = scores.iter().map(|s| s.score).sum();
    assert!((total - 1.0).abs() < 1e-3);
    Ok(())
}

#[test]
fn examples_from_the_instructions() -> Result<()> {
    let scorer = SentimentScorerBuilder::bert(StarModel::MultilingualUncased).build()?;

    let positive = scorer.try_score("¡Me encanta este producto! 😍")?;
    assert_eq!(positive.label, SentimentLabel::Positive);

    let negative = scorer.try_score("No funciona como esperaba 😠")?;
    assert_eq!(negative.label, SentimentLabel::Negative);

    assert!((0.0..=1.0).contains(&positive.confidence));
    assert!((0.0..=1.0).contains(&negative.confidence));
    Ok(())
}

#[cfg(feature = "cuda")]
#[test]
fn cuda_matches_cpu() -> Result<()> {
    let cpu = SentimentScorerBuilder::bert(StarModel::default()).build()?;
    let gpu = SentimentScorerBuilder::bert(StarModel::default())
        .cuda(0)
        .build()?;

    for text in ["Great service 👍", "Awful 😡", "It arrived on Tuesday."] {
        assert_eq!(cpu.score(text).label, gpu.score(text).label);
    }
    Ok(())
}
