//! Comment sentiment scoring.
//!
//! Classify comments (emoji welcome) as `negative`, `neutral` or `positive`
//! using a 1–5 star rating model. Each comment yields a label, a confidence in
//! [0, 1] and three display weights.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use emoji_sentiment::sentiment::{SentimentScorerBuilder, StarModel};
//!
//! # fn main() -> emoji_sentiment::error::Result<()> {
//! let scorer = SentimentScorerBuilder::bert(StarModel::MultilingualUncased).build()?;
//!
//! let score = scorer.score("¡Me encanta este producto! 😍");
//! println!("sentiment: {} (confidence: {:.4})", score.label, score.confidence);
//! for (label, weight) in score.probabilities.iter() {
//!     println!("- {label}: {weight:.4}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Scoring
//!
//! 1. Blank or non-text comments short-circuit to
//!    [`SentimentScore::NEUTRAL_DEFAULT`]; the model is not called.
//! 2. Emoji are replaced by their names ([`normalize`]).
//! 3. The model returns a distribution over `"1 star"` … `"5 stars"`.
//! 4. The expected star count `s` gives the label ([`classify`]) and the
//!    confidence `(s - 1) / 4`.
//! 5. Display weights come from [`synthesize_probabilities`].
//!
//! Model failures never escape [`SentimentScorer::score`]: they are logged
//! and the neutral default is returned.
//!
//! # Custom models
//!
//! Anything implementing [`StarRatingModel`] can be injected with
//! [`SentimentScorer::new`], which is how the tests run without downloading
//! weights.

// ============ Internal API ============

pub(crate) mod builder;
pub(crate) mod label;
pub(crate) mod model;
pub(crate) mod normalize;
pub(crate) mod pipeline;

// ============ Public API ============

pub use crate::models::{BertStarRatingModel, StarModel};
pub use builder::SentimentScorerBuilder;
pub use label::{
    classify, normalize_score, synthesize_probabilities, ProbabilityTriple, SentimentLabel,
};
pub use model::{StarDistribution, StarRatingModel, StarScore};
pub use normalize::{demojize, normalize, Comment};
pub use pipeline::{SentimentScore, SentimentScorer};
