use super::label::{classify, normalize_score, synthesize_probabilities, ProbabilityTriple};
use super::model::{StarDistribution, StarRatingModel};
use super::normalize::{normalize, Comment};
use super::SentimentLabel;
use crate::error::Result;

// ============ Output types ============

/// Sentiment of one comment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    /// Predicted class.
    pub label: SentimentLabel,
    /// Weighted star score rescaled to [0, 1].
    pub confidence: f64,
    /// Heuristic display weights per class.
    pub probabilities: ProbabilityTriple,
}

impl SentimentScore {
    /// The neutral guess used for blank comments and failed model calls.
    pub const NEUTRAL_DEFAULT: SentimentScore = SentimentScore {
        label: SentimentLabel::Neutral,
        confidence: 0.5,
        probabilities: ProbabilityTriple::UNDECIDED,
    };

    /// Derive label, confidence and weights from a weighted star score in [1, 5].
    pub fn from_star_score(score: f64) -> Self {
        let confidence = normalize_score(score);
        let label = classify(score);
        Self {
            label,
            confidence,
            probabilities: synthesize_probabilities(label, confidence),
        }
    }
}

// ============ Scorer ============

/// Scores comments with a [`StarRatingModel`].
///
/// The model is owned by (or borrowed from) the caller, so one loaded model
/// can back any number of scorers. Build with
/// [`SentimentScorerBuilder`](super::SentimentScorerBuilder) or inject one with
/// [`SentimentScorer::new`].
///
/// # Examples
///
/// ```rust
/// use emoji_sentiment::error::Result;
/// use emoji_sentiment::sentiment::{SentimentLabel, SentimentScorer, StarRatingModel, StarScore};
///
/// struct AlwaysFive;
///
/// impl StarRatingModel for AlwaysFive {
///     fn rate(&self, _text: &str) -> Result<Vec<StarScore>> {
///         Ok(vec![StarScore::new("5 stars", 1.0)])
///     }
/// }
///
/// let scorer = SentimentScorer::new(AlwaysFive);
/// let score = scorer.score("¡Me encanta este producto! 😍");
/// assert_eq!(score.label, SentimentLabel::Positive);
/// assert_eq!(score.confidence, 1.0);
/// ```
pub struct SentimentScorer<M: StarRatingModel> {
    pub(crate) model: M,
}

impl<M: StarRatingModel> SentimentScorer<M> {
    /// Wrap an already loaded model.
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Score a comment, never failing.
    ///
    /// Blank or non-text comments get [`SentimentScore::NEUTRAL_DEFAULT`]
    /// without calling the model. If the model call fails the error is logged
    /// and the same neutral default is returned.
    pub fn score<'a>(&self, comment: impl Into<Comment<'a>>) -> SentimentScore {
        self.try_score(comment).unwrap_or_else(|e| {
            tracing::error!(error = %e, "sentiment analysis failed, falling back to neutral");
            SentimentScore::NEUTRAL_DEFAULT
        })
    }

    /// Score a comment, returning model failures instead of degrading them.
    ///
    /// # Errors
    ///
    /// Returns the model's error, or [`PipelineError::Model`](crate::error::PipelineError::Model)
    /// if the output is not a star distribution.
    pub fn try_score<'a>(&self, comment: impl Into<Comment<'a>>) -> Result<SentimentScore> {
        let comment = comment.into();
        let text = match comment.as_text() {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Ok(SentimentScore::NEUTRAL_DEFAULT),
        };

        let processed = normalize(comment);
        let scores = self.model.rate(&processed)?;
        let distribution = StarDistribution::from_scores(&scores)?;
        let score = SentimentScore::from_star_score(distribution.weighted_score());

        tracing::debug!(
            text = %truncate(text, 50),
            stars = distribution.weighted_score(),
            label = %score.label,
            "scored comment"
        );
        Ok(score)
    }

    /// The underlying model.
    pub fn model(&self) -> &M {
        &self.model
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
