use std::sync::Arc;

use crate::error::{PipelineError, Result};

/// One class of a star-rating prediction, e.g. `"4 stars"` with probability `0.31`.
#[derive(Debug, Clone, PartialEq)]
pub struct StarScore {
    /// Class label of the form `"<N> star"` or `"<N> stars"`.
    pub label: String,
    /// Probability of this class.
    pub score: f32,
}

impl StarScore {
    /// Creates a class result.
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// A model that rates text on a 1–5 star scale.
///
/// Implementations return every class with its probability. The crate ships
/// a BERT backend; tests plug in stubs returning fixed distributions.
pub trait StarRatingModel: Send + Sync {
    /// Rate `text`, returning one [`StarScore`] per star class.
    fn rate(&self, text: &str) -> Result<Vec<StarScore>>;
}

impl<M: StarRatingModel + ?Sized> StarRatingModel for &M {
    fn rate(&self, text: &str) -> Result<Vec<StarScore>> {
        (**self).rate(text)
    }
}

impl<M: StarRatingModel + ?Sized> StarRatingModel for Box<M> {
    fn rate(&self, text: &str) -> Result<Vec<StarScore>> {
        (**self).rate(text)
    }
}

impl<M: StarRatingModel + ?Sized> StarRatingModel for Arc<M> {
    fn rate(&self, text: &str) -> Result<Vec<StarScore>> {
        (**self).rate(text)
    }
}

/// Parsed star distribution: `(stars, probability)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct StarDistribution {
    ratings: Vec<(u8, f64)>,
}

impl StarDistribution {
    /// Parse the raw classes returned by a [`StarRatingModel`].
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Model`] if the model returned nothing, or a
    /// label does not start with a star count between 1 and 5.
    pub fn from_scores(scores: &[StarScore]) -> Result<Self> {
        if scores.is_empty() {
            return Err(PipelineError::Model(
                "star-rating model returned no classes".to_string(),
            ));
        }

        let ratings = scores
            .iter()
            .map(|s| Ok((parse_stars(&s.label)?, f64::from(s.score))))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { ratings })
    }

    /// `(stars, probability)` pairs in model order.
    pub fn ratings(&self) -> &[(u8, f64)] {
        &self.ratings
    }

    /// Expected star rating, `Σ stars·p`. In [1, 5] for a proper distribution.
    pub fn weighted_score(&self) -> f64 {
        self.ratings
            .iter()
            .map(|&(stars, p)| f64::from(stars) * p)
            .sum()
    }
}

fn parse_stars(label: &str) -> Result<u8> {
    let count = label
        .split_whitespace()
        .next()
        .and_then(|n| n.parse::<u8>().ok())
        .ok_or_else(|| {
            PipelineError::Model(format!("unexpected star label '{label}'"))
        })?;

    if !(1..=5).contains(&count) {
        return Err(PipelineError::Model(format!(
            "star count out of range in label '{label}'"
        )));
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_singular_and_plural_labels() {
        let dist = StarDistribution::from_scores(&[
            StarScore::new("1 star", 0.1),
            StarScore::new("5 stars", 0.9),
        ])
        .unwrap();
        assert_eq!(dist.ratings()[0].0, 1);
        assert_eq!(dist.ratings()[1].0, 5);
    }

    #[test]
    fn weighted_score_of_certain_five_stars() {
        let dist = StarDistribution::from_scores(&[StarScore::new("5 stars", 1.0)]).unwrap();
        assert_eq!(dist.weighted_score(), 5.0);
    }

    #[test]
    fn weighted_score_of_even_distribution() {
        let scores: Vec<_> = (1..=5)
            .map(|n| StarScore::new(format!("{n} stars"), 0.2))
            .collect();
        let dist = StarDistribution::from_scores(&scores).unwrap();
        assert!((dist.weighted_score() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_malformed_labels() {
        for label in ["POSITIVE", "", "six stars", "0 stars", "7 stars"] {
            let err = StarDistribution::from_scores(&[StarScore::new(label, 1.0)]);
            assert!(
                matches!(err, Err(PipelineError::Model(_))),
                "label {label:?} accepted"
            );
        }
    }

    #[test]
    fn rejects_empty_output() {
        assert!(StarDistribution::from_scores(&[]).is_err());
    }
}
