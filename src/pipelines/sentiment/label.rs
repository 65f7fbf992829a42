//! Star score → sentiment label, and the display probabilities derived from it.

use std::fmt;
use std::str::FromStr;

use crate::error::PipelineError;

/// Scores at or below this are negative.
const NEGATIVE_MAX: f64 = 2.0;
/// Scores at or above this are positive.
const POSITIVE_MIN: f64 = 4.0;

/// Three-way sentiment class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SentimentLabel {
    /// Critical or unfavourable tone.
    Negative,
    /// Informative, no clear emotional charge.
    Neutral,
    /// Favourable tone.
    Positive,
}

impl SentimentLabel {
    /// All labels in display order.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Positive,
    ];

    /// Lowercase name used in output files.
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Positive => "positive",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            "positive" => Ok(SentimentLabel::Positive),
            other => Err(PipelineError::Unexpected(format!(
                "unknown sentiment label '{other}'"
            ))),
        }
    }
}

/// Map a weighted star score in [1, 5] to a label.
///
/// The neutral band is the open interval (2, 4): exactly 2.0 is negative and
/// exactly 4.0 is positive.
pub fn classify(score: f64) -> SentimentLabel {
    if score <= NEGATIVE_MAX {
        SentimentLabel::Negative
    } else if score >= POSITIVE_MIN {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Neutral
    }
}

/// Rescale a star score from [1, 5] to [0, 1].
pub fn normalize_score(score: f64) -> f64 {
    (score - 1.0) / 4.0
}

/// Display weights over the three labels.
///
/// These are heuristics, not a calibrated distribution: the components do
/// not have to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityTriple {
    /// Weight of [`SentimentLabel::Negative`].
    pub negative: f64,
    /// Weight of [`SentimentLabel::Neutral`].
    pub neutral: f64,
    /// Weight of [`SentimentLabel::Positive`].
    pub positive: f64,
}

impl ProbabilityTriple {
    /// Used for blank comments and failed model calls.
    pub const UNDECIDED: ProbabilityTriple = ProbabilityTriple {
        negative: 0.33,
        neutral: 0.34,
        positive: 0.33,
    };

    /// Weight for one label.
    pub fn get(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Positive => self.positive,
        }
    }

    /// `(label, weight)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (SentimentLabel, f64)> + '_ {
        SentimentLabel::ALL.into_iter().map(|label| (label, self.get(label)))
    }
}

/// Build the display weights from a label and the normalized score.
///
/// Negative and positive weights grow with distance from the middle; neutral
/// comments always get `{0.3, 0.4, 0.3}`.
pub fn synthesize_probabilities(label: SentimentLabel, normalized: f64) -> ProbabilityTriple {
    match label {
        SentimentLabel::Negative => ProbabilityTriple {
            negative: 0.6 + (1.0 - normalized) * 0.3,
            neutral: 0.3 - (1.0 - normalized) * 0.2,
            positive: 0.1,
        },
        SentimentLabel::Positive => ProbabilityTriple {
            negative: 0.1,
            neutral: 0.3 - normalized * 0.2,
            positive: 0.6 + normalized * 0.3,
        },
        SentimentLabel::Neutral => ProbabilityTriple {
            negative: 0.3,
            neutral: 0.4,
            positive: 0.3,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn classify_boundaries_are_asymmetric() {
        assert_eq!(classify(1.0), SentimentLabel::Negative);
        assert_eq!(classify(2.0), SentimentLabel::Negative);
        assert_eq!(classify(2.000001), SentimentLabel::Neutral);
        assert_eq!(classify(3.0), SentimentLabel::Neutral);
        assert_eq!(classify(3.999999), SentimentLabel::Neutral);
        assert_eq!(classify(4.0), SentimentLabel::Positive);
        assert_eq!(classify(5.0), SentimentLabel::Positive);
    }

    #[test]
    fn normalize_score_maps_range_ends_exactly() {
        assert_eq!(normalize_score(1.0), 0.0);
        assert_eq!(normalize_score(5.0), 1.0);
        assert_eq!(normalize_score(3.0), 0.5);
    }

    #[test]
    fn positive_at_full_confidence() {
        let p = synthesize_probabilities(SentimentLabel::Positive, 1.0);
        assert_close(p.negative, 0.1);
        assert_close(p.neutral, 0.1);
        assert_close(p.positive, 0.9);
    }

    #[test]
    fn negative_at_zero_confidence() {
        let p = synthesize_probabilities(SentimentLabel::Negative, 0.0);
        assert_close(p.negative, 0.9);
        assert_close(p.neutral, 0.1);
        assert_close(p.positive, 0.1);
    }

    #[test]
    fn neutral_is_fixed() {
        for n in [0.3, 0.5, 0.7] {
            let p = synthesize_probabilities(SentimentLabel::Neutral, n);
            assert_eq!(
                p,
                ProbabilityTriple {
                    negative: 0.3,
                    neutral: 0.4,
                    positive: 0.3
                }
            );
        }
    }

    #[test]
    fn weights_need_not_sum_to_one() {
        // score 2.0 -> normalized 0.25
        let p = synthesize_probabilities(SentimentLabel::Negative, 0.25);
        assert_close(p.negative, 0.825);
        assert_close(p.neutral, 0.15);
        assert!((p.negative + p.neutral + p.positive - 1.0).abs() > 0.01);
    }

    #[test]
    fn label_round_trips_through_str() {
        for label in SentimentLabel::ALL {
            assert_eq!(label.as_str().parse::<SentimentLabel>().unwrap(), label);
        }
        assert!("happy".parse::<SentimentLabel>().is_err());
    }
}
