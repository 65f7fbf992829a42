use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::columns::detect_comment_column;
use super::table::CommentTable;
use crate::error::{PipelineError, Result};
use crate::pipelines::sentiment::{
    Comment, SentimentLabel, SentimentScore, SentimentScorer, StarRatingModel,
};
use crate::pipelines::stats::BatchStats;

/// Columns appended to every analyzed table, in order.
pub const OUTPUT_COLUMNS: [&str; 5] = [
    "sentiment",
    "confidence",
    "prob_negative",
    "prob_neutral",
    "prob_positive",
];

/// Prefix of the default output file name.
pub const OUTPUT_PREFIX: &str = "sentiment_";

// ============ Output types ============

/// Label counts for a finished batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    counts: BTreeMap<SentimentLabel, usize>,
    total: usize,
}

impl BatchSummary {
    fn record(&mut self, label: SentimentLabel) {
        *self.counts.entry(label).or_default() += 1;
        self.total += 1;
    }

    /// Number of comments scored.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Comments with this label.
    pub fn count(&self, label: SentimentLabel) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    /// Share of comments with this label, in percent. Zero for an empty batch.
    pub fn percentage(&self, label: SentimentLabel) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(label) as f64 / self.total as f64 * 100.0
    }

    /// `(label, count)` for labels that occurred, most frequent first.
    pub fn counts(&self) -> Vec<(SentimentLabel, usize)> {
        let mut counts: Vec<_> = self.counts.iter().map(|(&l, &c)| (l, c)).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        counts
    }
}

/// Result of running a batch.
#[derive(Debug)]
pub struct BatchOutput {
    /// Input table with the five sentiment columns appended.
    pub table: CommentTable,
    /// Name of the column that was scored.
    pub comment_column: String,
    /// Per-row scores, in input order.
    pub scores: Vec<SentimentScore>,
    /// Label counts.
    pub summary: BatchSummary,
    /// Execution statistics.
    pub stats: BatchStats,
}

// ============ Runner ============

type ProgressFn<'p> = Box<dyn FnMut(usize, usize) + 'p>;

/// Scores one column of a table, row by row.
///
/// A comment that fails to score becomes a neutral guess; the batch always
/// runs to the end.
pub struct BatchRunner<'s, 'p, M: StarRatingModel> {
    scorer: &'s SentimentScorer<M>,
    progress: Option<ProgressFn<'p>>,
}

impl<'s, 'p, M: StarRatingModel> BatchRunner<'s, 'p, M> {
    /// Runner using `scorer` for every row.
    pub fn new(scorer: &'s SentimentScorer<M>) -> Self {
        Self {
            scorer,
            progress: None,
        }
    }

    /// Call `progress(done, total)` after each row.
    pub fn with_progress(mut self, progress: impl FnMut(usize, usize) + 'p) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Score column `column` of `table` and append the output columns.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Table`] if `column` is out of range.
    pub fn run(mut self, mut table: CommentTable, column: usize) -> Result<BatchOutput> {
        let comment_column = table
            .headers()
            .get(column)
            .cloned()
            .ok_or_else(|| {
                PipelineError::Table(format!(
                    "column {} out of range for {} columns",
                    column,
                    table.headers().len()
                ))
            })?;

        let stats_builder = BatchStats::start();
        let total = table.len();
        let mut summary = BatchSummary::default();
        let mut scores = Vec::with_capacity(total);

        for (i, cell) in table.column(column).enumerate() {
            let score = self.scorer.score(Comment::from_text_cell(cell));
            summary.record(score.label);
            scores.push(score);

            tracing::debug!(row = i + 1, total, label = %score.label, "analyzed comment");
            if let Some(progress) = self.progress.as_mut() {
                progress(i + 1, total);
            }
        }

        for (name, values) in OUTPUT_COLUMNS.iter().zip(output_columns(&scores)) {
            table.push_column(*name, values)?;
        }

        Ok(BatchOutput {
            table,
            comment_column,
            scores,
            summary,
            stats: stats_builder.finish(total),
        })
    }
}

fn output_columns(scores: &[SentimentScore]) -> [Vec<String>; 5] {
    let column = |f: fn(&SentimentScore) -> String| scores.iter().map(f).collect::<Vec<_>>();
    [
        column(|s| s.label.to_string()),
        column(|s| s.confidence.to_string()),
        column(|s| s.probabilities.negative.to_string()),
        column(|s| s.probabilities.neutral.to_string()),
        column(|s| s.probabilities.positive.to_string()),
    ]
}

// ============ File entry point ============

/// Read a CSV file, find its comment column, and score it.
///
/// `column` overrides detection with an exact header name.
///
/// # Errors
///
/// - [`PipelineError::UnsupportedFormat`] for anything but `.csv`.
/// - [`PipelineError::Table`] if the file cannot be read, the named column
///   does not exist, or no comment column can be detected.
pub fn analyze_file<M: StarRatingModel>(
    scorer: &SentimentScorer<M>,
    input: impl AsRef<Path>,
    column: Option<&str>,
) -> Result<BatchOutput> {
    let input = input.as_ref();
    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if extension != "csv" {
        return Err(PipelineError::UnsupportedFormat(format!(
            "'{}' (expected .csv)",
            input.display()
        )));
    }

    let table = CommentTable::read_csv(input)?;
    let index = match column {
        Some(name) => table.column_index(name).ok_or_else(|| {
            PipelineError::Table(format!(
                "column '{}' not found; available: {}",
                name,
                table.headers().join(", ")
            ))
        })?,
        None => detect_comment_column(&table).ok_or_else(|| {
            PipelineError::Table("Could not identify a comment column in the file".to_string())
        })?,
    };

    tracing::info!(
        file = %input.display(),
        column = %table.headers()[index],
        rows = table.len(),
        "analyzing comments"
    );
    BatchRunner::new(scorer).run(table, index)
}

/// `sentiment_<name>` next to the input file.
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "comments.csv".to_string());
    input.with_file_name(format!("{OUTPUT_PREFIX}{name}"))
}
