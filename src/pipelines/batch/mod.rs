//! Batch analysis of comment files.
//!
//! Reads a CSV file, finds the column holding the comments, scores every row
//! in order and appends `sentiment`, `confidence`, `prob_negative`,
//! `prob_neutral` and `prob_positive` columns.
//!
//! ```rust,no_run
//! use emoji_sentiment::batch::{analyze_file, default_output_path};
//! use emoji_sentiment::sentiment::{SentimentLabel, SentimentScorerBuilder, StarModel};
//!
//! # fn main() -> emoji_sentiment::error::Result<()> {
//! let scorer = SentimentScorerBuilder::bert(StarModel::default()).build()?;
//! let output = analyze_file(&scorer, "reviews.csv", None)?;
//!
//! for label in SentimentLabel::ALL {
//!     println!("{label}: {:.2}%", output.summary.percentage(label));
//! }
//! output.table.write_csv(default_output_path("reviews.csv"))?;
//! # Ok(())
//! # }
//! ```

pub(crate) mod columns;
pub(crate) mod runner;
pub(crate) mod table;

pub use columns::{detect_comment_column, COMMENT_COLUMN_NAMES};
pub use runner::{
    analyze_file, default_output_path, BatchOutput, BatchRunner, BatchSummary, OUTPUT_COLUMNS,
    OUTPUT_PREFIX,
};
pub use table::CommentTable;
