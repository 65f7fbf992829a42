//! Sentiment analysis for user comments with emoji, in Rust.
//!
//! Powered by [Candle](https://github.com/huggingface/candle) and a multilingual
//! 1–5 star BERT checkpoint. Comments are normalized (emoji become words),
//! rated, and mapped to `negative`, `neutral` or `positive` with a confidence
//! and display weights. Whole CSV files can be annotated in one call.

#![deny(missing_docs)]

// ============ Internal API ============

pub(crate) mod loaders;
pub(crate) mod models;
pub(crate) mod pipelines;

// ============ Public API ============

pub mod error;

pub use pipelines::stats::BatchStats;
pub use pipelines::utils::DeviceRequest;
pub use pipelines::{batch, sentiment};
