//! Post-level sentiment scoring for trendscope.
//!
//! Scores post text with a lexicon of common social-media vocabulary and
//! aggregates per-post polarity into a per-hashtag summary. Scoring failures
//! never abort a sample: the failing post counts as neutral.

pub mod aggregate;
pub mod error;
pub mod scorer;

pub use aggregate::{aggregate_sentiment, SentimentSummary};
pub use error::SentimentError;
pub use scorer::{LexiconScorer, PostSentiment, SentimentScorer};
