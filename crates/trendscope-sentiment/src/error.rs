use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("text too long to analyze: {chars} chars (limit {limit})")]
    TextTooLong { chars: usize, limit: usize },

    #[error("scorer produced a non-finite polarity")]
    NonFinite,
}
