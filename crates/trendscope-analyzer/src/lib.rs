//! Trending-hashtag analysis for trendscope.
//!
//! Turns per-hashtag post samples into a ranked top-N list per category:
//!
//! - [`engagement`]: weighted engagement per post mapped onto `[1, 10]`.
//! - [`estimate`]: padding of samples below `min_posts` from a category
//!   prior or baseline.
//! - [`ranker`]: the seven-factor trending score, normalized against the
//!   category maxima once every sample is measured.
//! - [`assemble`]: the ranked result and its persistable records.
//! - [`pipeline`]: one category end to end.
//! - [`ingest`]: raw scraped posts to samples.

pub mod assemble;
pub mod engagement;
pub mod error;
pub mod estimate;
pub mod ingest;
pub mod pipeline;
pub mod ranker;
pub mod summary;

pub use assemble::{assemble, hashtag_url, records, to_record};
pub use engagement::{
    average_weighted_engagement, engagement_score, score_per_post_average, MAX_ENGAGEMENT_SCORE,
    MIN_ENGAGEMENT_SCORE,
};
pub use error::AnalyzerError;
pub use estimate::{estimate_sample, needs_estimation, CategoryPrior, EstimationInputs};
pub use ingest::{
    build_samples, complete_partial_counts, extract_hashtags, is_relevant_hashtag, parse_count,
    RawCount, RawPost,
};
pub use pipeline::{
    analyze_category, CategoryCollector, CategoryInput, CategoryReport, SkippedHashtag,
};
pub use ranker::{
    compare_ranked, consistency_factor, measure, rank, recency_factor, CategoryMaxima,
    FactorBreakdown, SampleMetrics,
};
pub use summary::RunSummary;
