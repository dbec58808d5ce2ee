//! End-of-run summary statistics for one category.

use serde::Serialize;
use trendscope_core::{Category, RankedResult, ScoredHashtag};

/// Aggregate numbers over the ranked hashtags of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub category: Category,
    pub total_hashtags: usize,
    pub total_posts: usize,
    /// Sum of raw (unweighted) engagement across the ranked hashtags.
    pub total_engagement: u64,
    /// `0.0` for an empty result.
    pub avg_trending_score: f64,
    pub real_count: usize,
    pub estimated_count: usize,
    pub skipped_count: usize,
    /// Highest engagement score.
    pub most_engaging: Option<String>,
    /// Most posts.
    pub most_frequent: Option<String>,
    /// Highest sentiment polarity.
    pub most_positive: Option<String>,
}

impl RunSummary {
    #[must_use]
    pub fn from_result(result: &RankedResult, skipped_count: usize) -> Self {
        let hashtags = &result.hashtags;
        let estimated_count = hashtags.iter().filter(|h| h.is_estimated).count();

        let avg_trending_score = if hashtags.is_empty() {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let n = hashtags.len() as f64;
            hashtags.iter().map(|h| h.trending_score).sum::<f64>() / n
        };

        Self {
            category: result.category,
            total_hashtags: hashtags.len(),
            total_posts: hashtags.iter().map(|h| h.post_count).sum(),
            total_engagement: hashtags
                .iter()
                .fold(0_u64, |acc, h| acc.saturating_add(h.total_engagement)),
            avg_trending_score,
            real_count: hashtags.len() - estimated_count,
            estimated_count,
            skipped_count,
            most_engaging: best_by(hashtags, |h| h.engagement_score),
            most_frequent: best_by(hashtags, |h| h.post_count),
            most_positive: best_by(hashtags, |h| h.sentiment_polarity),
        }
    }
}

/// Hashtag with the largest key; the earlier (higher ranked) one wins ties.
fn best_by<K, F>(hashtags: &[ScoredHashtag], key: F) -> Option<String>
where
    K: PartialOrd,
    F: Fn(&ScoredHashtag) -> K,
{
    hashtags
        .iter()
        .fold(None::<&ScoredHashtag>, |best, h| match best {
            Some(b) if key(b) >= key(h) => Some(b),
            _ => Some(h),
        })
        .map(|h| h.hashtag.clone())
}
