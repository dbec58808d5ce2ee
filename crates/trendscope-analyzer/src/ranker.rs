//! Trending ranker.
//!
//! Ranking happens in two phases. [`measure`] turns each (possibly
//! estimated) sample into per-hashtag [`SampleMetrics`]; only once every
//! sample of the category is measured does [`rank`] compute the category
//! maxima used for normalization and score everything against them.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use trendscope_core::{
    Category, Confidence, EngagementCounts, HashtagSample, ScoredHashtag, ScoringConfig,
};
use trendscope_sentiment::{aggregate_sentiment, SentimentScorer, SentimentSummary};

use crate::assemble::hashtag_url;
use crate::engagement::engagement_score;
use crate::error::AnalyzerError;

/// Everything about one sample the ranker needs, computed without looking at
/// any other sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMetrics {
    pub hashtag: String,
    pub category: Category,
    pub post_count: usize,
    pub totals: EngagementCounts,
    /// Weighted engagement of each post, in post order.
    pub per_post_weighted: Vec<f64>,
    pub engagement_score: f64,
    pub sentiment: SentimentSummary,
    pub latest_post: Option<DateTime<Utc>>,
    pub is_estimated: bool,
    pub confidence: Confidence,
    pub estimated_post_count: usize,
}

impl SampleMetrics {
    #[must_use]
    pub fn weighted_total(&self) -> u64 {
        self.totals.weighted()
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_weighted(&self) -> f64 {
        if self.post_count == 0 {
            return 0.0;
        }
        self.weighted_total() as f64 / self.post_count as f64
    }
}

/// Score engagement and sentiment for one sample.
///
/// # Errors
///
/// Returns [`AnalyzerError::EmptySample`] for a sample with no posts.
pub fn measure(
    sample: &HashtagSample,
    scorer: &dyn SentimentScorer,
    config: &ScoringConfig,
) -> Result<SampleMetrics, AnalyzerError> {
    let engagement_score = engagement_score(sample, config)?;
    let sentiment = aggregate_sentiment(scorer, &sample.hashtag, &sample.posts);

    #[allow(clippy::cast_precision_loss)]
    let per_post_weighted = sample
        .posts
        .iter()
        .map(|p| p.weighted_engagement() as f64)
        .collect();

    Ok(SampleMetrics {
        hashtag: sample.hashtag.clone(),
        category: sample.category,
        post_count: sample.post_count(),
        totals: sample.totals(),
        per_post_weighted,
        engagement_score,
        sentiment,
        latest_post: sample.latest_timestamp(),
        is_estimated: sample.is_estimated,
        confidence: sample.confidence,
        estimated_post_count: sample.estimated_post_count,
    })
}

/// Per-category normalization denominators.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryMaxima {
    pub post_count: usize,
    pub weighted_total: u64,
    pub avg_weighted: f64,
}

impl CategoryMaxima {
    #[must_use]
    pub fn of(metrics: &[SampleMetrics]) -> Self {
        metrics.iter().fold(Self::default(), |acc, m| Self {
            post_count: acc.post_count.max(m.post_count),
            weighted_total: acc.weighted_total.max(m.weighted_total()),
            avg_weighted: acc.avg_weighted.max(m.avg_weighted()),
        })
    }
}

/// The seven normalized sub-factors, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorBreakdown {
    pub engagement: f64,
    pub post_count: f64,
    pub total_engagement: f64,
    pub avg_engagement: f64,
    pub sentiment: f64,
    pub recency: f64,
    pub consistency: f64,
}

impl FactorBreakdown {
    #[must_use]
    pub fn compute(
        metrics: &SampleMetrics,
        maxima: &CategoryMaxima,
        config: &ScoringConfig,
        as_of: DateTime<Utc>,
    ) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let (post_count, max_posts, weighted_total, max_total) = (
            metrics.post_count as f64,
            maxima.post_count as f64,
            metrics.weighted_total() as f64,
            maxima.weighted_total as f64,
        );

        Self {
            engagement: clamp_unit(metrics.engagement_score / 10.0),
            post_count: normalize(post_count, max_posts),
            total_engagement: normalize(weighted_total, max_total),
            avg_engagement: normalize(metrics.avg_weighted(), maxima.avg_weighted),
            sentiment: clamp_unit((metrics.sentiment.polarity + 1.0) / 2.0),
            recency: recency_factor(metrics.latest_post, as_of, config),
            consistency: consistency_factor(&metrics.per_post_weighted),
        }
    }

    /// `100 * Σ weight * factor`, clamped to `[0, 100]`.
    #[must_use]
    pub fn trending_score(&self, config: &ScoringConfig) -> f64 {
        let w = &config.weights;
        let sum = w.engagement * self.engagement
            + w.post_count * self.post_count
            + w.total_engagement * self.total_engagement
            + w.avg_engagement * self.avg_engagement
            + w.sentiment * self.sentiment
            + w.recency * self.recency
            + w.consistency * self.consistency;
        (100.0 * sum).clamp(0.0, 100.0)
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// `value / max` clamped to `[0, 1]`; 0 when the maximum is 0.
fn normalize(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    clamp_unit(value / max)
}

/// 1.0 inside the recent window, decaying linearly to 0 at the lookback
/// horizon. No posts means no recency.
#[must_use]
pub fn recency_factor(
    latest: Option<DateTime<Utc>>,
    as_of: DateTime<Utc>,
    config: &ScoringConfig,
) -> f64 {
    let Some(latest) = latest else {
        return 0.0;
    };

    #[allow(clippy::cast_precision_loss)]
    let age_hours = (as_of - latest).num_seconds() as f64 / 3600.0;
    let recent = f64::from(config.recent_window_hours);
    let lookback = f64::from(config.lookback_hours);

    if age_hours <= recent {
        1.0
    } else if age_hours >= lookback {
        0.0
    } else {
        clamp_unit(1.0 - (age_hours - recent) / (lookback - recent))
    }
}

/// `1 - stddev / mean` of per-post weighted engagement, clamped to `[0, 1]`.
/// Zero mean (nothing to be consistent about) scores 0.
#[must_use]
pub fn consistency_factor(per_post: &[f64]) -> f64 {
    if per_post.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = per_post.len() as f64;
    let mean = per_post.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = per_post.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    clamp_unit(1.0 - variance.sqrt() / mean)
}

/// Trending score descending, then engagement score descending, then hashtag
/// ascending.
#[must_use]
pub fn compare_ranked(a: &ScoredHashtag, b: &ScoredHashtag) -> Ordering {
    b.trending_score
        .total_cmp(&a.trending_score)
        .then_with(|| b.engagement_score.total_cmp(&a.engagement_score))
        .then_with(|| a.hashtag.cmp(&b.hashtag))
}

/// Score every measured sample of one category against the category maxima,
/// sort, and keep the top `config.top_n`.
///
/// `metrics` must hold the complete set for the category: the maxima are
/// taken over exactly this slice.
#[must_use]
pub fn rank(
    metrics: &[SampleMetrics],
    config: &ScoringConfig,
    as_of: DateTime<Utc>,
) -> Vec<ScoredHashtag> {
    let maxima = CategoryMaxima::of(metrics);

    let mut scored: Vec<ScoredHashtag> = metrics
        .iter()
        .map(|m| to_scored(m, &maxima, config, as_of))
        .collect();

    scored.sort_by(compare_ranked);
    scored.truncate(config.top_n);
    scored
}

fn to_scored(
    m: &SampleMetrics,
    maxima: &CategoryMaxima,
    config: &ScoringConfig,
    as_of: DateTime<Utc>,
) -> ScoredHashtag {
    let factors = FactorBreakdown::compute(m, maxima, config, as_of);
    let trending_score = factors.trending_score(config);

    #[allow(clippy::cast_precision_loss)]
    let n = m.post_count.max(1) as f64;
    #[allow(clippy::cast_precision_loss)]
    let (avg_likes, avg_comments, avg_shares) = (
        m.totals.likes as f64 / n,
        m.totals.comments as f64 / n,
        m.totals.shares as f64 / n,
    );

    let mut metadata = BTreeMap::new();
    metadata.insert("factors".to_string(), serde_json::json!(factors));
    metadata.insert(
        "confidence".to_string(),
        serde_json::json!(m.confidence.to_string()),
    );
    metadata.insert(
        "subjectivity".to_string(),
        serde_json::json!(m.sentiment.subjectivity),
    );
    metadata.insert(
        "sentiment_distribution".to_string(),
        serde_json::json!(m.sentiment.distribution),
    );
    metadata.insert(
        "estimated_posts".to_string(),
        serde_json::json!(m.estimated_post_count),
    );
    if m.sentiment.failed_posts > 0 {
        metadata.insert(
            "sentiment_failures".to_string(),
            serde_json::json!(m.sentiment.failed_posts),
        );
    }

    tracing::debug!(
        hashtag = %m.hashtag,
        category = %m.category,
        trending_score,
        engagement_score = m.engagement_score,
        "scored hashtag"
    );

    ScoredHashtag {
        hashtag: m.hashtag.clone(),
        category: m.category,
        engagement_score: m.engagement_score,
        sentiment_polarity: m.sentiment.polarity,
        sentiment_label: m.sentiment.label,
        trending_score,
        likes: m.totals.likes,
        comments: m.totals.comments,
        shares: m.totals.shares,
        total_engagement: m.totals.raw_total(),
        avg_engagement: m.avg_weighted(),
        avg_likes,
        avg_comments,
        avg_shares,
        post_count: m.post_count,
        is_estimated: m.is_estimated,
        confidence: m.confidence,
        hashtag_url: hashtag_url(&m.hashtag),
        metadata,
    }
}

#[cfg(test)]
#[path = "ranker_test.rs"]
mod tests;
