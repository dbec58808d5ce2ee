//! Estimation fallback for hashtags with too few real posts.
//!
//! A category prior is derived once per run from the samples that did meet
//! `min_posts`, then passed explicitly into [`estimate_sample`]. Nothing here
//! reads other samples directly.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use trendscope_core::{Baseline, Category, Confidence, HashtagSample, PostRecord, ScoringConfig};

use crate::error::AnalyzerError;

/// Average per-post engagement of the qualifying hashtags in one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryPrior {
    pub category: Category,
    pub avg_likes: f64,
    pub avg_comments: f64,
    pub avg_shares: f64,
    /// Number of qualifying samples the prior was averaged over.
    pub sample_count: usize,
}

impl CategoryPrior {
    /// Average the per-post means of every sample with at least `min_posts`
    /// posts. Returns `None` when no sample qualifies.
    #[must_use]
    pub fn from_samples<'a, I>(category: Category, samples: I, min_posts: usize) -> Option<Self>
    where
        I: IntoIterator<Item = &'a HashtagSample>,
    {
        let mut likes = 0.0;
        let mut comments = 0.0;
        let mut shares = 0.0;
        let mut sample_count = 0_usize;

        for sample in samples {
            let n = sample.post_count();
            if n == 0 || n < min_posts {
                continue;
            }
            let per_post = PerPost::of(sample);
            likes += per_post.likes;
            comments += per_post.comments;
            shares += per_post.shares;
            sample_count += 1;
        }

        if sample_count == 0 {
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let denom = sample_count as f64;
        Some(Self {
            category,
            avg_likes: likes / denom,
            avg_comments: comments / denom,
            avg_shares: shares / denom,
            sample_count,
        })
    }

    fn per_post(&self) -> PerPost {
        PerPost {
            likes: self.avg_likes,
            comments: self.avg_comments,
            shares: self.avg_shares,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PerPost {
    likes: f64,
    comments: f64,
    shares: f64,
}

impl PerPost {
    #[allow(clippy::cast_precision_loss)]
    fn of(sample: &HashtagSample) -> Self {
        let totals = sample.totals();
        let n = sample.post_count().max(1) as f64;
        Self {
            likes: totals.likes as f64 / n,
            comments: totals.comments as f64 / n,
            shares: totals.shares as f64 / n,
        }
    }

    fn from_baseline(baseline: &Baseline) -> Self {
        Self {
            likes: baseline.avg_likes,
            comments: baseline.avg_comments,
            shares: baseline.avg_shares,
        }
    }

    fn midpoint(self, other: Self) -> Self {
        Self {
            likes: (self.likes + other.likes) / 2.0,
            comments: (self.comments + other.comments) / 2.0,
            shares: (self.shares + other.shares) / 2.0,
        }
    }

    fn synthetic_post(self, timestamp: DateTime<Utc>) -> PostRecord {
        PostRecord {
            likes: to_count(self.likes),
            comments: to_count(self.comments),
            shares: to_count(self.shares),
            text: String::new(),
            timestamp,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// What the fallback may draw on for one category.
#[derive(Debug, Clone, Copy)]
pub struct EstimationInputs<'a> {
    pub prior: Option<&'a CategoryPrior>,
    pub baseline: Option<&'a Baseline>,
}

/// `true` iff the sample needs the fallback.
#[must_use]
pub fn needs_estimation(sample: &HashtagSample, config: &ScoringConfig) -> bool {
    sample.post_count() < config.min_posts
}

/// Pad an insufficient sample up to `min_posts` posts with synthetic ones.
///
/// * With at least one real post, the real posts are kept and each synthetic
///   post carries the midpoint of the real per-post average and the category
///   prior (or the baseline if no hashtag in the category qualified). The
///   synthetic posts share the latest real timestamp. Confidence: medium.
/// * With no real posts, every post comes from the baseline (or the prior if
///   the category has no baseline entry) and is dated at the start of the
///   lookback window, so it earns no recency. Confidence: low.
///
/// Samples that already meet `min_posts` are returned unchanged.
///
/// # Errors
///
/// Returns [`AnalyzerError::NoEstimateAvailable`] when neither a prior nor a
/// baseline exists for the category.
pub fn estimate_sample(
    sample: &HashtagSample,
    inputs: EstimationInputs<'_>,
    config: &ScoringConfig,
    as_of: DateTime<Utc>,
) -> Result<HashtagSample, AnalyzerError> {
    if !needs_estimation(sample, config) {
        return Ok(sample.clone());
    }

    let missing = config.min_posts - sample.post_count();
    let unavailable = || AnalyzerError::NoEstimateAvailable {
        hashtag: sample.hashtag.clone(),
        category: sample.category,
    };

    let (template, timestamp, confidence) = match sample.latest_timestamp() {
        Some(latest) => {
            let reference = inputs
                .prior
                .map(CategoryPrior::per_post)
                .or_else(|| inputs.baseline.map(PerPost::from_baseline))
                .ok_or_else(unavailable)?;
            (
                PerPost::of(sample).midpoint(reference),
                latest,
                Confidence::Medium,
            )
        }
        None => {
            let reference = inputs
                .baseline
                .map(PerPost::from_baseline)
                .or_else(|| inputs.prior.map(CategoryPrior::per_post))
                .ok_or_else(unavailable)?;
            let window_start = as_of
                .checked_sub_signed(Duration::hours(i64::from(config.lookback_hours)))
                .unwrap_or(DateTime::<Utc>::MIN_UTC);
            (reference, window_start, Confidence::Low)
        }
    };

    let mut posts = sample.posts.clone();
    posts.extend((0..missing).map(|_| template.synthetic_post(timestamp)));

    tracing::debug!(
        hashtag = %sample.hashtag,
        category = %sample.category,
        real_posts = sample.post_count(),
        synthetic_posts = missing,
        confidence = %confidence,
        "estimated insufficient sample"
    );

    Ok(HashtagSample {
        hashtag: sample.hashtag.clone(),
        category: sample.category,
        posts,
        is_estimated: true,
        confidence,
        estimated_post_count: sample.estimated_post_count,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
    }

    fn post(likes: u64, comments: u64, shares: u64) -> PostRecord {
        PostRecord {
            likes,
            comments,
            shares,
            text: "real post".to_string(),
            timestamp: at(10),
        }
    }

    fn sample(tag: &str, posts: Vec<PostRecord>) -> HashtagSample {
        HashtagSample::new(tag, Category::Food, posts)
    }

    fn baseline() -> Baseline {
        Baseline {
            avg_likes: 300.0,
            avg_comments: 30.0,
            avg_shares: 10.0,
        }
    }

    #[test]
    fn prior_averages_qualifying_samples_only() {
        let a = sample("a", vec![post(100, 10, 0); 3]);
        let b = sample("b", vec![post(300, 30, 6); 4]);
        let thin = sample("thin", vec![post(9_999, 0, 0)]);
        let prior = CategoryPrior::from_samples(Category::Food, [&a, &b, &thin], 3).unwrap();
        assert_eq!(prior.sample_count, 2);
        assert!((prior.avg_likes - 200.0).abs() < 1e-9);
        assert!((prior.avg_comments - 20.0).abs() < 1e-9);
        assert!((prior.avg_shares - 3.0).abs() < 1e-9);
    }

    #[test]
    fn prior_is_absent_without_qualifying_samples() {
        let thin = sample("thin", vec![post(1, 0, 0)]);
        assert!(CategoryPrior::from_samples(Category::Food, [&thin], 3).is_none());
    }

    #[test]
    fn sufficient_sample_is_returned_unchanged() {
        let config = ScoringConfig::default();
        let s = sample("ok", vec![post(1, 1, 1); 3]);
        let inputs = EstimationInputs {
            prior: None,
            baseline: None,
        };
        let out = estimate_sample(&s, inputs, &config, at(12)).unwrap();
        assert_eq!(out, s);
        assert!(!out.is_estimated);
    }

    #[test]
    fn partial_sample_is_scaled_with_prior() {
        let config = ScoringConfig::default();
        let prior = CategoryPrior {
            category: Category::Food,
            avg_likes: 200.0,
            avg_comments: 20.0,
            avg_shares: 4.0,
            sample_count: 2,
        };
        let s = sample("thin", vec![post(100, 10, 2)]);
        let inputs = EstimationInputs {
            prior: Some(&prior),
            baseline: Some(&baseline()),
        };
        let out = estimate_sample(&s, inputs, &config, at(12)).unwrap();
        assert!(out.is_estimated);
        assert_eq!(out.confidence, Confidence::Medium);
        assert_eq!(out.post_count(), 3);
        assert_eq!(out.posts[0], s.posts[0]);
        assert_eq!(out.posts[1].likes, 150);
        assert_eq!(out.posts[1].comments, 15);
        assert_eq!(out.posts[1].shares, 3);
        assert_eq!(out.posts[2].timestamp, at(10));
    }

    #[test]
    fn partial_sample_falls_back_to_baseline_without_prior() {
        let config = ScoringConfig::default();
        let s = sample("thin", vec![post(100, 10, 2)]);
        let inputs = EstimationInputs {
            prior: None,
            baseline: Some(&baseline()),
        };
        let out = estimate_sample(&s, inputs, &config, at(12)).unwrap();
        assert_eq!(out.confidence, Confidence::Medium);
        assert_eq!(out.posts[1].likes, 200);
    }

    #[test]
    fn empty_sample_uses_baseline_with_low_confidence() {
        let config = ScoringConfig::default();
        let s = sample("ghost", vec![]);
        let inputs = EstimationInputs {
            prior: None,
            baseline: Some(&baseline()),
        };
        let out = estimate_sample(&s, inputs, &config, at(12)).unwrap();
        assert!(out.is_estimated);
        assert_eq!(out.confidence, Confidence::Low);
        assert_eq!(out.post_count(), config.min_posts);
        assert!(out.posts.iter().all(|p| p.likes == 300 && p.comments == 30 && p.shares == 10));
        let expected_ts = at(12) - Duration::hours(i64::from(config.lookback_hours));
        assert!(out.posts.iter().all(|p| p.timestamp == expected_ts));
    }

    #[test]
    fn empty_sample_without_prior_or_baseline_is_unavailable() {
        let config = ScoringConfig::default();
        let s = sample("ghost", vec![]);
        let inputs = EstimationInputs {
            prior: None,
            baseline: None,
        };
        let err = estimate_sample(&s, inputs, &config, at(12)).unwrap_err();
        assert!(matches!(err, AnalyzerError::NoEstimateAvailable { .. }));
    }

    #[test]
    fn estimation_is_deterministic() {
        let config = ScoringConfig::default();
        let s = sample("ghost", vec![post(7, 1, 0)]);
        let inputs = EstimationInputs {
            prior: None,
            baseline: Some(&baseline()),
        };
        let first = estimate_sample(&s, inputs, &config, at(12)).unwrap();
        let second = estimate_sample(&s, inputs, &config, at(12)).unwrap();
        assert_eq!(first, second);
    }
}
