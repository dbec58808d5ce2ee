//! Engagement scoring: raw interaction counts to a 1-10 score.

use trendscope_core::{HashtagSample, ScoringConfig};

use crate::error::AnalyzerError;

pub const MIN_ENGAGEMENT_SCORE: f64 = 1.0;
pub const MAX_ENGAGEMENT_SCORE: f64 = 10.0;

/// Map an average weighted engagement per post onto `[1, 10]`.
///
/// The value is log-compressed as `ln(1 + avg)` and interpolated linearly
/// between `ln(1) = 0` (score 1) and `ln(1 + ceiling)` (score 10). Anything at
/// or above the ceiling scores 10. Monotonically non-decreasing in `avg`.
#[must_use]
pub fn score_per_post_average(avg_weighted: f64, ceiling: f64) -> f64 {
    if !avg_weighted.is_finite() || avg_weighted <= 0.0 || ceiling <= 0.0 {
        return MIN_ENGAGEMENT_SCORE;
    }
    let raw = avg_weighted.ln_1p();
    let top = ceiling.ln_1p();
    let fraction = (raw / top).clamp(0.0, 1.0);
    (MIN_ENGAGEMENT_SCORE + (MAX_ENGAGEMENT_SCORE - MIN_ENGAGEMENT_SCORE) * fraction)
        .clamp(MIN_ENGAGEMENT_SCORE, MAX_ENGAGEMENT_SCORE)
}

/// Weighted engagement per post for a sample, or `None` for an empty sample.
#[must_use]
pub fn average_weighted_engagement(sample: &HashtagSample) -> Option<f64> {
    let n = sample.post_count();
    if n == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let avg = sample.totals().weighted() as f64 / n as f64;
    Some(avg)
}

/// Engagement score of a sample with at least one post.
///
/// # Errors
///
/// Returns [`AnalyzerError::EmptySample`] for a sample with no posts. Those
/// must be estimated first.
pub fn engagement_score(sample: &HashtagSample, config: &ScoringConfig) -> Result<f64, AnalyzerError> {
    let avg = average_weighted_engagement(sample).ok_or_else(|| AnalyzerError::EmptySample {
        hashtag: sample.hashtag.clone(),
    })?;
    Ok(score_per_post_average(avg, config.engagement_ceiling))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use trendscope_core::{Category, PostRecord};

    use super::*;

    fn post(likes: u64, comments: u64, shares: u64) -> PostRecord {
        PostRecord {
            likes,
            comments,
            shares,
            text: String::new(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    fn sample(posts: Vec<PostRecord>) -> HashtagSample {
        HashtagSample::new("tech", Category::Technology, posts)
    }

    #[test]
    fn single_post_with_zero_engagement_scores_one() {
        let config = ScoringConfig::default();
        let score = engagement_score(&sample(vec![post(0, 0, 0)]), &config).unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn average_at_ceiling_scores_ten() {
        assert_eq!(score_per_post_average(20_000.0, 20_000.0), 10.0);
        assert_eq!(score_per_post_average(1_000_000.0, 20_000.0), 10.0);
    }

    #[test]
    fn two_post_scenario_lands_strictly_inside_bounds() {
        let config = ScoringConfig::default();
        let s = sample(vec![post(100, 10, 5), post(50, 5, 2)]);
        assert_eq!(average_weighted_engagement(&s), Some(133.0));
        let score = engagement_score(&s, &config).unwrap();
        assert!(score > 1.0 && score < 10.0, "expected (1,10), got {score}");
    }

    #[test]
    fn score_is_monotonic_in_average() {
        let mut previous = 0.0;
        for avg in [0.0, 0.5, 1.0, 10.0, 133.0, 999.0, 5_000.0, 19_999.0, 20_000.0, 50_000.0] {
            let score = score_per_post_average(avg, 20_000.0);
            assert!(
                score >= previous,
                "score decreased at avg={avg}: {score} < {previous}"
            );
            assert!((1.0..=10.0).contains(&score));
            previous = score;
        }
    }

    #[test]
    fn per_post_average_not_total_drives_score() {
        let config = ScoringConfig::default();
        let one = engagement_score(&sample(vec![post(100, 0, 0)]), &config).unwrap();
        let many = engagement_score(&sample(vec![post(100, 0, 0); 25]), &config).unwrap();
        assert!((one - many).abs() < 1e-12);
    }

    #[test]
    fn empty_sample_is_rejected() {
        let config = ScoringConfig::default();
        let err = engagement_score(&sample(vec![]), &config).unwrap_err();
        assert!(matches!(err, AnalyzerError::EmptySample { ref hashtag } if hashtag == "tech"));
    }
}
