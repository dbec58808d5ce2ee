//! Per-hashtag sentiment aggregation.

use trendscope_core::{PostRecord, SentimentDistribution, SentimentLabel};

use crate::scorer::{PostSentiment, SentimentScorer};

/// Aggregated sentiment across every post of one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentSummary {
    /// Arithmetic mean of per-post polarity. `0.0` for no posts.
    pub polarity: f64,
    pub label: SentimentLabel,
    /// Mean per-post subjectivity.
    pub subjectivity: f64,
    pub distribution: SentimentDistribution,
    /// Posts whose text could not be analyzed.
    pub failed_posts: usize,
}

/// Score every post and average the results.
///
/// Posts with empty text contribute polarity 0 and are still counted. A post
/// the scorer rejects is logged and also contributes 0; it never fails the
/// sample.
pub fn aggregate_sentiment(
    scorer: &dyn SentimentScorer,
    hashtag: &str,
    posts: &[PostRecord],
) -> SentimentSummary {
    let mut distribution = SentimentDistribution::default();
    let mut polarity_sum = 0.0_f64;
    let mut subjectivity_sum = 0.0_f64;
    let mut failed_posts = 0_usize;

    for (index, post) in posts.iter().enumerate() {
        let sentiment = if post.text.trim().is_empty() {
            PostSentiment::neutral()
        } else {
            match scorer.analyze(&post.text) {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!(
                        hashtag,
                        post_index = index,
                        error = %e,
                        "sentiment analysis failed; treating post as neutral"
                    );
                    failed_posts += 1;
                    PostSentiment::neutral()
                }
            }
        };

        polarity_sum += sentiment.polarity;
        subjectivity_sum += sentiment.subjectivity;
        distribution.record(sentiment.label);
    }

    let (polarity, subjectivity) = if posts.is_empty() {
        (0.0, 0.0)
    } else {
        #[allow(clippy::cast_precision_loss)]
        let denom = posts.len() as f64;
        (
            (polarity_sum / denom).clamp(-1.0, 1.0),
            subjectivity_sum / denom,
        )
    };

    SentimentSummary {
        polarity,
        label: SentimentLabel::from_polarity(polarity),
        subjectivity,
        distribution,
        failed_posts,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::error::SentimentError;
    use crate::scorer::LexiconScorer;

    fn post(text: &str) -> PostRecord {
        PostRecord {
            likes: 1,
            comments: 0,
            shares: 0,
            text: text.to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    struct AlwaysFails;

    impl SentimentScorer for AlwaysFails {
        fn analyze(&self, _text: &str) -> Result<PostSentiment, SentimentError> {
            Err(SentimentError::NonFinite)
        }
    }

    #[test]
    fn no_posts_is_neutral() {
        let summary = aggregate_sentiment(&LexiconScorer::default(), "x", &[]);
        assert_eq!(summary.polarity, 0.0);
        assert_eq!(summary.label, SentimentLabel::Neutral);
        assert_eq!(summary.distribution, SentimentDistribution::default());
    }

    #[test]
    fn empty_text_posts_dilute_the_mean() {
        let scorer = LexiconScorer::default();
        let alone = aggregate_sentiment(&scorer, "x", &[post("amazing")]);
        let diluted = aggregate_sentiment(&scorer, "x", &[post("amazing"), post("")]);
        assert!((diluted.polarity - alone.polarity / 2.0).abs() < 1e-9);
        assert_eq!(diluted.distribution.neutral, 1);
        assert_eq!(diluted.distribution.positive, 1);
    }

    #[test]
    fn scorer_failures_count_as_neutral() {
        let summary = aggregate_sentiment(&AlwaysFails, "x", &[post("amazing"), post("awful")]);
        assert_eq!(summary.polarity, 0.0);
        assert_eq!(summary.failed_posts, 2);
        assert_eq!(summary.distribution.neutral, 2);
    }

    #[test]
    fn mixed_posts_average_polarity() {
        let scorer = LexiconScorer::default();
        let summary = aggregate_sentiment(&scorer, "x", &[post("perfect"), post("awful")]);
        assert!(summary.polarity.abs() < 1e-9, "got {}", summary.polarity);
        assert_eq!(summary.distribution.positive, 1);
        assert_eq!(summary.distribution.negative, 1);
    }
}
