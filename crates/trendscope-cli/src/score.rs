//! `score` command: engagement score of a single aggregate.

use trendscope_analyzer::score_per_post_average;
use trendscope_core::{EngagementCounts, ScoringConfig};

/// Weighted total, per-post average and engagement score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScoreBreakdown {
    pub weighted: u64,
    pub per_post: f64,
    pub score: f64,
}

pub(crate) fn compute_score(
    scoring: &ScoringConfig,
    counts: EngagementCounts,
    posts: u64,
) -> anyhow::Result<ScoreBreakdown> {
    if posts == 0 {
        anyhow::bail!("--posts must be at least 1; empty samples have no engagement score");
    }
    let weighted = counts.weighted();
    #[allow(clippy::cast_precision_loss)]
    let per_post = weighted as f64 / posts as f64;
    Ok(ScoreBreakdown {
        weighted,
        per_post,
        score: score_per_post_average(per_post, scoring.engagement_ceiling),
    })
}

pub(crate) fn run_score(
    scoring: &ScoringConfig,
    likes: u64,
    comments: u64,
    shares: u64,
    posts: u64,
) -> anyhow::Result<()> {
    let counts = EngagementCounts {
        likes,
        comments,
        shares,
    };
    let breakdown = compute_score(scoring, counts, posts)?;
    println!(
        "engagement score: {:.2} (weighted {} over {posts} posts, {:.1} per post, ceiling {})",
        breakdown.score, breakdown.weighted, breakdown.per_post, scoring.engagement_ceiling
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_post_aggregate_matches_weighting() {
        let counts = EngagementCounts {
            likes: 150,
            comments: 15,
            shares: 7,
        };
        let breakdown = compute_score(&ScoringConfig::default(), counts, 2).unwrap();
        assert_eq!(breakdown.weighted, 266);
        assert!((breakdown.per_post - 133.0).abs() < 1e-12);
        assert!(breakdown.score > 1.0 && breakdown.score < 10.0);
    }

    #[test]
    fn zero_posts_is_rejected() {
        let err = compute_score(&ScoringConfig::default(), EngagementCounts::default(), 0)
            .unwrap_err();
        assert!(err.to_string().contains("--posts"), "got: {err}");
    }
}
