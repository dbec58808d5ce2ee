//! Concurrent per-category execution.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use trendscope_analyzer::{analyze_category, CategoryInput, CategoryReport};
use trendscope_core::{Category, ScoringConfig, VersionId};
use trendscope_sentiment::LexiconScorer;

/// Outcome of one category: its report, or why the task died.
pub(super) type CategoryOutcome = (Category, anyhow::Result<CategoryReport>);

/// Analyze every category input, at most `max_concurrent` at a time.
///
/// Scoring is CPU-bound, so each category runs on the blocking pool. Every
/// category shares the same run instant and version id. Outcomes are
/// returned in category order regardless of completion order.
pub(super) async fn run_categories(
    scoring: Arc<ScoringConfig>,
    inputs: Vec<CategoryInput>,
    as_of: DateTime<Utc>,
    version_id: VersionId,
    max_concurrent: usize,
) -> Vec<CategoryOutcome> {
    let mut outcomes: Vec<CategoryOutcome> = stream::iter(inputs)
        .map(|input| {
            let scoring = Arc::clone(&scoring);
            let category = input.category;
            async move {
                let joined = tokio::task::spawn_blocking(move || {
                    let scorer = LexiconScorer::default();
                    analyze_category(&scoring, &scorer, input, as_of, version_id)
                })
                .await;
                let result = joined
                    .map_err(|e| anyhow::anyhow!("analysis task for {category} failed: {e}"));
                (category, result)
            }
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    outcomes.sort_by_key(|(category, _)| *category);
    outcomes
}
