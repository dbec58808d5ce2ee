//! Category pipeline orchestration.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trendscope_core::{
    Category, Confidence, HashtagSample, PersistableRecord, RankedResult, ScoringConfig,
    VersionId,
};
use trendscope_sentiment::SentimentScorer;

use crate::assemble::{assemble, records};
use crate::estimate::{estimate_sample, needs_estimation, CategoryPrior, EstimationInputs};
use crate::ranker::{measure, rank, SampleMetrics};
use crate::summary::RunSummary;

/// Everything ingestion handed over for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub category: Category,
    #[serde(default)]
    pub samples: Vec<HashtagSample>,
    /// Ingestion stopped early; `samples` is whatever was collected.
    #[serde(default)]
    pub cancelled: bool,
}

impl CategoryInput {
    #[must_use]
    pub fn new(category: Category, samples: Vec<HashtagSample>) -> Self {
        Self {
            category,
            samples,
            cancelled: false,
        }
    }
}

/// A hashtag that was left out of the ranking, and why.
///
/// Skips are always recorded with [`Confidence::Low`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedHashtag {
    pub hashtag: String,
    pub reason: String,
    pub confidence: Confidence,
}

impl SkippedHashtag {
    #[must_use]
    pub fn new(hashtag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            hashtag: hashtag.into(),
            reason: reason.into(),
            confidence: Confidence::Low,
        }
    }
}

/// Output of one category run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    pub result: RankedResult,
    pub records: Vec<PersistableRecord>,
    pub skipped: Vec<SkippedHashtag>,
    pub summary: RunSummary,
}

/// First phase of a category run: gathers samples until the set is complete.
///
/// Samples for the same hashtag (compared case-insensitively, ignoring a
/// leading `#`) are merged. Nothing is scored until [`finish`](Self::finish).
#[derive(Debug)]
pub struct CategoryCollector {
    category: Category,
    samples: BTreeMap<String, HashtagSample>,
    skipped: Vec<SkippedHashtag>,
}

impl CategoryCollector {
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self {
            category,
            samples: BTreeMap::new(),
            skipped: Vec::new(),
        }
    }

    /// Add one ingested sample.
    ///
    /// Estimation markers on incoming samples are cleared; only the
    /// estimation fallback sets them.
    pub fn add(&mut self, mut sample: HashtagSample) {
        sample.is_estimated = false;
        sample.confidence = Confidence::High;

        let key = normalize_hashtag(&sample.hashtag);
        if key.is_empty() {
            self.skip(sample.hashtag, "empty hashtag".to_string());
            return;
        }
        if sample.category != self.category {
            let reason = format!(
                "sample belongs to {}, not {}",
                sample.category, self.category
            );
            self.skip(sample.hashtag, reason);
            return;
        }

        match self.samples.entry(key) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.posts.extend(sample.posts);
                existing.estimated_post_count += sample.estimated_post_count;
            }
            Entry::Vacant(entry) => {
                let hashtag = entry.key().clone();
                entry.insert(HashtagSample { hashtag, ..sample });
            }
        }
    }

    fn skip(&mut self, hashtag: String, reason: String) {
        tracing::warn!(category = %self.category, hashtag = %hashtag, reason = %reason, "skipping hashtag");
        self.skipped.push(SkippedHashtag::new(hashtag, reason));
    }

    /// Close the collection phase. Samples come back sorted by hashtag.
    #[must_use]
    pub fn finish(self) -> (Vec<HashtagSample>, Vec<SkippedHashtag>) {
        (self.samples.into_values().collect(), self.skipped)
    }
}

fn normalize_hashtag(tag: &str) -> String {
    tag.trim().trim_start_matches('#').to_lowercase()
}

/// Run one category end to end.
///
/// 1. Collect every sample (merging duplicates) before anything is scored.
/// 2. Derive the category prior from samples meeting `min_posts`.
/// 3. Estimate insufficient samples from the prior or the category baseline.
/// 4. Measure engagement and sentiment per sample.
/// 5. Rank against category maxima and keep the top `top_n`.
/// 6. Assemble the result and its persistable records.
///
/// Never fails: hashtags that cannot be scored are reported in
/// [`CategoryReport::skipped`]. A cancelled input is ranked as-is.
#[must_use]
pub fn analyze_category(
    config: &ScoringConfig,
    scorer: &dyn SentimentScorer,
    input: CategoryInput,
    as_of: DateTime<Utc>,
    version_id: VersionId,
) -> CategoryReport {
    let category = input.category;
    if input.cancelled {
        tracing::warn!(
            category = %category,
            samples = input.samples.len(),
            "ingestion was cancelled; ranking partial samples"
        );
    }

    // Step 1: Collect.
    let mut collector = CategoryCollector::new(category);
    for sample in input.samples {
        collector.add(sample);
    }
    let (samples, mut skipped) = collector.finish();

    // Step 2: Category prior.
    let prior = CategoryPrior::from_samples(category, &samples, config.min_posts);
    let inputs = EstimationInputs {
        prior: prior.as_ref(),
        baseline: config.baseline(category),
    };

    // Step 3 + 4: Estimate where needed, then measure.
    let mut metrics: Vec<SampleMetrics> = Vec::with_capacity(samples.len());
    let mut estimated = 0_usize;
    for sample in &samples {
        let ready = if needs_estimation(sample, config) {
            match estimate_sample(sample, inputs, config, as_of) {
                Ok(s) => {
                    estimated += 1;
                    s
                }
                Err(e) => {
                    tracing::warn!(category = %category, hashtag = %sample.hashtag, error = %e, "cannot estimate hashtag");
                    skipped.push(SkippedHashtag::new(sample.hashtag.clone(), e.to_string()));
                    continue;
                }
            }
        } else {
            sample.clone()
        };

        match measure(&ready, scorer, config) {
            Ok(m) => metrics.push(m),
            Err(e) => {
                tracing::warn!(category = %category, hashtag = %ready.hashtag, error = %e, "cannot score hashtag");
                skipped.push(SkippedHashtag::new(ready.hashtag.clone(), e.to_string()));
            }
        }
    }

    if estimated > 0 {
        tracing::warn!(
            category = %category,
            estimated,
            has_prior = prior.is_some(),
            "some hashtags were estimated from insufficient data"
        );
    }

    // Step 5: Rank.
    let ranked = rank(&metrics, config, as_of);

    // Step 6: Assemble.
    let result = assemble(category, ranked, version_id, as_of);
    let records = records(&result);
    let summary = RunSummary::from_result(&result, skipped.len());

    tracing::info!(
        category = %category,
        ranked = result.hashtags.len(),
        candidates = samples.len(),
        estimated,
        skipped = skipped.len(),
        version_id = %version_id,
        "category analysis complete"
    );

    CategoryReport {
        result,
        records,
        skipped,
        summary,
    }
}
