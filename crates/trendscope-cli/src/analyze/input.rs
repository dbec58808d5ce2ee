//! Ingestion batch file parsing.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use trendscope_analyzer::{build_samples, CategoryInput, RawPost};
use trendscope_core::{Category, HashtagSample};

/// One category's worth of ingestion output.
///
/// A batch may carry ready-made `samples`, raw scraped `posts` (grouped into
/// samples here), or both.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IngestionBatch {
    pub category: Category,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub samples: Vec<HashtagSample>,
    #[serde(default)]
    pub posts: Vec<RawPost>,
}

/// Read a JSON array of [`IngestionBatch`] from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid batch array.
pub(crate) fn load_batches(path: &Path) -> anyhow::Result<Vec<IngestionBatch>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    parse_batches(&content).map_err(|e| anyhow::anyhow!("invalid batch file {}: {e}", path.display()))
}

pub(crate) fn parse_batches(content: &str) -> serde_json::Result<Vec<IngestionBatch>> {
    serde_json::from_str(content)
}

/// Fold batches into one [`CategoryInput`] per category, in category order.
///
/// Batches for the same category are concatenated; if any of them was
/// cancelled the merged input is too. With a filter, other categories are
/// dropped.
pub(crate) fn to_category_inputs(
    batches: Vec<IngestionBatch>,
    only: Option<Category>,
) -> Vec<CategoryInput> {
    let mut merged: BTreeMap<Category, CategoryInput> = BTreeMap::new();

    for batch in batches {
        if only.is_some_and(|c| c != batch.category) {
            continue;
        }
        let entry = merged
            .entry(batch.category)
            .or_insert_with(|| CategoryInput::new(batch.category, Vec::new()));
        entry.cancelled |= batch.cancelled;
        entry.samples.extend(batch.samples);
        if !batch.posts.is_empty() {
            entry
                .samples
                .extend(build_samples(batch.category, &batch.posts));
        }
    }

    merged.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCHES: &str = r#"[
        {
            "category": "technology",
            "samples": [
                {
                    "hashtag": "ai",
                    "category": "technology",
                    "posts": [
                        {"likes": 100, "comments": 10, "shares": 5, "timestamp": "2026-03-01T10:00:00Z"}
                    ]
                }
            ]
        },
        {
            "category": "food",
            "cancelled": true,
            "posts": [
                {"text": "Sunday #brunch spread", "likes": "1.2K", "comments": "40", "shares": "12",
                 "timestamp": "2026-03-01T09:00:00Z"}
            ]
        },
        {
            "category": "technology",
            "samples": [{"hashtag": "cloud", "category": "technology"}]
        }
    ]"#;

    #[test]
    fn parses_samples_and_raw_posts() {
        let batches = parse_batches(BATCHES).unwrap();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].samples[0].posts[0].likes, 100);
        assert!(batches[0].samples[0].posts[0].text.is_empty());
        assert!(batches[1].cancelled);
        assert_eq!(batches[1].posts.len(), 1);
    }

    #[test]
    fn merges_batches_per_category() {
        let inputs = to_category_inputs(parse_batches(BATCHES).unwrap(), None);
        assert_eq!(inputs.len(), 2);

        assert_eq!(inputs[0].category, Category::Technology);
        assert_eq!(inputs[0].samples.len(), 2);
        assert!(!inputs[0].cancelled);

        assert_eq!(inputs[1].category, Category::Food);
        assert!(inputs[1].cancelled);
        let brunch = inputs[1]
            .samples
            .iter()
            .find(|s| s.hashtag == "brunch")
            .unwrap();
        assert_eq!(brunch.posts[0].likes, 1_200);
    }

    #[test]
    fn filter_keeps_only_requested_category() {
        let inputs = to_category_inputs(parse_batches(BATCHES).unwrap(), Some(Category::Food));
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].category, Category::Food);
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(parse_batches(r#"[{"category": "gardening"}]"#).is_err());
    }
}
