//! Reference ingestion adapter: raw scraped posts to [`HashtagSample`]s.
//!
//! The analysis core only consumes samples; this module exists so callers
//! holding raw posts (counts still as display strings like `"1.2K"`) can
//! produce them deterministically.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use trendscope_core::{Category, EngagementCounts, HashtagSample, PostRecord};

/// Posts without an explicit hashtag are attributed to this many seed tags.
pub const UNTAGGED_SEED_COUNT: usize = 5;

/// Leading characters of post text compared when dropping duplicates.
pub const DEDUP_PREFIX_CHARS: usize = 200;

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("valid hashtag regex"));

/// An engagement count as scraped: either already numeric or display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Number(u64),
    Text(String),
}

impl RawCount {
    fn value(&self) -> Option<u64> {
        match self {
            RawCount::Number(n) => Some(*n),
            RawCount::Text(s) => parse_count(s),
        }
    }
}

/// One post as handed over by a scraper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub likes: Option<RawCount>,
    #[serde(default)]
    pub comments: Option<RawCount>,
    #[serde(default)]
    pub shares: Option<RawCount>,
    pub timestamp: DateTime<Utc>,
}

/// Parse a displayed count such as `"1,234"`, `"1.2K"`, `"3M"` or `"2.5B"`.
///
/// Returns `None` for anything that is not a non-negative number.
#[must_use]
pub fn parse_count(text: &str) -> Option<u64> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    let (number, multiplier) = match cleaned.chars().last()? {
        'K' => (&cleaned[..cleaned.len() - 1], 1_000.0),
        'M' => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        'B' => (&cleaned[..cleaned.len() - 1], 1_000_000_000.0),
        _ => (cleaned.as_str(), 1.0),
    };

    let value: f64 = number.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(round_count(value * multiplier))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// Fill in counts a scraper could not see, using fixed ratios.
///
/// Likes come from comments (×10) or else shares (×17.5); missing comments
/// are 10% of likes and missing shares 4.5% of likes. A post with nothing
/// visible is left at zero. Returns whether any count was filled in.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn complete_partial_counts(counts: EngagementCounts) -> (EngagementCounts, bool) {
    let EngagementCounts {
        mut likes,
        mut comments,
        mut shares,
    } = counts;

    if likes == 0 && comments == 0 && shares == 0 {
        return (counts, false);
    }

    let mut estimated = false;
    if likes == 0 {
        likes = if comments > 0 {
            round_count(comments as f64 * 10.0)
        } else {
            round_count(shares as f64 * 17.5)
        };
        estimated = true;
    }
    if comments == 0 {
        comments = round_count(likes as f64 * 0.10);
        estimated = true;
    }
    if shares == 0 {
        shares = round_count(likes as f64 * 0.045);
        estimated = true;
    }

    (
        EngagementCounts {
            likes,
            comments,
            shares,
        },
        estimated,
    )
}

/// `#word` tokens of `text`, lowercased, first occurrence order, no repeats.
#[must_use]
pub fn extract_hashtags(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    HASHTAG_RE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_lowercase())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Whether `tag` plausibly belongs to `category`.
///
/// Direct matches against the category keywords and seed hashtags, and
/// partial matches against keywords, are accepted. Anything else is accepted
/// unless it is shorter than three characters.
#[must_use]
pub fn is_relevant_hashtag(tag: &str, category: Category) -> bool {
    let tag = tag.to_lowercase();
    let keywords = category.keywords();

    if keywords
        .iter()
        .chain(category.seed_hashtags())
        .any(|k| *k == tag)
    {
        return true;
    }
    if keywords
        .iter()
        .any(|k| tag.contains(k) || k.contains(tag.as_str()))
    {
        return true;
    }
    tag.chars().count() >= 3
}

/// Remembers post texts already seen in a run.
#[derive(Debug, Default)]
pub struct PostDeduper {
    seen: HashSet<String>,
}

impl PostDeduper {
    /// `true` the first time a text (by its leading characters) is offered.
    pub fn insert(&mut self, text: &str) -> bool {
        let prefix: String = text.trim().chars().take(DEDUP_PREFIX_CHARS).collect();
        self.seen
            .insert(format!("{:x}", Sha256::digest(prefix.as_bytes())))
    }
}

/// Group raw posts of one category into per-hashtag samples.
///
/// Every relevant hashtag a post carries gets a copy of it; posts carrying
/// no hashtag at all go to the category's first seed hashtags. Seed hashtags
/// nobody posted under are still emitted, empty, so the estimation fallback
/// can consider them. Output is sorted by hashtag.
#[must_use]
pub fn build_samples(category: Category, posts: &[RawPost]) -> Vec<HashtagSample> {
    let mut deduper = PostDeduper::default();
    let mut samples: BTreeMap<String, HashtagSample> = BTreeMap::new();
    let mut duplicates = 0_usize;

    for raw in posts {
        if !raw.text.trim().is_empty() && !deduper.insert(&raw.text) {
            duplicates += 1;
            continue;
        }

        let visible = EngagementCounts {
            likes: raw.likes.as_ref().and_then(RawCount::value).unwrap_or(0),
            comments: raw.comments.as_ref().and_then(RawCount::value).unwrap_or(0),
            shares: raw.shares.as_ref().and_then(RawCount::value).unwrap_or(0),
        };
        let (counts, estimated) = complete_partial_counts(visible);

        let post = PostRecord {
            likes: counts.likes,
            comments: counts.comments,
            shares: counts.shares,
            text: raw.text.clone(),
            timestamp: raw.timestamp,
        };

        let explicit = extract_hashtags(&raw.text);
        let tags: Vec<String> = if explicit.is_empty() {
            category
                .seed_hashtags()
                .iter()
                .take(UNTAGGED_SEED_COUNT)
                .map(|s| (*s).to_string())
                .collect()
        } else {
            explicit
                .into_iter()
                .filter(|t| is_relevant_hashtag(t, category))
                .collect()
        };

        for tag in tags {
            let sample = samples
                .entry(tag.clone())
                .or_insert_with(|| HashtagSample::new(tag, category, Vec::new()));
            sample.posts.push(post.clone());
            if estimated {
                sample.estimated_post_count += 1;
            }
        }
    }

    for seed in category.seed_hashtags() {
        samples
            .entry((*seed).to_string())
            .or_insert_with(|| HashtagSample::new(*seed, category, Vec::new()));
    }

    tracing::debug!(
        category = %category,
        raw_posts = posts.len(),
        duplicates,
        hashtags = samples.len(),
        "built hashtag samples"
    );

    samples.into_values().collect()
}

#[cfg(test)]
#[path = "ingest_test.rs"]
mod tests;
