use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Category;

/// Relative weight of one comment versus one like.
pub const COMMENT_WEIGHT: u64 = 4;
/// Relative weight of one share versus one like.
pub const SHARE_WEIGHT: u64 = 8;

/// Like/comment/share counts, either for a single post or summed over many.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementCounts {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

impl EngagementCounts {
    /// `likes + comments*4 + shares*8`.
    #[must_use]
    pub fn weighted(&self) -> u64 {
        self.likes
            .saturating_add(self.comments.saturating_mul(COMMENT_WEIGHT))
            .saturating_add(self.shares.saturating_mul(SHARE_WEIGHT))
    }

    /// Unweighted `likes + comments + shares`.
    #[must_use]
    pub fn raw_total(&self) -> u64 {
        self.likes
            .saturating_add(self.comments)
            .saturating_add(self.shares)
    }

    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self {
            likes: self.likes.saturating_add(other.likes),
            comments: self.comments.saturating_add(other.comments),
            shares: self.shares.saturating_add(other.shares),
        }
    }
}

/// One post as extracted by ingestion. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    #[serde(default)]
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl PostRecord {
    #[must_use]
    pub fn counts(&self) -> EngagementCounts {
        EngagementCounts {
            likes: self.likes,
            comments: self.comments,
            shares: self.shares,
        }
    }

    #[must_use]
    pub fn weighted_engagement(&self) -> u64 {
        self.counts().weighted()
    }
}

/// How much of a sample's engagement data was actually observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Enough real posts; no estimation.
    #[default]
    High,
    /// Scaled up from at least one real post.
    Medium,
    /// Synthesised from the category baseline only.
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

/// All posts collected for one hashtag within one category during one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashtagSample {
    pub hashtag: String,
    pub category: Category,
    #[serde(default)]
    pub posts: Vec<PostRecord>,
    /// Set only by the estimation fallback; never read from input.
    #[serde(skip_deserializing)]
    pub is_estimated: bool,
    #[serde(skip_deserializing)]
    pub confidence: Confidence,
    /// Posts whose individual counts were partially filled in by ingestion.
    #[serde(default)]
    pub estimated_post_count: usize,
}

impl HashtagSample {
    #[must_use]
    pub fn new(hashtag: impl Into<String>, category: Category, posts: Vec<PostRecord>) -> Self {
        Self {
            hashtag: hashtag.into(),
            category,
            posts,
            is_estimated: false,
            confidence: Confidence::High,
            estimated_post_count: 0,
        }
    }

    #[must_use]
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    #[must_use]
    pub fn totals(&self) -> EngagementCounts {
        self.posts
            .iter()
            .fold(EngagementCounts::default(), |acc, p| acc.saturating_add(p.counts()))
    }

    #[must_use]
    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.posts.iter().map(|p| p.timestamp).max()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Polarity above 0.1 is positive, below -0.1 negative, otherwise neutral.
    #[must_use]
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.1 {
            SentimentLabel::Positive
        } else if polarity < -0.1 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Neutral => write!(f, "neutral"),
            SentimentLabel::Negative => write!(f, "negative"),
        }
    }
}

/// Number of posts per sentiment label within one sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentDistribution {
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Negative => self.negative += 1,
        }
    }
}

/// A fully scored hashtag. Derived from exactly one [`HashtagSample`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredHashtag {
    pub hashtag: String,
    pub category: Category,
    /// In `[1, 10]`.
    pub engagement_score: f64,
    /// In `[-1, 1]`.
    pub sentiment_polarity: f64,
    pub sentiment_label: SentimentLabel,
    /// In `[0, 100]`.
    pub trending_score: f64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    /// Sum of unweighted likes, comments and shares.
    pub total_engagement: u64,
    /// Weighted engagement per post.
    pub avg_engagement: f64,
    pub avg_likes: f64,
    pub avg_comments: f64,
    pub avg_shares: f64,
    pub post_count: usize,
    pub is_estimated: bool,
    pub confidence: Confidence,
    pub hashtag_url: String,
    /// Extra per-hashtag details (factor breakdown, subjectivity, ...).
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// Identifier shared by every record produced in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(pub Uuid);

impl VersionId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for VersionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Top-N hashtags for one category, sorted by trending score descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub category: Category,
    pub version_id: VersionId,
    pub scraped_at: DateTime<Utc>,
    pub hashtags: Vec<ScoredHashtag>,
}

/// Metadata block of a [`PersistableRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub category: Category,
    pub trending_score: f64,
    pub avg_engagement: f64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub avg_likes: f64,
    pub avg_comments: f64,
    pub avg_shares: f64,
    pub hashtag_url: String,
    pub is_estimated: bool,
}

/// Row shape handed to the persistence collaborator, one per scored hashtag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistableRecord {
    pub platform: String,
    #[serde(rename = "topic/hashtag")]
    pub hashtag: String,
    pub engagement_score: f64,
    pub sentiment_polarity: f64,
    pub sentiment_label: SentimentLabel,
    pub posts: u64,
    pub views: Option<u64>,
    pub metadata: RecordMetadata,
    pub scraped_at: DateTime<Utc>,
    pub version_id: VersionId,
}
