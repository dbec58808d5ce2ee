//! Result assembly: ranked hashtags to the persisted shape.

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use trendscope_core::{
    Category, PersistableRecord, RankedResult, RecordMetadata, ScoredHashtag, VersionId,
};

pub const PLATFORM: &str = "Facebook";
const HASHTAG_URL_PREFIX: &str = "https://www.facebook.com/hashtag/";

/// Public hashtag page for `tag` (without the leading `#`).
#[must_use]
pub fn hashtag_url(tag: &str) -> String {
    let tag = tag.trim_start_matches('#');
    format!(
        "{HASHTAG_URL_PREFIX}{}",
        utf8_percent_encode(tag, NON_ALPHANUMERIC)
    )
}

/// Wrap already ranked hashtags into the category result.
#[must_use]
pub fn assemble(
    category: Category,
    hashtags: Vec<ScoredHashtag>,
    version_id: VersionId,
    scraped_at: DateTime<Utc>,
) -> RankedResult {
    RankedResult {
        category,
        version_id,
        scraped_at,
        hashtags,
    }
}

/// One persistable record per scored hashtag.
#[must_use]
pub fn to_record(
    hashtag: &ScoredHashtag,
    version_id: VersionId,
    scraped_at: DateTime<Utc>,
) -> PersistableRecord {
    PersistableRecord {
        platform: PLATFORM.to_string(),
        hashtag: hashtag.hashtag.clone(),
        engagement_score: hashtag.engagement_score,
        sentiment_polarity: hashtag.sentiment_polarity,
        sentiment_label: hashtag.sentiment_label,
        posts: hashtag.post_count as u64,
        views: Some(hashtag.total_engagement),
        metadata: RecordMetadata {
            category: hashtag.category,
            trending_score: hashtag.trending_score,
            avg_engagement: hashtag.avg_engagement,
            likes: hashtag.likes,
            comments: hashtag.comments,
            shares: hashtag.shares,
            avg_likes: hashtag.avg_likes,
            avg_comments: hashtag.avg_comments,
            avg_shares: hashtag.avg_shares,
            hashtag_url: hashtag.hashtag_url.clone(),
            is_estimated: hashtag.is_estimated,
        },
        scraped_at,
        version_id,
    }
}

/// Records for every hashtag of a result, in rank order.
#[must_use]
pub fn records(result: &RankedResult) -> Vec<PersistableRecord> {
    result
        .hashtags
        .iter()
        .map(|h| to_record(h, result.version_id, result.scraped_at))
        .collect()
}
