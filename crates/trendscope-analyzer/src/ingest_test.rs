use chrono::TimeZone;

use super::*;

fn raw(text: &str, likes: Option<&str>, comments: Option<&str>, shares: Option<&str>) -> RawPost {
    let count = |v: Option<&str>| v.map(|s| RawCount::Text(s.to_string()));
    RawPost {
        text: text.to_string(),
        likes: count(likes),
        comments: count(comments),
        shares: count(shares),
        timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
    }
}

fn counts(likes: u64, comments: u64, shares: u64) -> EngagementCounts {
    EngagementCounts {
        likes,
        comments,
        shares,
    }
}

// -----------------------------------------------------------------------
// parse_count
// -----------------------------------------------------------------------

#[test]
fn parses_plain_and_grouped_numbers() {
    assert_eq!(parse_count("42"), Some(42));
    assert_eq!(parse_count("1,234"), Some(1_234));
    assert_eq!(parse_count(" 7 "), Some(7));
}

#[test]
fn parses_suffixed_numbers() {
    assert_eq!(parse_count("1.2K"), Some(1_200));
    assert_eq!(parse_count("3m"), Some(3_000_000));
    assert_eq!(parse_count("2.5B"), Some(2_500_000_000));
}

#[test]
fn rejects_unparsable_counts() {
    assert_eq!(parse_count(""), None);
    assert_eq!(parse_count("K"), None);
    assert_eq!(parse_count("lots"), None);
    assert_eq!(parse_count("-4"), None);
}

// -----------------------------------------------------------------------
// complete_partial_counts
// -----------------------------------------------------------------------

#[test]
fn nothing_visible_stays_zero() {
    assert_eq!(complete_partial_counts(counts(0, 0, 0)), (counts(0, 0, 0), false));
}

#[test]
fn fully_visible_counts_are_untouched() {
    assert_eq!(
        complete_partial_counts(counts(10, 2, 1)),
        (counts(10, 2, 1), false)
    );
}

#[test]
fn likes_derived_from_comments() {
    let (filled, estimated) = complete_partial_counts(counts(0, 12, 0));
    assert!(estimated);
    assert_eq!(filled, counts(120, 12, 5));
}

#[test]
fn likes_derived_from_shares_when_no_comments() {
    let (filled, estimated) = complete_partial_counts(counts(0, 0, 4));
    assert!(estimated);
    assert_eq!(filled, counts(70, 7, 4));
}

#[test]
fn comments_and_shares_derived_from_likes() {
    let (filled, estimated) = complete_partial_counts(counts(200, 0, 0));
    assert!(estimated);
    assert_eq!(filled, counts(200, 20, 9));
}

// -----------------------------------------------------------------------
// hashtags
// -----------------------------------------------------------------------

#[test]
fn extracts_lowercased_unique_hashtags_in_order() {
    let tags = extract_hashtags("Loving #AI and #ai plus #Cloud9, not # alone");
    assert_eq!(tags, vec!["ai".to_string(), "cloud9".to_string()]);
}

#[test]
fn relevance_accepts_matches_and_rejects_short_noise() {
    assert!(is_relevant_hashtag("ai", Category::Technology));
    assert!(is_relevant_hashtag("TechTalk", Category::Technology));
    assert!(is_relevant_hashtag("sunset", Category::Technology));
    assert!(!is_relevant_hashtag("xy", Category::Technology));
}

#[test]
fn deduper_compares_leading_characters_only() {
    let mut deduper = PostDeduper::default();
    let head = "a".repeat(DEDUP_PREFIX_CHARS);
    assert!(deduper.insert(&format!("{head} first tail")));
    assert!(!deduper.insert(&format!("{head} second tail")));
    assert!(deduper.insert("something else entirely"));
}

// -----------------------------------------------------------------------
// build_samples
// -----------------------------------------------------------------------

#[test]
fn groups_posts_under_each_relevant_hashtag() {
    let posts = vec![
        raw("New model drop #AI #MachineLearning", Some("1.2K"), Some("80"), Some("15")),
        raw("More on #ai today", Some("300"), None, None),
        raw("#ok tiny tag", Some("5"), Some("1"), Some("1")),
    ];
    let samples = build_samples(Category::Technology, &posts);

    let ai = samples.iter().find(|s| s.hashtag == "ai").unwrap();
    assert_eq!(ai.post_count(), 2);
    assert_eq!(ai.estimated_post_count, 1);
    assert_eq!(ai.posts[0].likes, 1_200);

    let ml = samples.iter().find(|s| s.hashtag == "machinelearning").unwrap();
    assert_eq!(ml.post_count(), 1);

    assert!(samples.iter().all(|s| s.hashtag != "ok"));
}

#[test]
fn untagged_posts_go_to_leading_seed_hashtags() {
    let posts = vec![raw("A post with no tags at all", Some("10"), Some("1"), Some("1"))];
    let samples = build_samples(Category::Food, &posts);
    let seeds = Category::Food.seed_hashtags();

    for seed in &seeds[..UNTAGGED_SEED_COUNT] {
        let s = samples.iter().find(|s| s.hashtag == *seed).unwrap();
        assert_eq!(s.post_count(), 1, "seed {seed}");
    }
    for seed in &seeds[UNTAGGED_SEED_COUNT..] {
        let s = samples.iter().find(|s| s.hashtag == *seed).unwrap();
        assert_eq!(s.post_count(), 0, "seed {seed}");
    }
}

#[test]
fn every_seed_is_emitted_and_output_is_sorted() {
    let samples = build_samples(Category::Sports, &[]);
    assert_eq!(samples.len(), Category::Sports.seed_hashtags().len());
    assert!(samples.iter().all(|s| s.posts.is_empty()));
    assert!(samples.windows(2).all(|w| w[0].hashtag < w[1].hashtag));
}

#[test]
fn duplicate_posts_are_dropped() {
    let posts = vec![
        raw("Same story #travel", Some("10"), Some("1"), Some("1")),
        raw("Same story #travel", Some("99"), Some("9"), Some("9")),
    ];
    let samples = build_samples(Category::Travel, &posts);
    let travel = samples.iter().find(|s| s.hashtag == "travel").unwrap();
    assert_eq!(travel.post_count(), 1);
    assert_eq!(travel.posts[0].likes, 10);
}

#[test]
fn raw_post_accepts_numeric_or_text_counts() {
    let json = r##"{"text":"#gym day","likes":120,"comments":"1.1K","timestamp":"2026-03-01T08:00:00Z"}"##;
    let post: RawPost = serde_json::from_str(json).unwrap();
    assert_eq!(post.likes, Some(RawCount::Number(120)));
    assert_eq!(post.comments.as_ref().and_then(RawCount::value), Some(1_100));
    assert!(post.shares.is_none());
}
