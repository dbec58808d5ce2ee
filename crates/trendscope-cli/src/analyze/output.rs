//! Result files and console report.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use trendscope_analyzer::CategoryReport;
use trendscope_core::Category;

fn stamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

pub(super) fn top10_path(dir: &Path, category: Category, at: DateTime<Utc>) -> PathBuf {
    dir.join(format!("facebook_top10_{category}_{}.json", stamp(at)))
}

pub(super) fn records_path(dir: &Path, category: Category, at: DateTime<Utc>) -> PathBuf {
    dir.join(format!("records_{category}_{}.json", stamp(at)))
}

/// Write the ranked result and the persistable records of one category.
///
/// Returns the two paths written.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a file cannot be
/// serialized or written.
pub(super) fn write_artifacts(
    dir: &Path,
    report: &CategoryReport,
) -> anyhow::Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)
        .map_err(|e| anyhow::anyhow!("failed to create {}: {e}", dir.display()))?;

    let category = report.result.category;
    let at = report.result.scraped_at;

    let top10 = top10_path(dir, category, at);
    write_json(&top10, &report.result)?;

    let records = records_path(dir, category, at);
    write_json(&records, &report.records)?;

    tracing::info!(
        category = %category,
        top10 = %top10.display(),
        records = %records.display(),
        "wrote result files"
    );
    Ok((top10, records))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))
}

/// Human-readable report lines for one category.
pub(super) fn report_lines(report: &CategoryReport) -> Vec<String> {
    let summary = &report.summary;
    let mut lines = vec![format!(
        "{}: {} ranked ({} real, {} estimated), {} skipped, avg trending {:.2}",
        report.result.category,
        summary.total_hashtags,
        summary.real_count,
        summary.estimated_count,
        summary.skipped_count,
        summary.avg_trending_score,
    )];

    for (rank, h) in report.result.hashtags.iter().enumerate() {
        let marker = if h.is_estimated {
            format!(" [estimated, {}]", h.confidence)
        } else {
            String::new()
        };
        lines.push(format!(
            "{:>3}. #{:<24} trending {:>6.2}  engagement {:>5.2}  {} ({:+.2})  posts {}{marker}",
            rank + 1,
            h.hashtag,
            h.trending_score,
            h.engagement_score,
            h.sentiment_label,
            h.sentiment_polarity,
            h.post_count,
        ));
    }

    let leaders = [
        ("most engaging", &summary.most_engaging),
        ("most frequent", &summary.most_frequent),
        ("most positive", &summary.most_positive),
    ];
    for (label, tag) in leaders {
        if let Some(tag) = tag {
            lines.push(format!("     {label}: #{tag}"));
        }
    }

    for skipped in &report.skipped {
        lines.push(format!("     skipped #{}: {}", skipped.hashtag, skipped.reason));
    }

    lines
}

pub(super) fn print_report(report: &CategoryReport) {
    for line in report_lines(report) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use trendscope_analyzer::{analyze_category, CategoryInput};
    use trendscope_core::{HashtagSample, PostRecord, ScoringConfig, VersionId};
    use trendscope_sentiment::LexiconScorer;
    use uuid::Uuid;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 8, 14, 5, 9).unwrap()
    }

    fn report() -> CategoryReport {
        let post = PostRecord {
            likes: 120,
            comments: 12,
            shares: 4,
            text: "amazing match".to_string(),
            timestamp: at() - Duration::hours(3),
        };
        let samples = vec![
            HashtagSample::new("nba", Category::Sports, vec![post.clone(); 3]),
            HashtagSample::new("nfl", Category::Sports, vec![post]),
        ];
        analyze_category(
            &ScoringConfig::default(),
            &LexiconScorer::default(),
            CategoryInput::new(Category::Sports, samples),
            at(),
            VersionId(Uuid::from_u128(9)),
        )
    }

    #[test]
    fn file_names_carry_category_and_timestamp() {
        let dir = Path::new("/tmp/out");
        assert_eq!(
            top10_path(dir, Category::Sports, at()),
            PathBuf::from("/tmp/out/facebook_top10_sports_20260308_140509.json")
        );
        assert_eq!(
            records_path(dir, Category::Sports, at()),
            PathBuf::from("/tmp/out/records_sports_20260308_140509.json")
        );
    }

    #[test]
    fn writes_result_and_records_as_json() {
        let dir = std::env::temp_dir().join(format!("trendscope-output-{}", std::process::id()));
        let report = report();
        let (top10, records) = write_artifacts(&dir, &report).unwrap();

        let result: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&top10).unwrap()).unwrap();
        assert_eq!(result["category"], "sports");
        assert_eq!(result["hashtags"].as_array().unwrap().len(), 2);

        let rows: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&records).unwrap()).unwrap();
        assert_eq!(rows[0]["platform"], "Facebook");
        assert_eq!(rows[0]["topic/hashtag"], "nba");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn report_marks_estimated_hashtags() {
        let lines = report_lines(&report());
        assert!(lines[0].starts_with("sports"), "got {}", lines[0]);
        let nfl = lines.iter().find(|l| l.contains("#nfl")).unwrap();
        assert!(nfl.contains("[estimated, medium]"), "got {nfl}");
        let nba = lines.iter().find(|l| l.contains("#nba")).unwrap();
        assert!(!nba.contains("estimated"), "got {nba}");
    }
}
