use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Category, ConfigError};

/// Upper bound on `lookback_hours`: ten years.
pub const MAX_LOOKBACK_HOURS: u32 = 24 * 365 * 10;

/// Plausible average per-post engagement for a category, used when a hashtag
/// has no real posts at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub avg_likes: f64,
    pub avg_comments: f64,
    pub avg_shares: f64,
}

/// Weights of the seven trending sub-factors.
///
/// The defaults add up to 1.05; a hashtag maxing every factor is clamped to
/// a trending score of 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorWeights {
    pub engagement: f64,
    pub post_count: f64,
    pub total_engagement: f64,
    pub avg_engagement: f64,
    pub sentiment: f64,
    pub recency: f64,
    pub consistency: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            engagement: 0.25,
            post_count: 0.20,
            total_engagement: 0.15,
            avg_engagement: 0.15,
            sentiment: 0.10,
            recency: 0.15,
            consistency: 0.05,
        }
    }
}

impl FactorWeights {
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.engagement
            + self.post_count
            + self.total_engagement
            + self.avg_engagement
            + self.sentiment
            + self.recency
            + self.consistency
    }

    fn values(&self) -> [f64; 7] {
        [
            self.engagement,
            self.post_count,
            self.total_engagement,
            self.avg_engagement,
            self.sentiment,
            self.recency,
            self.consistency,
        ]
    }
}

/// Run-scoped scoring parameters. Immutable once loaded and passed by
/// reference into every analysis component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Samples with fewer real posts than this go through estimation.
    pub min_posts: usize,
    /// Posts older than this contribute no recency.
    pub lookback_hours: u32,
    /// Posts newer than this get full recency.
    pub recent_window_hours: u32,
    /// Weighted per-post engagement that maps to an engagement score of 10.
    pub engagement_ceiling: f64,
    /// Maximum length of a ranked result.
    pub top_n: usize,
    pub weights: FactorWeights,
    pub baselines: BTreeMap<Category, Baseline>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_posts: 3,
            lookback_hours: 24 * 7,
            recent_window_hours: 1,
            engagement_ceiling: 20_000.0,
            top_n: 10,
            weights: FactorWeights::default(),
            baselines: default_baselines(),
        }
    }
}

impl ScoringConfig {
    #[must_use]
    pub fn baseline(&self, category: Category) -> Option<&Baseline> {
        self.baselines.get(&category)
    }

    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_posts == 0 {
            return Err(ConfigError::Validation(
                "min_posts must be at least 1".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(ConfigError::Validation(
                "top_n must be at least 1".to_string(),
            ));
        }
        if !self.engagement_ceiling.is_finite() || self.engagement_ceiling <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "engagement_ceiling must be positive, got {}",
                self.engagement_ceiling
            )));
        }
        if self.lookback_hours > MAX_LOOKBACK_HOURS {
            return Err(ConfigError::Validation(format!(
                "lookback_hours ({}) must not exceed {MAX_LOOKBACK_HOURS}",
                self.lookback_hours
            )));
        }
        if self.lookback_hours <= self.recent_window_hours {
            return Err(ConfigError::Validation(format!(
                "lookback_hours ({}) must exceed recent_window_hours ({})",
                self.lookback_hours, self.recent_window_hours
            )));
        }
        if self
            .weights
            .values()
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(ConfigError::Validation(
                "factor weights must be non-negative".to_string(),
            ));
        }
        let sum = self.weights.sum();
        if sum <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "factor weights must have a positive sum, got {sum:.6}"
            )));
        }
        for (category, baseline) in &self.baselines {
            let values = [baseline.avg_likes, baseline.avg_comments, baseline.avg_shares];
            if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(ConfigError::Validation(format!(
                    "baseline for '{category}' must be non-negative"
                )));
            }
        }
        Ok(())
    }
}

fn default_baselines() -> BTreeMap<Category, Baseline> {
    let table = [
        (Category::Technology, 320.0, 45.0, 18.0),
        (Category::Business, 240.0, 30.0, 14.0),
        (Category::Health, 280.0, 38.0, 22.0),
        (Category::Food, 410.0, 52.0, 20.0),
        (Category::Travel, 380.0, 41.0, 25.0),
        (Category::Fashion, 450.0, 48.0, 16.0),
        (Category::Entertainment, 520.0, 70.0, 30.0),
        (Category::Sports, 470.0, 66.0, 24.0),
    ];
    table
        .into_iter()
        .map(|(category, avg_likes, avg_comments, avg_shares)| {
            (
                category,
                Baseline {
                    avg_likes,
                    avg_comments,
                    avg_shares,
                },
            )
        })
        .collect()
}

/// Load and validate scoring configuration from a YAML file.
///
/// A missing file yields [`ScoringConfig::default`]. Keys absent from the
/// file keep their defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, parsed, or
/// fails validation.
pub fn load_scoring_config(path: &Path) -> Result<ScoringConfig, ConfigError> {
    if !path.exists() {
        let config = ScoringConfig::default();
        config.validate()?;
        return Ok(config);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ScoringFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: ScoringConfig = serde_yaml::from_str(&content)?;
    config.validate()?;

    Ok(config)
}
