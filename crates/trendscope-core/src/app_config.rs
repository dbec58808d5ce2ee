use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level settings for a trendscope run.
///
/// Scoring parameters live in [`crate::ScoringConfig`]; the two optional
/// overrides here are applied on top of the scoring file by
/// [`AppConfig::apply_overrides`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub scoring_path: PathBuf,
    pub output_dir: PathBuf,
    pub max_concurrent_categories: usize,
    pub min_posts_override: Option<usize>,
    pub lookback_hours_override: Option<u32>,
}

impl AppConfig {
    /// Apply env-level overrides to a loaded scoring configuration.
    #[must_use]
    pub fn apply_overrides(&self, mut scoring: crate::ScoringConfig) -> crate::ScoringConfig {
        if let Some(min_posts) = self.min_posts_override {
            scoring.min_posts = min_posts;
        }
        if let Some(hours) = self.lookback_hours_override {
            scoring.lookback_hours = hours;
        }
        scoring
    }
}
