use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// The fixed set of topical buckets hashtags are ranked within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Business,
    Health,
    Food,
    Travel,
    Fashion,
    Entertainment,
    Sports,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Technology,
        Category::Business,
        Category::Health,
        Category::Food,
        Category::Travel,
        Category::Fashion,
        Category::Entertainment,
        Category::Sports,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Health => "health",
            Category::Food => "food",
            Category::Travel => "travel",
            Category::Fashion => "fashion",
            Category::Entertainment => "entertainment",
            Category::Sports => "sports",
        }
    }

    /// Search keywords used by ingestion to find posts for this category.
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Technology => &["technology", "tech", "innovation", "digital", "ai", "software"],
            Category::Business => &["business", "entrepreneur", "startup", "marketing", "finance"],
            Category::Health => &["health", "fitness", "wellness", "medical", "nutrition"],
            Category::Food => &["food", "cooking", "recipe", "restaurant", "chef"],
            Category::Travel => &["travel", "tourism", "vacation", "adventure", "explore"],
            Category::Fashion => &["fashion", "style", "beauty", "makeup", "clothing"],
            Category::Entertainment => &["entertainment", "movies", "music", "gaming", "celebrity"],
            Category::Sports => &["sports", "football", "basketball", "soccer", "athlete"],
        }
    }

    /// Well-known hashtags for the category. Ingestion attributes posts with
    /// no explicit hashtag to the first few of these.
    #[must_use]
    pub fn seed_hashtags(self) -> &'static [&'static str] {
        match self {
            Category::Technology => &[
                "technology", "tech", "innovation", "ai", "artificialintelligence",
                "machinelearning", "software", "coding", "programming", "cybersecurity",
            ],
            Category::Business => &[
                "business", "entrepreneur", "startup", "businessgrowth", "marketing",
                "leadership", "success", "smallbusiness", "entrepreneurship", "investing",
            ],
            Category::Health => &[
                "health", "fitness", "wellness", "healthcare", "nutrition",
                "mentalhealth", "workout", "healthy", "healthylifestyle", "medicine",
            ],
            Category::Food => &[
                "food", "foodie", "cooking", "recipe", "foodporn",
                "instafood", "homemade", "yummy", "delicious", "chef",
            ],
            Category::Travel => &[
                "travel", "travelphotography", "wanderlust", "vacation", "adventure",
                "explore", "tourism", "travelgram", "instatravel", "nature",
            ],
            Category::Fashion => &[
                "fashion", "style", "ootd", "fashionblogger", "beauty",
                "makeup", "fashionista", "instafashion", "shopping", "outfitoftheday",
            ],
            Category::Entertainment => &[
                "entertainment", "movies", "music", "gaming", "tvshows",
                "celebrity", "hollywood", "streaming", "gamer", "film",
            ],
            Category::Sports => &[
                "sports", "fitness", "athlete", "training", "football",
                "basketball", "soccer", "gym", "motivation", "sportsnews",
            ],
        }
    }

    /// Resolve loose user input: exact name, 1-based index into [`Category::ALL`],
    /// or a unique prefix/substring match (`"tech"` resolves to technology).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCategory`] if nothing (or more than one
    /// category) matches.
    pub fn resolve(input: &str) -> Result<Self, ConfigError> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Err(ConfigError::UnknownCategory(input.to_string()));
        }

        if let Ok(index) = needle.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or_else(|| ConfigError::UnknownCategory(input.to_string()));
        }

        if let Some(exact) = Self::ALL.iter().find(|c| c.name() == needle) {
            return Ok(*exact);
        }

        let fuzzy: Vec<Category> = Self::ALL
            .iter()
            .copied()
            .filter(|c| c.name().contains(&needle) || needle.contains(c.name()))
            .collect();

        match fuzzy.as_slice() {
            [only] => Ok(*only),
            _ => Err(ConfigError::UnknownCategory(input.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownCategory(s.to_string()))
    }
}
