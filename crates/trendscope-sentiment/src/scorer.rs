//! Lexicon scorer for social-media post sentiment.

use trendscope_core::SentimentLabel;

use crate::error::SentimentError;

/// Word weights for general social-media vocabulary.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("amazing", 0.6),
    ("awesome", 0.6),
    ("beautiful", 0.5),
    ("best", 0.6),
    ("brilliant", 0.6),
    ("congrats", 0.5),
    ("congratulations", 0.5),
    ("delicious", 0.5),
    ("excellent", 0.7),
    ("excited", 0.5),
    ("exciting", 0.5),
    ("fantastic", 0.6),
    ("fun", 0.4),
    ("good", 0.4),
    ("great", 0.5),
    ("happy", 0.5),
    ("helpful", 0.4),
    ("incredible", 0.6),
    ("inspiring", 0.5),
    ("love", 0.6),
    ("loved", 0.6),
    ("nice", 0.3),
    ("perfect", 0.7),
    ("proud", 0.4),
    ("recommend", 0.4),
    ("success", 0.5),
    ("thanks", 0.3),
    ("win", 0.4),
    ("wonderful", 0.6),
    ("yummy", 0.5),
    // Negative signals
    ("angry", -0.5),
    ("awful", -0.7),
    ("bad", -0.5),
    ("boring", -0.4),
    ("broken", -0.4),
    ("disappointed", -0.5),
    ("disappointing", -0.5),
    ("disaster", -0.7),
    ("fail", -0.5),
    ("failed", -0.5),
    ("fake", -0.4),
    ("hate", -0.7),
    ("horrible", -0.7),
    ("poor", -0.4),
    ("problem", -0.3),
    ("sad", -0.4),
    ("scam", -0.7),
    ("terrible", -0.7),
    ("ugly", -0.5),
    ("waste", -0.5),
    ("worst", -0.8),
    ("wrong", -0.4),
];

/// Tokens that invert the polarity of the word immediately after them.
const NEGATIONS: &[&str] = &["not", "no", "never", "isn't", "wasn't", "don't", "didn't"];

/// Sentiment of a single post.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostSentiment {
    /// In `[-1.0, 1.0]`.
    pub polarity: f64,
    /// Share of tokens that carried sentiment, in `[0.0, 1.0]`.
    pub subjectivity: f64,
    pub label: SentimentLabel,
}

impl PostSentiment {
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
            label: SentimentLabel::Neutral,
        }
    }
}

/// Anything that can assign a polarity to post text.
pub trait SentimentScorer: Send + Sync {
    /// Analyze one post's text.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if the text cannot be analyzed.
    fn analyze(&self, text: &str) -> Result<PostSentiment, SentimentError>;
}

/// [`SentimentScorer`] backed by [`LEXICON`].
///
/// Polarity is the mean weight of the matched words, so it stays in
/// `[-1, 1]` regardless of text length. A negation token flips the next
/// matched word at half strength.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    max_text_chars: usize,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self {
            max_text_chars: 20_000,
        }
    }
}

impl LexiconScorer {
    #[must_use]
    pub fn with_max_text_chars(max_text_chars: usize) -> Self {
        Self { max_text_chars }
    }
}

impl SentimentScorer for LexiconScorer {
    fn analyze(&self, text: &str) -> Result<PostSentiment, SentimentError> {
        let chars = text.chars().count();
        if chars > self.max_text_chars {
            return Err(SentimentError::TextTooLong {
                chars,
                limit: self.max_text_chars,
            });
        }

        let mut tokens = 0_usize;
        let mut matched = 0_usize;
        let mut sum = 0.0_f64;
        let mut negate_next = false;

        for word in text.split_whitespace() {
            let w = word
                .trim_matches(|c: char| !c.is_alphabetic() && c != '\'')
                .trim_start_matches('#')
                .to_lowercase();
            if w.is_empty() {
                continue;
            }
            tokens += 1;

            if NEGATIONS.contains(&w.as_str()) {
                negate_next = true;
                continue;
            }

            if let Some(&(_, weight)) = LEXICON.iter().find(|(lex, _)| *lex == w) {
                matched += 1;
                sum += if negate_next { -weight * 0.5 } else { weight };
            }
            negate_next = false;
        }

        if matched == 0 {
            return Ok(PostSentiment::neutral());
        }

        #[allow(clippy::cast_precision_loss)]
        let polarity = (sum / matched as f64).clamp(-1.0, 1.0);
        if !polarity.is_finite() {
            return Err(SentimentError::NonFinite);
        }
        #[allow(clippy::cast_precision_loss)]
        let subjectivity = matched as f64 / tokens as f64;

        Ok(PostSentiment {
            polarity,
            subjectivity,
            label: SentimentLabel::from_polarity(polarity),
        })
    }
}
