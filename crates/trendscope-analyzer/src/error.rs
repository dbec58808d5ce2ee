use thiserror::Error;
use trendscope_core::Category;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("hashtag #{hashtag} has no posts; route it through estimation before scoring")]
    EmptySample { hashtag: String },

    #[error("no category prior or baseline available to estimate #{hashtag} in {category}")]
    NoEstimateAvailable { hashtag: String, category: Category },
}
