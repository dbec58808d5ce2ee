mod analyze;
mod categories;
mod score;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "trendscope")]
#[command(about = "Rank trending hashtags per category")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score and rank hashtags from an ingestion batch file
    Analyze {
        /// JSON file holding an array of ingestion batches
        #[arg(long)]
        input: PathBuf,

        /// Restrict the run to one category (name, index, or unique prefix)
        #[arg(long)]
        category: Option<String>,

        /// Directory for result files; defaults to TRENDSCOPE_OUTPUT_DIR
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Print the rankings without writing any files
        #[arg(long)]
        dry_run: bool,
    },
    /// List the categories with their search keywords
    Categories,
    /// Print the engagement score for one aggregate of posts
    Score {
        #[arg(long, default_value_t = 0)]
        likes: u64,

        #[arg(long, default_value_t = 0)]
        comments: u64,

        #[arg(long, default_value_t = 0)]
        shares: u64,

        /// Number of posts the counts were summed over
        #[arg(long, default_value_t = 1)]
        posts: u64,
    },
}

impl Commands {
    /// Whether the command reads `TRENDSCOPE_*` settings.
    fn needs_app_config(&self) -> bool {
        matches!(self, Commands::Analyze { .. } | Commands::Score { .. })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };
    if !command.needs_app_config() {
        categories::print_categories();
        return Ok(());
    }

    let config = trendscope_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Analyze {
            input,
            category,
            output_dir,
            dry_run,
        } => {
            let scoring = load_scoring(&config)?;
            tracing::info!(env = %config.env, scoring_path = %config.scoring_path.display(), "starting analysis");
            analyze::run_analyze(
                &config,
                scoring,
                &input,
                category.as_deref(),
                output_dir.as_deref(),
                dry_run,
            )
            .await?;
        }
        Commands::Categories => categories::print_categories(),
        Commands::Score {
            likes,
            comments,
            shares,
            posts,
        } => {
            let scoring = load_scoring(&config)?;
            score::run_score(&scoring, likes, comments, shares, posts)?;
        }
    }

    Ok(())
}

/// Scoring file plus env overrides, validated after the overrides apply.
fn load_scoring(
    config: &trendscope_core::AppConfig,
) -> anyhow::Result<trendscope_core::ScoringConfig> {
    let scoring = trendscope_core::load_scoring_config(&config.scoring_path)?;
    let scoring = config.apply_overrides(scoring);
    scoring.validate()?;
    Ok(scoring)
}

#[cfg(test)]
mod tests;
