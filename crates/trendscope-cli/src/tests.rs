use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["trendscope"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_analyze_with_defaults() {
    let cli = Cli::try_parse_from(["trendscope", "analyze", "--input", "batches.json"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            ref input,
            category: None,
            output_dir: None,
            dry_run: false,
        }) if input == &PathBuf::from("batches.json")
    ));
}

#[test]
fn parses_analyze_with_all_flags() {
    let cli = Cli::try_parse_from([
        "trendscope",
        "analyze",
        "--input",
        "in.json",
        "--category",
        "tech",
        "--output-dir",
        "/tmp/results",
        "--dry-run",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            category: Some(ref c),
            output_dir: Some(ref dir),
            dry_run: true,
            ..
        }) if c == "tech" && dir == &PathBuf::from("/tmp/results")
    ));
}

#[test]
fn analyze_requires_input() {
    assert!(Cli::try_parse_from(["trendscope", "analyze"]).is_err());
}

#[test]
fn parses_categories_command() {
    let cli = Cli::try_parse_from(["trendscope", "categories"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Categories)));
}

#[test]
fn parses_score_with_defaults() {
    let cli = Cli::try_parse_from(["trendscope", "score", "--likes", "150"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Score {
            likes: 150,
            comments: 0,
            shares: 0,
            posts: 1,
        })
    ));
}

#[test]
fn score_rejects_negative_counts() {
    assert!(Cli::try_parse_from(["trendscope", "score", "--likes", "-3"]).is_err());
}

#[test]
fn only_analyze_and_score_read_app_config() {
    let needs = |args: &[&str]| {
        Cli::try_parse_from(args.iter().copied())
            .unwrap()
            .command
            .is_some_and(|c| c.needs_app_config())
    };
    assert!(!needs(&["trendscope", "categories"]));
    assert!(!needs(&["trendscope"]));
    assert!(needs(&["trendscope", "score", "--likes", "1"]));
    assert!(needs(&["trendscope", "analyze", "--input", "in.json"]));
}
