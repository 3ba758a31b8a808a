use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

use git_bonsai::git::{BonsaiError, GitRepository};
use git_bonsai::layout::BonsaiLayout;
use git_bonsai::render::{export_json, SvgRenderer};
use git_bonsai::state::BonsaiConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

/// Render a Git repository's history as a bonsai tree
#[derive(Parser, Debug)]
#[command(name = "git-bonsai", version, about)]
struct Args {
    /// Repository to read; parent directories are searched
    #[arg(default_value = ".")]
    repo: PathBuf,

    /// Output file; standard output when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum number of commits to load from HEAD
    #[arg(short = 'n', long)]
    max_commits: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// JSON config file; defaults to the user config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => BonsaiConfig::load_from(path)?,
        None => BonsaiConfig::load(),
    };
    if let Some(max_commits) = args.max_commits {
        if max_commits == 0 {
            return Err(BonsaiError::configuration("max-commits", "must be at least 1").into());
        }
        config.git.max_commits = max_commits;
    }

    let repo = GitRepository::discover(&args.repo)?;
    info!("Reading {} at {:?}", repo.info().name, repo.path());

    let graph = repo.load_graph(&config.git)?;
    let nodes = BonsaiLayout::new(config.clone())
        .generate_layout(&graph.commits, &graph.branches)
        .map_err(BonsaiError::from)?;

    let rendered = match args.format {
        OutputFormat::Svg => SvgRenderer::new(&config).render(&nodes),
        OutputFormat::Json => export_json(&nodes)?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {} nodes to {}", nodes.len(), path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
