//! Genegraph CLI - Command line interface for the gene knowledge graph

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use genegraph_core::GeneGraph;
use genegraph_ingest::{IngestReport, Sources};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, config as config_cmd, operations, query, report, stats};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "genegraph")]
#[command(author, version, about = "Query genes, pathways and GO terms as one graph")]
pub struct Cli {
    /// Directory of KGML pathway files
    #[arg(long, global = true, env = "GENEGRAPH_PATHWAY_DIR")]
    pub pathway_dir: Option<PathBuf>,

    /// GAF annotation file
    #[arg(long, global = true, env = "GENEGRAPH_ANNOTATION_FILE")]
    pub annotation_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load sources and show graph statistics
    Stats,
    /// Run one query operation for a gene
    Query(query::QueryArgs),
    /// Run every query operation for a gene
    Report(report::ReportArgs),
    /// List the available query operations
    Operations,
    /// Manage configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Settings resolved from flags over the config file
pub struct AppContext {
    pub sources: Sources,
    pub default_depth: u32,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let config = Config::load()?;
        Ok(Self::resolve(cli, config))
    }

    fn resolve(cli: &Cli, config: Config) -> Self {
        let pathway_dir = cli.pathway_dir.clone().unwrap_or(config.pathway_dir);
        let annotation_file = cli
            .annotation_file
            .clone()
            .unwrap_or(config.annotation_file);

        Self {
            sources: Sources::new(pathway_dir, annotation_file),
            default_depth: config.default_depth,
            format: cli.format.unwrap_or(config.format),
            quiet: cli.quiet,
        }
    }

    /// Ingest all sources and build the graph, reporting skipped inputs on stderr
    pub async fn load_graph(&self) -> anyhow::Result<(GeneGraph, IngestReport)> {
        tracing::debug!(
            "Loading pathways from {:?}, annotations from {:?}",
            self.sources.pathway_dir,
            self.sources.annotation_file
        );

        let (graph, report) = genegraph_ingest::load_graph(&self.sources).await?;

        if !self.quiet {
            for path in &report.unavailable {
                eprintln!("Warning: source not found: {}", path.display());
            }
            for failed in &report.failed_files {
                eprintln!("Warning: skipped {}: {}", failed.path.display(), failed.error);
            }
        }

        Ok((graph, report))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting genegraph CLI");

    match &cli.command {
        Commands::Stats => stats::run(&AppContext::new(&cli)?).await?,
        Commands::Query(args) => query::run(args, &AppContext::new(&cli)?).await?,
        Commands::Report(args) => report::run(args, &AppContext::new(&cli)?).await?,
        Commands::Operations => operations::run(&AppContext::new(&cli)?)?,
        Commands::Config(args) => config_cmd::run(args)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
