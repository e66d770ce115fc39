//! Gene report command

use clap::Args;
use genegraph_core::{validate_depth, GeneReport, QueryEngine};

use crate::commands::gene_id;
use crate::output::{format_output, Tabular};
use crate::AppContext;

#[derive(Args)]
pub struct ReportArgs {
    /// Gene symbol (INS) or id (GENE:INS)
    pub gene: String,

    /// Hop bound for downstream operations
    #[arg(short, long)]
    pub depth: Option<u32>,
}

impl Tabular for GeneReport {
    fn to_table(&self) -> String {
        self.summary()
    }
}

pub async fn run(args: &ReportArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let gene = gene_id(&args.gene)?;
    let depth = args.depth.unwrap_or(ctx.default_depth);
    validate_depth(depth)?;

    let (graph, _) = ctx.load_graph().await?;
    let report = QueryEngine::new(&graph).gene_report(&gene, depth)?;

    println!("{}", format_output(&report, ctx.format)?);
    Ok(())
}
