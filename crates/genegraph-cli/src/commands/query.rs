//! Single query operation command

use clap::{Args, ValueEnum};
use genegraph_core::{validate_depth, QueryEngine, QueryKind, QueryOutput};
use serde::Serialize;

use crate::commands::gene_id;
use crate::output::{format_output, id_lines, Tabular};
use crate::AppContext;

#[derive(Args)]
pub struct QueryArgs {
    /// Query operation
    #[arg(value_enum)]
    pub kind: QueryKindArg,

    /// Gene symbol (INS) or id (GENE:INS)
    pub gene: String,

    /// Hop bound for downstream operations
    #[arg(short, long)]
    pub depth: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QueryKindArg {
    DirectPathways,
    DirectGoTerms,
    DownstreamGenes,
    DownstreamGoTerms,
}

impl From<QueryKindArg> for QueryKind {
    fn from(arg: QueryKindArg) -> Self {
        match arg {
            QueryKindArg::DirectPathways => QueryKind::DirectPathways,
            QueryKindArg::DirectGoTerms => QueryKind::DirectGoTerms,
            QueryKindArg::DownstreamGenes => QueryKind::DownstreamGenes,
            QueryKindArg::DownstreamGoTerms => QueryKind::DownstreamGoTerms,
        }
    }
}

#[derive(Serialize)]
pub(crate) struct QueryView {
    gene: String,
    operation: QueryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    depth: Option<u32>,
    results: QueryOutput,
}

impl Tabular for QueryView {
    fn to_table(&self) -> String {
        let header = match self.depth {
            Some(depth) => format!(
                "{} for {} within {} hops ({} found):",
                self.operation,
                self.gene,
                depth,
                self.results.len()
            ),
            None => format!(
                "{} for {} ({} found):",
                self.operation,
                self.gene,
                self.results.len()
            ),
        };

        let body = match &self.results {
            QueryOutput::Ids(ids) => id_lines(ids),
            QueryOutput::ByGene(by_gene) if by_gene.is_empty() => "  (none)".to_string(),
            QueryOutput::ByGene(by_gene) => by_gene
                .iter()
                .map(|(gene, terms)| {
                    if terms.is_empty() {
                        format!("  {}: No GO terms", gene)
                    } else {
                        format!("  {}: {}", gene, terms.join(", "))
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
        };

        format!("{}\n{}", header, body)
    }
}

pub async fn run(args: &QueryArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let kind = QueryKind::from(args.kind);
    let gene = gene_id(&args.gene)?;
    let depth = args.depth.unwrap_or(ctx.default_depth);
    validate_depth(depth)?;

    if args.depth.is_some() && !kind.is_bounded() {
        tracing::warn!("{} takes no depth; ignoring --depth", kind);
    }

    let (graph, _) = ctx.load_graph().await?;
    let engine = QueryEngine::new(&graph);
    let results = engine.execute(&gene, &kind.with_depth(depth))?;
    tracing::info!("{} for {} returned {} results", kind, gene, results.len());

    let view = QueryView {
        gene,
        operation: kind,
        depth: kind.is_bounded().then_some(depth),
        results,
    };
    println!("{}", format_output(&view, ctx.format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_match_core() {
        for arg in QueryKindArg::value_variants() {
            let kind = QueryKind::from(*arg);
            let value = arg.to_possible_value().unwrap();
            assert_eq!(value.get_name().replace('-', "_"), kind.name());
        }
    }

    #[test]
    fn test_query_table() {
        let view = QueryView {
            gene: "GENE:INS".to_string(),
            operation: QueryKind::DownstreamGoTerms,
            depth: Some(1),
            results: QueryOutput::ByGene(
                [
                    ("GENE:IRS1".to_string(), vec!["GO:0005515".to_string()]),
                    ("GENE:INSR".to_string(), vec![]),
                ]
                .into_iter()
                .collect(),
            ),
        };

        assert_eq!(
            view.to_table(),
            "downstream_go_terms for GENE:INS within 1 hops (2 found):\n  GENE:INSR: No GO terms\n  GENE:IRS1: GO:0005515"
        );
    }

    #[test]
    fn test_query_json() {
        let view = QueryView {
            gene: "GENE:INS".to_string(),
            operation: QueryKind::DirectPathways,
            depth: None,
            results: QueryOutput::Ids(vec!["PATHWAY:hsa04930".to_string()]),
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["operation"], "direct_pathways");
        assert_eq!(json["results"][0], "PATHWAY:hsa04930");
        assert!(json.get("depth").is_none());
    }
}
