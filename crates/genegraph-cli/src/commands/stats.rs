//! Graph statistics command

use genegraph_core::GraphStats;
use genegraph_ingest::IngestReport;
use serde::Serialize;

use crate::output::{format_output, Tabular};
use crate::AppContext;

#[derive(Serialize)]
struct StatsView<'a> {
    graph: GraphStats,
    ingest: &'a IngestReport,
}

impl Tabular for StatsView<'_> {
    fn to_table(&self) -> String {
        let g = &self.graph;
        let mut lines = vec![
            format!("Graph: {} nodes, {} edges", g.node_count, g.edge_count),
            format!("  Genes: {}", g.genes),
            format!("  Pathways: {}", g.pathways),
            format!("  GO terms: {}", g.go_terms),
        ];
        if g.untyped > 0 {
            lines.push(format!("  Untyped: {}", g.untyped));
        }

        let report = self.ingest;
        lines.push("Sources:".to_string());
        lines.push(format!(
            "  Pathway files: {} parsed, {} failed",
            report.parsed_files(),
            report.failed_files.len()
        ));
        lines.push(format!("  Known genes: {}", report.known_genes));
        match &report.annotations {
            Some(a) => lines.push(format!(
                "  Annotation rows: {} kept, {} filtered, {} malformed",
                a.kept, a.filtered, a.malformed
            )),
            None => lines.push("  Annotation rows: unavailable".to_string()),
        }

        if !report.failed_files.is_empty() {
            lines.push("Failed files:".to_string());
            for failed in &report.failed_files {
                lines.push(format!("  {}: {}", failed.path.display(), failed.error));
            }
        }
        if !report.unavailable.is_empty() {
            lines.push("Missing sources:".to_string());
            for path in &report.unavailable {
                lines.push(format!("  {}", path.display()));
            }
        }

        lines.join("\n")
    }
}

pub async fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let (graph, report) = ctx.load_graph().await?;
    let view = StatsView {
        graph: graph.stats(),
        ingest: &report,
    };
    println!("{}", format_output(&view, ctx.format)?);
    Ok(())
}
