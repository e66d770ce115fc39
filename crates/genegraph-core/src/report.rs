//! Combined per-gene query results

use crate::query::GoTermsByGene;
use serde::{Deserialize, Serialize};

/// Results of all four query operations for one gene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneReport {
    pub gene: String,
    pub depth: u32,
    pub pathways: Vec<String>,
    pub go_terms: Vec<String>,
    pub downstream_genes: Vec<String>,
    pub downstream_go_terms: GoTermsByGene,
}

impl GeneReport {
    /// Render the report as the plain-text context block handed to an
    /// answer-generating collaborator
    pub fn summary(&self) -> String {
        format!(
            "Gene: {}\nPathways: {}\nDirect GO Terms: {}\nDownstream Genes: {}\nDownstream Genes' GO Terms: {}",
            self.gene,
            join_or_none(&self.pathways),
            join_or_none(&self.go_terms),
            join_or_none(&self.downstream_genes),
            format_go_terms_by_gene(&self.downstream_go_terms),
        )
    }
}

fn join_or_none(ids: &[String]) -> String {
    if ids.is_empty() {
        "None".to_string()
    } else {
        ids.join(", ")
    }
}

/// `GENE:A: GO:1, GO:2; GENE:B: No GO terms`, or `None` for an empty map
pub fn format_go_terms_by_gene(by_gene: &GoTermsByGene) -> String {
    if by_gene.is_empty() {
        return "None".to_string();
    }

    by_gene
        .iter()
        .map(|(gene, terms)| {
            if terms.is_empty() {
                format!("{}: No GO terms", gene)
            } else {
                format!("{}: {}", gene, terms.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
