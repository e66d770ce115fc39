//! Read-only queries over a built [`GeneGraph`]

use crate::entity::EntityKind;
use crate::error::{Error, Result};
use crate::graph::GeneGraph;
use crate::limits::DEFAULT_DEPTH;
use crate::report::GeneReport;
use crate::traversal::TraversalEngine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Downstream gene id -> its direct GO term ids
pub type GoTermsByGene = BTreeMap<String, Vec<String>>;

/// The four query operations, without arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    DirectPathways,
    DirectGoTerms,
    DownstreamGenes,
    DownstreamGoTerms,
}

impl QueryKind {
    pub const ALL: [QueryKind; 4] = [
        Self::DirectPathways,
        Self::DirectGoTerms,
        Self::DownstreamGenes,
        Self::DownstreamGoTerms,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::DirectPathways => "direct_pathways",
            Self::DirectGoTerms => "direct_go_terms",
            Self::DownstreamGenes => "downstream_genes",
            Self::DownstreamGoTerms => "downstream_go_terms",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::DirectPathways => {
                "Pathways the gene is directly involved in (disease and pathway questions)."
            }
            Self::DirectGoTerms => {
                "GO terms (processes, functions, components) directly annotated on the gene."
            }
            Self::DownstreamGenes => {
                "Genes reachable from the gene along pathway relations within a hop bound."
            }
            Self::DownstreamGoTerms => {
                "Downstream genes within a hop bound, each with its direct GO terms."
            }
        }
    }

    /// Whether the operation takes a depth bound
    pub fn is_bounded(self) -> bool {
        matches!(self, Self::DownstreamGenes | Self::DownstreamGoTerms)
    }

    /// Attach arguments; `depth` is ignored by unbounded operations
    pub fn with_depth(self, depth: u32) -> GeneQuery {
        match self {
            Self::DirectPathways => GeneQuery::DirectPathways,
            Self::DirectGoTerms => GeneQuery::DirectGoTerms,
            Self::DownstreamGenes => GeneQuery::DownstreamGenes { depth },
            Self::DownstreamGoTerms => GeneQuery::DownstreamGoTerms { depth },
        }
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A query operation with its arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum GeneQuery {
    DirectPathways,
    DirectGoTerms,
    DownstreamGenes {
        #[serde(default = "default_depth")]
        depth: u32,
    },
    DownstreamGoTerms {
        #[serde(default = "default_depth")]
        depth: u32,
    },
}

fn default_depth() -> u32 {
    DEFAULT_DEPTH
}

impl GeneQuery {
    pub fn kind(&self) -> QueryKind {
        match self {
            Self::DirectPathways => QueryKind::DirectPathways,
            Self::DirectGoTerms => QueryKind::DirectGoTerms,
            Self::DownstreamGenes { .. } => QueryKind::DownstreamGenes,
            Self::DownstreamGoTerms { .. } => QueryKind::DownstreamGoTerms,
        }
    }
}

/// Result of [`QueryEngine::execute`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryOutput {
    Ids(Vec<String>),
    ByGene(GoTermsByGene),
}

impl QueryOutput {
    pub fn len(&self) -> usize {
        match self {
            Self::Ids(ids) => ids.len(),
            Self::ByGene(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Query engine over a finished graph.
///
/// Every operation takes a fully prefixed entity id (e.g. `GENE:INS`) and
/// fails with [`Error::NotFound`] when the id is absent from the graph.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'g> {
    graph: &'g GeneGraph,
}

impl<'g> QueryEngine<'g> {
    pub fn new(graph: &'g GeneGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g GeneGraph {
        self.graph
    }

    fn successors_of_kind(&self, id: &str, kind: EntityKind) -> Result<Vec<String>> {
        let successors = self
            .graph
            .successors(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        Ok(successors
            .into_iter()
            .filter(|succ| self.graph.kind_of(succ) == Some(kind))
            .map(str::to_string)
            .collect())
    }

    /// Direct successors of `id` that are pathways
    pub fn direct_pathways(&self, id: &str) -> Result<Vec<String>> {
        self.successors_of_kind(id, EntityKind::Pathway)
    }

    /// Direct successors of `id` that are GO terms
    pub fn direct_go_terms(&self, id: &str) -> Result<Vec<String>> {
        self.successors_of_kind(id, EntityKind::GoTerm)
    }

    /// Genes reachable from `id` within `depth` outgoing hops, excluding `id`.
    ///
    /// Returned in BFS order; callers should treat the result as a set.
    pub fn downstream_genes(&self, id: &str, depth: u32) -> Result<Vec<String>> {
        let result = TraversalEngine::reachable(self.graph, id, depth)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let genes: Vec<String> = result
            .others()
            .filter(|node| self.graph.kind_of(node) == Some(EntityKind::Gene))
            .map(str::to_string)
            .collect();

        tracing::debug!("{} has {} downstream genes within {} hops", id, genes.len(), depth);
        Ok(genes)
    }

    /// Direct GO terms of every gene downstream of `id`
    pub fn downstream_go_terms_by_gene(&self, id: &str, depth: u32) -> Result<GoTermsByGene> {
        self.downstream_genes(id, depth)?
            .into_iter()
            .map(|gene| {
                let terms = self.direct_go_terms(&gene)?;
                Ok((gene, terms))
            })
            .collect()
    }

    /// Run one query operation
    pub fn execute(&self, id: &str, query: &GeneQuery) -> Result<QueryOutput> {
        tracing::debug!("Executing {} for {}", query.kind(), id);

        match *query {
            GeneQuery::DirectPathways => self.direct_pathways(id).map(QueryOutput::Ids),
            GeneQuery::DirectGoTerms => self.direct_go_terms(id).map(QueryOutput::Ids),
            GeneQuery::DownstreamGenes { depth } => {
                self.downstream_genes(id, depth).map(QueryOutput::Ids)
            }
            GeneQuery::DownstreamGoTerms { depth } => self
                .downstream_go_terms_by_gene(id, depth)
                .map(QueryOutput::ByGene),
        }
    }

    /// Run all four operations for one gene
    pub fn gene_report(&self, id: &str, depth: u32) -> Result<GeneReport> {
        Ok(GeneReport {
            gene: id.to_string(),
            depth,
            pathways: self.direct_pathways(id)?,
            go_terms: self.direct_go_terms(id)?,
            downstream_genes: self.downstream_genes(id, depth)?,
            downstream_go_terms: self.downstream_go_terms_by_gene(id, depth)?,
        })
    }
}
