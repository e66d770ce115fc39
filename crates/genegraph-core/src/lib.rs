//! Genegraph Core - gene/pathway/GO graph engine
//!
//! This crate provides the domain records, the graph builder and the
//! read-only query engine. Parsing source files lives in `genegraph-ingest`.

pub mod builder;
pub mod entity;
pub mod error;
pub mod graph;
pub mod limits;
pub mod query;
pub mod relation;
pub mod report;
pub mod traversal;

pub use builder::{build_graph, GraphBuilder, Records};
pub use entity::{Entity, EntityKind, GENE_PREFIX, GO_PREFIX, PATHWAY_PREFIX};
pub use error::{Error, Result};
pub use graph::{GeneGraph, GraphStats};
pub use limits::{validate_depth, DEFAULT_DEPTH, MAX_QUERY_DEPTH};
pub use query::{GeneQuery, GoTermsByGene, QueryEngine, QueryKind, QueryOutput};
pub use relation::{Relationship, Source, ANNOTATED_WITH, INVOLVED_IN};
pub use report::GeneReport;
pub use traversal::{TraversalEngine, TraversalResult, TraversalStats};
