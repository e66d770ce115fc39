//! CLI command implementations

pub mod completions;
pub mod config;
pub mod operations;
pub mod query;
pub mod report;
pub mod stats;

use genegraph_core::Entity;

/// Accept `INS` or `GENE:INS`, returning the gene id
pub fn gene_id(input: &str) -> anyhow::Result<String> {
    Ok(Entity::gene(input.trim())?.id)
}
