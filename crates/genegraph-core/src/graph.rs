//! Directed gene graph keyed by entity id

use crate::entity::{Entity, EntityKind};
use crate::relation::Relationship;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A node slot in the graph.
///
/// `entity` is `None` when the id was only ever seen as a relationship
/// endpoint.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub entity: Option<Entity>,
}

/// Graph statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub genes: usize,
    pub pathways: usize,
    pub go_terms: usize,
    /// Nodes that exist only as relationship endpoints
    pub untyped: usize,
}

/// Directed graph over entities.
///
/// Holds one entity record per id and one relationship record per ordered
/// `(from_id, to_id)` pair; later insertions replace the stored attributes
/// but keep the node or edge in its original adjacency position. Only
/// [`GraphBuilder`](crate::builder::GraphBuilder) mutates a graph, so a built
/// graph is read-only and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct GeneGraph {
    graph: DiGraph<Node, Relationship>,
    index: HashMap<String, NodeIndex>,
}

impl GeneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(Node {
            id: id.to_string(),
            entity: None,
        });
        self.index.insert(id.to_string(), idx);
        idx
    }

    /// Insert an entity, replacing any record already stored under its id
    pub(crate) fn insert_entity(&mut self, entity: Entity) {
        let idx = self.ensure_node(&entity.id);
        self.graph[idx].entity = Some(entity);
    }

    /// Insert a relationship, replacing the record for the same ordered pair.
    ///
    /// Missing endpoints are created as untyped nodes.
    pub(crate) fn insert_relationship(&mut self, relationship: Relationship) {
        let from = self.ensure_node(&relationship.from_id);
        let to = self.ensure_node(&relationship.to_id);
        self.graph.update_edge(from, to, relationship);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The graph-owned copy of `id`, if present
    pub fn node_id(&self, id: &str) -> Option<&str> {
        self.index.get(id).map(|&idx| self.graph[idx].id.as_str())
    }

    /// Stored entity record for `id`
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.index
            .get(id)
            .and_then(|&idx| self.graph[idx].entity.as_ref())
    }

    /// Kind of the entity stored under `id`, if it has a record
    pub fn kind_of(&self, id: &str) -> Option<EntityKind> {
        self.entity(id).map(|e| e.kind)
    }

    /// Stored relationship record for the ordered pair
    pub fn relationship(&self, from_id: &str, to_id: &str) -> Option<&Relationship> {
        let from = *self.index.get(from_id)?;
        let to = *self.index.get(to_id)?;
        self.graph
            .find_edge(from, to)
            .map(|edge| &self.graph[edge])
    }

    /// Direct successors of `id` in edge insertion order, or `None` if `id`
    /// is not in the graph
    pub fn successors(&self, id: &str) -> Option<Vec<&str>> {
        let idx = *self.index.get(id)?;
        // petgraph walks the outgoing list newest-first
        let mut ids: Vec<&str> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| self.graph[n].id.as_str())
            .collect();
        ids.reverse();
        Some(ids)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            ..Default::default()
        };
        for node in self.graph.node_weights() {
            match node.entity.as_ref().map(|e| e.kind) {
                Some(EntityKind::Gene) => stats.genes += 1,
                Some(EntityKind::Pathway) => stats.pathways += 1,
                Some(EntityKind::GoTerm) => stats.go_terms += 1,
                None => stats.untyped += 1,
            }
        }
        stats
    }
}
