//! Bounded breadth-first traversal over outgoing edges

use crate::graph::GeneGraph;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Traversal statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalStats {
    pub nodes_visited: usize,
    pub edges_traversed: usize,
    pub max_depth_reached: u32,
}

/// Nodes reached from a start node, each at its minimum hop distance
#[derive(Debug, Clone)]
pub struct TraversalResult<'g> {
    pub start: &'g str,

    /// Reached node ids with their distance, in BFS order; the start node
    /// comes first at distance 0
    pub reached: Vec<(&'g str, u32)>,

    pub stats: TraversalStats,
}

impl<'g> TraversalResult<'g> {
    /// Reached ids other than the start node
    pub fn others(&self) -> impl Iterator<Item = &'g str> + '_ {
        let start = self.start;
        self.reached
            .iter()
            .map(|&(id, _)| id)
            .filter(move |&id| id != start)
    }
}

/// Graph traversal engine
pub struct TraversalEngine;

impl TraversalEngine {
    /// BFS from `start` following outgoing edges, at most `max_depth` hops.
    ///
    /// Returns `None` if `start` is not in the graph.
    pub fn reachable<'g>(
        graph: &'g GeneGraph,
        start: &str,
        max_depth: u32,
    ) -> Option<TraversalResult<'g>> {
        let start = graph.node_id(start)?;

        let mut visited: HashSet<&'g str> = HashSet::new();
        let mut queue: VecDeque<(&'g str, u32)> = VecDeque::new();
        let mut reached = Vec::new();
        let mut stats = TraversalStats::default();

        visited.insert(start);
        queue.push_back((start, 0));
        reached.push((start, 0));

        while let Some((current, depth)) = queue.pop_front() {
            stats.nodes_visited += 1;
            stats.max_depth_reached = stats.max_depth_reached.max(depth);

            if depth >= max_depth {
                continue;
            }

            for next in graph.successors(current).unwrap_or_default() {
                stats.edges_traversed += 1;

                if visited.insert(next) {
                    queue.push_back((next, depth + 1));
                    reached.push((next, depth + 1));
                }
            }
        }

        tracing::debug!(
            "BFS from {} (depth {}) visited {} nodes, traversed {} edges",
            start,
            max_depth,
            stats.nodes_visited,
            stats.edges_traversed
        );

        Some(TraversalResult {
            start,
            reached,
            stats,
        })
    }
}
