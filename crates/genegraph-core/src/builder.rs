//! Merging parsed records into a [`GeneGraph`]

use crate::entity::Entity;
use crate::graph::GeneGraph;
use crate::relation::Relationship;

/// Entity and relationship records produced by one parse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Records {
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
}

impl Records {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append another record set after this one, preserving order
    pub fn extend(&mut self, other: Records) {
        self.entities.extend(other.entities);
        self.relationships.extend(other.relationships);
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relationships.is_empty()
    }
}

/// Builds a [`GeneGraph`] from record batches.
///
/// All entities are inserted before any relationship, each in the order
/// given; later records win for attributes. No referential checks are made.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    entities: Vec<Entity>,
    relationships: Vec<Relationship>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entities(mut self, entities: impl IntoIterator<Item = Entity>) -> Self {
        self.entities.extend(entities);
        self
    }

    pub fn with_relationships(
        mut self,
        relationships: impl IntoIterator<Item = Relationship>,
    ) -> Self {
        self.relationships.extend(relationships);
        self
    }

    pub fn with_records(self, records: Records) -> Self {
        self.with_entities(records.entities)
            .with_relationships(records.relationships)
    }

    pub fn build(self) -> GeneGraph {
        let entity_count = self.entities.len();
        let relationship_count = self.relationships.len();

        let mut graph = GeneGraph::new();
        for entity in self.entities {
            graph.insert_entity(entity);
        }
        for relationship in self.relationships {
            graph.insert_relationship(relationship);
        }

        tracing::debug!(
            "Built graph from {} entity and {} relationship records: {} nodes, {} edges",
            entity_count,
            relationship_count,
            graph.node_count(),
            graph.edge_count()
        );

        graph
    }
}

/// Build a graph from entity and relationship lists
pub fn build_graph(entities: Vec<Entity>, relationships: Vec<Relationship>) -> GeneGraph {
    GraphBuilder::new()
        .with_entities(entities)
        .with_relationships(relationships)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use crate::relation::{Source, INVOLVED_IN};

    #[test]
    fn test_build_graph() {
        let entities = vec![
            Entity::gene("INS").unwrap(),
            Entity::pathway("hsa04930", "Type II diabetes mellitus").unwrap(),
        ];
        let relationships = vec![Relationship::new(
            "GENE:INS",
            "PATHWAY:hsa04930",
            INVOLVED_IN,
            Source::PathwayDb,
        )
        .unwrap()];

        let graph = build_graph(entities, relationships);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.kind_of("PATHWAY:hsa04930"), Some(EntityKind::Pathway));
    }

    #[test]
    fn test_later_batches_win() {
        let mut pathway = Records::new();
        pathway
            .entities
            .push(Entity::new("GENE:INS", "from pathway", EntityKind::Gene).unwrap());
        let mut annotation = Records::new();
        annotation
            .entities
            .push(Entity::new("GENE:INS", "from annotation", EntityKind::Gene).unwrap());

        let mut all = Records::new();
        all.extend(pathway);
        all.extend(annotation);
        let graph = GraphBuilder::new().with_records(all).build();

        assert_eq!(graph.entity("GENE:INS").unwrap().name, "from annotation");
    }

    #[test]
    fn test_relationship_without_entities_is_stored() {
        let graph = build_graph(
            vec![],
            vec![Relationship::new("GENE:A", "GENE:B", "PPrel", Source::PathwayDb).unwrap()],
        );

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.successors("GENE:A").unwrap(), vec!["GENE:B"]);
        assert!(graph.entity("GENE:A").is_none());
    }
}
