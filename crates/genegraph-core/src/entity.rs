//! Entity (node) types

use crate::error::Result;
use crate::limits::{validate_required, ValidationError};
use serde::{Deserialize, Serialize};

/// Id prefix for gene entities
pub const GENE_PREFIX: &str = "GENE:";

/// Id prefix for pathway entities
pub const PATHWAY_PREFIX: &str = "PATHWAY:";

/// Id prefix for GO term entities
pub const GO_PREFIX: &str = "GO:";

/// Entity kind classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Gene,
    Pathway,
    GoTerm,
}

impl EntityKind {
    /// The namespace prefix every id of this kind starts with
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Gene => GENE_PREFIX,
            Self::Pathway => PATHWAY_PREFIX,
            Self::GoTerm => GO_PREFIX,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gene => "gene",
            Self::Pathway => "pathway",
            Self::GoTerm => "go_term",
        }
    }

    /// Build the prefixed id for a symbol or accession.
    ///
    /// A key that already carries the prefix (GAF term ids are written
    /// `GO:0005515`) is not prefixed twice.
    pub fn id_for(self, key: &str) -> String {
        format!("{}{}", self.prefix(), self.strip_prefix(key))
    }

    /// The key part of `id`, without this kind's prefix
    pub fn strip_prefix(self, id: &str) -> &str {
        id.strip_prefix(self.prefix()).unwrap_or(id)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity in the gene graph (a node)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Prefixed identifier, e.g. `GENE:INS`
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Entity kind
    pub kind: EntityKind,

    /// Alternative labels, in source order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,
}

impl Entity {
    /// Create a new entity, rejecting an empty id
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: EntityKind) -> Result<Self> {
        let id = id.into();
        validate_required("id", &id)?;
        Ok(Self {
            id,
            name: name.into(),
            kind,
            synonyms: None,
        })
    }

    /// Gene entity named by its symbol
    pub fn gene(symbol: &str) -> Result<Self> {
        Self::keyed(EntityKind::Gene, symbol, symbol)
    }

    /// Pathway entity keyed by pathway identifier
    pub fn pathway(pathway_id: &str, title: impl Into<String>) -> Result<Self> {
        Self::keyed(EntityKind::Pathway, pathway_id, title)
    }

    /// GO term entity keyed by term identifier
    pub fn go_term(term_id: &str, name: impl Into<String>) -> Result<Self> {
        Self::keyed(EntityKind::GoTerm, term_id, name)
    }

    fn keyed(kind: EntityKind, key: &str, name: impl Into<String>) -> Result<Self> {
        if kind.strip_prefix(key).is_empty() {
            return Err(ValidationError::EmptyKey {
                prefix: kind.prefix(),
            }
            .into());
        }
        Self::new(kind.id_for(key), name, kind)
    }

    /// Attach synonyms; an empty list leaves the field absent
    pub fn with_synonyms(mut self, synonyms: Vec<String>) -> Self {
        self.synonyms = if synonyms.is_empty() {
            None
        } else {
            Some(synonyms)
        };
        self
    }
}
