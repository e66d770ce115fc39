//! Relationship (edge) types

use crate::error::Result;
use crate::limits::validate_required;
use serde::{Deserialize, Serialize};

/// Membership of a gene in a pathway
pub const INVOLVED_IN: &str = "involved_in";

/// Link from a gene to a GO term
pub const ANNOTATED_WITH: &str = "annotated_with";

/// Database a relationship was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    PathwayDb,
    AnnotationDb,
}

/// A directed relationship between two entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Source entity id
    pub from_id: String,

    /// Target entity id
    pub to_id: String,

    /// Relationship category (e.g., "involved_in", "PPrel")
    pub kind: String,

    /// Qualifier for causal relations (e.g., "phosphorylation")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,

    /// Optional weight/strength of relationship
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    pub source: Source,
}

impl Relationship {
    /// Create a new relationship, rejecting empty endpoint ids
    pub fn new(
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        kind: impl Into<String>,
        source: Source,
    ) -> Result<Self> {
        let from_id = from_id.into();
        let to_id = to_id.into();
        validate_required("from_id", &from_id)?;
        validate_required("to_id", &to_id)?;

        Ok(Self {
            from_id,
            to_id,
            kind: kind.into(),
            subtype: None,
            weight: None,
            source,
        })
    }

    /// Set the subtype of this relationship
    pub fn with_subtype(mut self, subtype: Option<String>) -> Self {
        self.subtype = subtype;
        self
    }

    /// Set the weight of this relationship
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}
