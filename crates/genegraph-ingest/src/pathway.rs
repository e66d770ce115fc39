//! KGML pathway parser
//!
//! A KGML document describes one pathway diagram:
//!
//! ```xml
//! <pathway name="path:hsa04930" title="Type II diabetes mellitus">
//!   <entry id="1" name="hsa:3630" type="gene">
//!     <graphics name="INS, IDDM, IDDM1, IDDM2"/>
//!   </entry>
//!   <relation entry1="1" entry2="2" type="PPrel">
//!     <subtype name="activation" value="--&gt;"/>
//!   </relation>
//! </pathway>
//! ```
//!
//! Only gene entries become entities. One entry may list several genes (a
//! family or group box); relations between entries fan out to every member
//! pair and every subtype.

use crate::error::{IngestError, IngestResult};
use genegraph_core::{Entity, Records, Relationship, Source, INVOLVED_IN};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_PATHWAY_ID: &str = "unknown";
const DEFAULT_PATHWAY_TITLE: &str = "Unknown Pathway";
const GENE_ENTRY_TYPE: &str = "gene";

#[derive(Debug, Deserialize)]
struct KgmlPathway {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(rename = "@title", default)]
    title: Option<String>,
    #[serde(rename = "entry", default)]
    entries: Vec<KgmlEntry>,
    #[serde(rename = "relation", default)]
    relations: Vec<KgmlRelation>,
}

#[derive(Debug, Deserialize)]
struct KgmlEntry {
    #[serde(rename = "@id")]
    id: String,
    /// Space-separated `db:accession` tokens
    #[serde(rename = "@name", default)]
    name: String,
    #[serde(rename = "@type", default)]
    entry_type: String,
    #[serde(rename = "graphics", default)]
    graphics: Vec<KgmlGraphics>,
}

#[derive(Debug, Deserialize)]
struct KgmlGraphics {
    /// Comma-separated display labels
    #[serde(rename = "@name", default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KgmlRelation {
    #[serde(rename = "@entry1")]
    entry1: String,
    #[serde(rename = "@entry2")]
    entry2: String,
    #[serde(rename = "@type", default)]
    relation_type: String,
    #[serde(rename = "subtype", default)]
    subtypes: Vec<KgmlSubtype>,
}

#[derive(Debug, Deserialize)]
struct KgmlSubtype {
    #[serde(rename = "@name", default)]
    name: Option<String>,
}

impl KgmlEntry {
    /// Display labels, falling back to the raw name when the entry has no
    /// labelled graphics element
    fn labels(&self) -> Vec<String> {
        let raw = self
            .graphics
            .first()
            .and_then(|g| g.name.as_deref())
            .unwrap_or(&self.name);

        raw.split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Accessions with the `db:` part removed
    fn accessions(&self) -> impl Iterator<Item = &str> {
        self.name
            .split_whitespace()
            .map(|token| token.rsplit_once(':').map_or(token, |(_, acc)| acc))
    }
}

fn is_numeric(label: &str) -> bool {
    !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit())
}

/// First label that is not purely numeric, else `fallback`.
///
/// Some KGML labels are bare accession numbers rather than symbols.
pub fn choose_symbol(labels: &[String], fallback: &str) -> String {
    labels
        .iter()
        .find(|label| !label.is_empty() && !is_numeric(label))
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

/// KGML pathway parser
pub struct PathwayParser;

impl PathwayParser {
    /// Read and parse one KGML file
    pub fn parse_file(path: &Path) -> IngestResult<Records> {
        let content =
            std::fs::read_to_string(path).map_err(|e| IngestError::unavailable(path, e))?;
        Self::parse_str(&content, path)
    }

    /// Parse KGML content; `origin` names the document in errors and logs
    pub fn parse_str(content: &str, origin: &Path) -> IngestResult<Records> {
        let doc: KgmlPathway =
            quick_xml::de::from_str(content).map_err(|e| IngestError::parse(origin, e))?;
        let records = Self::convert(&doc)?;

        tracing::debug!(
            "Parsed {}: {} entities, {} relationships",
            origin.display(),
            records.entities.len(),
            records.relationships.len()
        );

        Ok(records)
    }

    /// Turn a parsed document into records.
    ///
    /// Every accession of a gene entry searches the whole label list for its
    /// symbol, whatever its position and however many labels there are.
    /// Only when no label is usable does the accession name itself. A group
    /// box `hsa:5290 hsa:5291` labelled `PIK3CA` therefore yields two
    /// `GENE:PIK3CA` records that collapse into one node in the graph, and a
    /// box labelled `5290` yields `GENE:5290` and `GENE:5291`.
    fn convert(doc: &KgmlPathway) -> IngestResult<Records> {
        let mut records = Records::new();

        let pathway_id = doc
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| name.strip_prefix("path:").unwrap_or(name))
            .unwrap_or(DEFAULT_PATHWAY_ID);
        let title = doc.title.as_deref().unwrap_or(DEFAULT_PATHWAY_TITLE);

        let pathway = Entity::pathway(pathway_id, title)?;
        let pathway_node = pathway.id.clone();
        records.entities.push(pathway);

        // entry id -> gene ids it expanded to, in accession order
        let mut genes_by_entry: HashMap<&str, Vec<String>> = HashMap::new();

        for entry in doc.entries.iter().filter(|e| e.entry_type == GENE_ENTRY_TYPE) {
            let labels = entry.labels();

            for accession in entry.accessions() {
                let symbol = choose_symbol(&labels, accession);
                let synonyms = if labels.len() > 1 {
                    labels.iter().filter(|l| **l != symbol).cloned().collect()
                } else {
                    Vec::new()
                };

                let gene = Entity::gene(&symbol)?.with_synonyms(synonyms);
                records.relationships.push(Relationship::new(
                    gene.id.clone(),
                    pathway_node.clone(),
                    INVOLVED_IN,
                    Source::PathwayDb,
                )?);
                genes_by_entry
                    .entry(entry.id.as_str())
                    .or_default()
                    .push(gene.id.clone());
                records.entities.push(gene);
            }
        }

        let mut skipped = 0usize;
        for relation in &doc.relations {
            let (Some(sources), Some(targets)) = (
                genes_by_entry.get(relation.entry1.as_str()),
                genes_by_entry.get(relation.entry2.as_str()),
            ) else {
                skipped += 1;
                continue;
            };

            let mut subtypes: Vec<Option<&str>> = relation
                .subtypes
                .iter()
                .filter_map(|s| s.name.as_deref())
                .filter(|name| !name.is_empty())
                .map(Some)
                .collect();
            if subtypes.is_empty() {
                subtypes.push(None);
            }

            for source in sources {
                for target in targets {
                    for subtype in &subtypes {
                        records.relationships.push(
                            Relationship::new(
                                source.as_str(),
                                target.as_str(),
                                relation.relation_type.as_str(),
                                Source::PathwayDb,
                            )?
                            .with_subtype(subtype.map(str::to_string)),
                        );
                    }
                }
            }
        }

        if skipped > 0 {
            tracing::debug!(
                "{}: skipped {} relations with non-gene endpoints",
                pathway_node,
                skipped
            );
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genegraph_core::EntityKind;

    fn parse(xml: &str) -> Records {
        PathwayParser::parse_str(xml, Path::new("test.xml")).unwrap()
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_choose_symbol() {
        assert_eq!(choose_symbol(&labels(&["123", "ABC", "DEF"]), "X"), "ABC");
        assert_eq!(choose_symbol(&labels(&["123", "456"]), "X"), "X");
        assert_eq!(choose_symbol(&[], "X"), "X");
        // Mixed alphanumerics are symbols
        assert_eq!(choose_symbol(&labels(&["IRS1"]), "X"), "IRS1");
    }

    #[test]
    fn test_pathway_entity() {
        let records = parse(
            r##"<?xml version="1.0"?>
            <!DOCTYPE pathway SYSTEM "https://www.kegg.jp/kegg/xml/KGML_v0.7.2_.dtd">
            <pathway name="path:hsa04930" org="hsa" number="04930" title="Type II diabetes mellitus">
            </pathway>"##,
        );

        assert_eq!(records.entities.len(), 1);
        let pathway = &records.entities[0];
        assert_eq!(pathway.id, "PATHWAY:hsa04930");
        assert_eq!(pathway.name, "Type II diabetes mellitus");
        assert_eq!(pathway.kind, EntityKind::Pathway);
        assert!(records.relationships.is_empty());
    }

    #[test]
    fn test_pathway_defaults() {
        let records = parse(r##"<pathway></pathway>"##);

        assert_eq!(records.entities[0].id, "PATHWAY:unknown");
        assert_eq!(records.entities[0].name, "Unknown Pathway");
    }

    #[test]
    fn test_single_gene_entry() {
        let records = parse(
            r##"<pathway name="path:hsa04930" title="T2D">
                <entry id="1" name="hsa:3630" type="gene">
                    <graphics name="INS, IDDM, IDDM1" fgcolor="#000000" type="rectangle"/>
                </entry>
            </pathway>"##,
        );

        let gene = &records.entities[1];
        assert_eq!(gene.id, "GENE:INS");
        assert_eq!(gene.name, "INS");
        assert_eq!(gene.synonyms, Some(labels(&["IDDM", "IDDM1"])));

        assert_eq!(records.relationships.len(), 1);
        let rel = &records.relationships[0];
        assert_eq!(rel.from_id, "GENE:INS");
        assert_eq!(rel.to_id, "PATHWAY:hsa04930");
        assert_eq!(rel.kind, INVOLVED_IN);
        assert_eq!(rel.source, Source::PathwayDb);
    }

    #[test]
    fn test_single_label_has_no_synonyms() {
        let records = parse(
            r##"<pathway name="path:p1" title="P1">
                <entry id="1" name="hsa:3643" type="gene"><graphics name="INSR"/></entry>
            </pathway>"##,
        );

        assert_eq!(records.entities[1].id, "GENE:INSR");
        assert!(records.entities[1].synonyms.is_none());
    }

    #[test]
    fn test_group_entry_expansion() {
        let records = parse(
            r##"<pathway name="path:p1" title="P1">
                <entry id="7" name="hsa:1 hsa:2" type="gene"><graphics name="SYM1, SYM2"/></entry>
            </pathway>"##,
        );

        // Both accessions take the first usable label
        let genes: Vec<_> = records.entities.iter().skip(1).collect();
        assert_eq!(genes.len(), 2);
        assert_eq!(genes[0].id, "GENE:SYM1");
        assert_eq!(genes[0].synonyms, Some(labels(&["SYM2"])));
        assert_eq!(genes[1], genes[0]);

        let memberships: Vec<_> = records
            .relationships
            .iter()
            .map(|r| (r.from_id.as_str(), r.to_id.as_str(), r.kind.as_str()))
            .collect();
        assert_eq!(
            memberships,
            vec![
                ("GENE:SYM1", "PATHWAY:p1", "involved_in"),
                ("GENE:SYM1", "PATHWAY:p1", "involved_in"),
            ]
        );
    }

    #[test]
    fn test_numeric_labels_fall_back_to_accession() {
        let records = parse(
            r##"<pathway name="path:p1" title="P1">
                <entry id="1" name="hsa:5290 hsa:5291" type="gene"><graphics name="5290"/></entry>
            </pathway>"##,
        );

        let ids: Vec<_> = records.entities.iter().skip(1).map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["GENE:5290", "GENE:5291"]);
    }

    #[test]
    fn test_fewer_labels_than_accessions() {
        let records = parse(
            r##"<pathway name="path:hsa04910" title="Insulin signaling pathway">
                <entry id="1" name="hsa:5290 hsa:5291 hsa:5293" type="gene">
                    <graphics name="PIK3CA"/>
                </entry>
                <entry id="2" name="hsa:3630" type="gene"><graphics name="INS"/></entry>
                <relation entry1="2" entry2="1" type="PPrel">
                    <subtype name="activation"/>
                </relation>
            </pathway>"##,
        );

        let ids: Vec<_> = records.entities.iter().skip(1).map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["GENE:PIK3CA", "GENE:PIK3CA", "GENE:PIK3CA", "GENE:INS"]
        );
        assert!(records.entities[1].synonyms.is_none());

        let causal: Vec<_> = records
            .relationships
            .iter()
            .filter(|r| r.kind == "PPrel")
            .collect();
        assert_eq!(causal.len(), 3);
        assert!(causal.iter().all(|r| r.to_id == "GENE:PIK3CA"));
    }

    #[test]
    fn test_leading_numeric_label_skipped() {
        let records = parse(
            r##"<pathway name="path:p1" title="P1">
                <entry id="1" name="hsa:208 hsa:10000" type="gene"><graphics name="208, AKT2, AKT3"/></entry>
            </pathway>"##,
        );

        let ids: Vec<_> = records.entities.iter().skip(1).map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["GENE:AKT2", "GENE:AKT2"]);
        assert_eq!(records.entities[1].synonyms, Some(labels(&["208", "AKT3"])));
    }

    #[test]
    fn test_missing_graphics_uses_raw_name() {
        let records = parse(
            r##"<pathway name="path:p1" title="P1">
                <entry id="1" name="hsa:3630" type="gene"/>
            </pathway>"##,
        );

        assert_eq!(records.entities[1].id, "GENE:hsa:3630");
    }

    #[test]
    fn test_relation_fan_out() {
        let records = parse(
            r##"<pathway name="path:p1" title="P1">
                <entry id="1" name="hsa:1 hsa:2" type="gene"><graphics name="A1, A2"/></entry>
                <entry id="2" name="hsa:3 hsa:4 hsa:5" type="gene"><graphics name="B1, B2, B3"/></entry>
                <relation entry1="1" entry2="2" type="PPrel">
                    <subtype name="activation" value="--&gt;"/>
                    <subtype name="phosphorylation" value="+p"/>
                </relation>
            </pathway>"##,
        );

        let causal: Vec<_> = records
            .relationships
            .iter()
            .filter(|r| r.kind == "PPrel")
            .collect();
        assert_eq!(causal.len(), 2 * 3 * 2);
        assert!(causal.iter().all(|r| r.from_id.starts_with("GENE:A")));
        assert!(causal.iter().all(|r| r.to_id.starts_with("GENE:B")));
        assert_eq!(
            causal
                .iter()
                .filter(|r| r.subtype.as_deref() == Some("phosphorylation"))
                .count(),
            6
        );
    }

    #[test]
    fn test_relation_without_subtypes() {
        let records = parse(
            r##"<pathway name="path:p1" title="P1">
                <entry id="1" name="hsa:3630" type="gene"><graphics name="INS"/></entry>
                <entry id="2" name="hsa:3667" type="gene"><graphics name="IRS1"/></entry>
                <relation entry1="1" entry2="2" type="activation"/>
            </pathway>"##,
        );

        let rel = records.relationships.last().unwrap();
        assert_eq!(rel.from_id, "GENE:INS");
        assert_eq!(rel.to_id, "GENE:IRS1");
        assert_eq!(rel.kind, "activation");
        assert!(rel.subtype.is_none());
    }

    #[test]
    fn test_non_gene_entries_ignored() {
        let records = parse(
            r##"<pathway name="path:p1" title="P1">
                <entry id="1" name="hsa:3630" type="gene"><graphics name="INS"/></entry>
                <entry id="2" name="cpd:C00031" type="compound"><graphics name="C00031"/></entry>
                <entry id="3" name="path:hsa04910" type="map"><graphics name="Insulin signaling"/></entry>
                <relation entry1="1" entry2="2" type="PCrel">
                    <subtype name="compound" value="2"/>
                </relation>
                <relation entry1="3" entry2="1" type="maplink"/>
                <relation entry1="1" entry2="99" type="PPrel"/>
                <reaction id="10" name="rn:R00299" type="irreversible"/>
            </pathway>"##,
        );

        assert_eq!(records.entities.len(), 2);
        assert_eq!(records.relationships.len(), 1);
        assert_eq!(records.relationships[0].kind, INVOLVED_IN);
    }

    #[test]
    fn test_interleaved_elements() {
        let records = parse(
            r##"<pathway name="path:p1" title="P1">
                <entry id="1" name="hsa:1" type="gene"><graphics name="A"/></entry>
                <relation entry1="1" entry2="2" type="PPrel"/>
                <entry id="2" name="hsa:2" type="gene"><graphics name="B"/></entry>
            </pathway>"##,
        );

        assert_eq!(records.entities.len(), 3);
        assert!(records
            .relationships
            .iter()
            .any(|r| r.from_id == "GENE:A" && r.to_id == "GENE:B"));
    }

    #[test]
    fn test_malformed_document() {
        let err = PathwayParser::parse_str("<pathway><entry id=", Path::new("bad.xml"))
            .unwrap_err();
        assert!(matches!(err, IngestError::Parse { ref path, .. } if path == Path::new("bad.xml")));

        assert!(PathwayParser::parse_str("", Path::new("empty.xml")).is_err());
    }
}
