//! Source discovery and the ingestion pipeline
//!
//! Pathway files are parsed concurrently on the blocking pool and merged in
//! file-name order. The annotation file is parsed afterwards, filtered to
//! the gene symbols the pathways produced.

use crate::annotation::{AnnotationParser, AnnotationStats};
use crate::error::{IngestError, IngestResult};
use crate::pathway::PathwayParser;
use genegraph_core::{Entity, EntityKind, GeneGraph, GraphBuilder, Records};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const PATHWAY_EXTENSION: &str = "xml";

/// Where to read source data from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    /// Directory of KGML pathway files
    pub pathway_dir: PathBuf,
    /// GAF annotation file
    pub annotation_file: PathBuf,
}

impl Sources {
    pub fn new(pathway_dir: impl Into<PathBuf>, annotation_file: impl Into<PathBuf>) -> Self {
        Self {
            pathway_dir: pathway_dir.into(),
            annotation_file: annotation_file.into(),
        }
    }
}

/// A pathway file that was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// What an ingestion run read, skipped and kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Pathway files found in the pathway directory
    pub pathway_files: usize,
    /// Pathway files skipped because they could not be read or parsed
    pub failed_files: Vec<FailedFile>,
    /// Sources that were missing entirely
    pub unavailable: Vec<PathBuf>,
    /// Distinct gene symbols taken from pathways
    pub known_genes: usize,
    /// Annotation counters, absent when the annotation file is unavailable
    pub annotations: Option<AnnotationStats>,
}

impl IngestReport {
    pub fn parsed_files(&self) -> usize {
        self.pathway_files - self.failed_files.len()
    }

    pub fn has_problems(&self) -> bool {
        !self.failed_files.is_empty() || !self.unavailable.is_empty()
    }
}

/// Records gathered from all sources, in merge order
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    pub records: Records,
    pub report: IngestReport,
}

/// List `*.xml` files in `dir`, sorted by file name
pub fn pathway_files(dir: &Path) -> IngestResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::unavailable(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_pathway = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(PATHWAY_EXTENSION));
        if is_pathway {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Symbols of every gene entity, without the `GENE:` prefix
pub fn known_gene_symbols(entities: &[Entity]) -> HashSet<String> {
    entities
        .iter()
        .filter(|e| e.kind == EntityKind::Gene)
        .map(|e| EntityKind::Gene.strip_prefix(&e.id).to_string())
        .collect()
}

/// Read every source into one ordered record set
pub async fn load_records(sources: &Sources) -> IngestResult<Ingested> {
    let mut records = Records::new();
    let mut report = IngestReport::default();

    let files = match pathway_files(&sources.pathway_dir) {
        Ok(files) => files,
        Err(e @ IngestError::SourceUnavailable { .. }) => {
            tracing::warn!("{}; continuing without pathways", e);
            report.unavailable.push(sources.pathway_dir.clone());
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    report.pathway_files = files.len();

    let tasks = files.iter().cloned().map(|path| {
        tokio::task::spawn_blocking(move || PathwayParser::parse_file(&path))
    });
    let results = futures::future::try_join_all(tasks).await?;

    for (path, result) in files.into_iter().zip(results) {
        match result {
            Ok(parsed) => records.extend(parsed),
            Err(e) => {
                tracing::warn!("Skipping pathway file: {}", e);
                report.failed_files.push(FailedFile {
                    path,
                    error: e.to_string(),
                });
            }
        }
    }

    let known = known_gene_symbols(&records.entities);
    report.known_genes = known.len();
    tracing::info!(
        "Parsed {} of {} pathway files: {} entities, {} relationships, {} genes",
        report.parsed_files(),
        report.pathway_files,
        records.entities.len(),
        records.relationships.len(),
        report.known_genes
    );

    let annotation_file = sources.annotation_file.clone();
    let parsed = tokio::task::spawn_blocking(move || {
        AnnotationParser::parse_file(&annotation_file, &known)
    })
    .await?;

    match parsed {
        Ok((annotations, stats)) => {
            records.extend(annotations);
            report.annotations = Some(stats);
        }
        Err(e @ IngestError::SourceUnavailable { .. }) => {
            tracing::warn!("{}; continuing without annotations", e);
            report.unavailable.push(sources.annotation_file.clone());
        }
        Err(e) => return Err(e),
    }

    Ok(Ingested { records, report })
}

/// Read every source and build the graph
pub async fn load_graph(sources: &Sources) -> IngestResult<(GeneGraph, IngestReport)> {
    let Ingested { records, report } = load_records(sources).await?;
    let graph = GraphBuilder::new().with_records(records).build();

    tracing::info!(
        "Built graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok((graph, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pathway_files_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        for name in ["hsa04930.xml", "hsa04150.XML", "notes.txt", "hsa00010.xml"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.xml")).unwrap();

        let files = pathway_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["hsa00010.xml", "hsa04150.XML", "hsa04930.xml"]);
    }

    #[test]
    fn test_pathway_files_missing_dir() {
        let err = pathway_files(Path::new("/nonexistent/pathways")).unwrap_err();
        assert!(matches!(err, IngestError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_known_gene_symbols() {
        let entities = vec![
            Entity::gene("INS").unwrap(),
            Entity::pathway("hsa04930", "Type II diabetes mellitus").unwrap(),
            Entity::gene("IRS1").unwrap(),
            Entity::gene("INS").unwrap(),
        ];

        let symbols = known_gene_symbols(&entities);
        assert_eq!(symbols.len(), 2);
        assert!(symbols.contains("INS"));
        assert!(symbols.contains("IRS1"));
    }

    #[test]
    fn test_report_counts() {
        let report = IngestReport {
            pathway_files: 3,
            failed_files: vec![FailedFile {
                path: PathBuf::from("bad.xml"),
                error: "Parse error".to_string(),
            }],
            ..Default::default()
        };

        assert_eq!(report.parsed_files(), 2);
        assert!(report.has_problems());
        assert!(!IngestReport::default().has_problems());
    }
}
