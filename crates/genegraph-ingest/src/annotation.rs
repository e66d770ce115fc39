//! GAF annotation parser
//!
//! GAF is tab-delimited; `!` lines are comments. Columns used (zero-based):
//! 2 (DB object symbol), 4 (GO id), 10 (used as the term label when
//! present; the DB object synonym column in standard GAF).

use crate::error::{IngestError, IngestResult};
use genegraph_core::{Entity, Records, Relationship, Source, ANNOTATED_WITH};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const SYMBOL_COLUMN: usize = 2;
const TERM_ID_COLUMN: usize = 4;
const TERM_NAME_COLUMN: usize = 10;

/// Line counters for one annotation parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationStats {
    /// Non-comment, non-blank lines seen
    pub rows: usize,
    /// Rows kept after gene filtering
    pub kept: usize,
    /// Rows dropped because the symbol is not a known gene
    pub filtered: usize,
    /// Rows with too few columns to interpret
    pub malformed: usize,
}

/// One interpreted GAF row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GafRow<'a> {
    pub symbol: &'a str,
    pub term_id: &'a str,
    pub term_name: &'a str,
}

impl<'a> GafRow<'a> {
    /// Split a data line; `None` when it has fewer than the required columns
    pub fn parse(line: &'a str) -> Option<Self> {
        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() <= TERM_ID_COLUMN {
            return None;
        }

        let term_id = columns[TERM_ID_COLUMN];
        let term_name = columns
            .get(TERM_NAME_COLUMN)
            .copied()
            .filter(|name| !name.is_empty())
            .unwrap_or(term_id);

        Some(Self {
            symbol: columns[SYMBOL_COLUMN],
            term_id,
            term_name,
        })
    }
}

/// GAF annotation parser
pub struct AnnotationParser;

impl AnnotationParser {
    /// Parse a GAF file, keeping only rows for `known_symbols`.
    ///
    /// A path that is not a readable regular file, or that fails partway
    /// through reading, is reported as `SourceUnavailable`.
    pub fn parse_file(
        path: &Path,
        known_symbols: &HashSet<String>,
    ) -> IngestResult<(Records, AnnotationStats)> {
        let file = File::open(path).map_err(|e| IngestError::unavailable(path, e))?;
        let metadata = file
            .metadata()
            .map_err(|e| IngestError::unavailable(path, e))?;
        if !metadata.is_file() {
            return Err(IngestError::unavailable(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }

        Self::parse_reader(BufReader::new(file), known_symbols).map_err(|e| match e {
            IngestError::Io(e) => IngestError::unavailable(path, e),
            other => other,
        })
    }

    /// Parse GAF lines from any buffered reader
    pub fn parse_reader<R: BufRead>(
        reader: R,
        known_symbols: &HashSet<String>,
    ) -> IngestResult<(Records, AnnotationStats)> {
        let mut records = Records::new();
        let mut stats = AnnotationStats::default();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end_matches('\r');

            if line.starts_with('!') || line.trim().is_empty() {
                continue;
            }
            stats.rows += 1;

            let Some(row) = GafRow::parse(line) else {
                tracing::debug!("Skipping GAF line with too few columns: {}", line);
                stats.malformed += 1;
                continue;
            };

            if !known_symbols.contains(row.symbol) {
                stats.filtered += 1;
                continue;
            }

            let (Ok(gene), Ok(term)) = (
                Entity::gene(row.symbol),
                Entity::go_term(row.term_id, row.term_name),
            ) else {
                tracing::debug!("Skipping GAF line with an empty identifier: {}", line);
                stats.malformed += 1;
                continue;
            };
            records.relationships.push(Relationship::new(
                gene.id.clone(),
                term.id.clone(),
                ANNOTATED_WITH,
                Source::AnnotationDb,
            )?);
            records.entities.push(gene);
            records.entities.push(term);
            stats.kept += 1;
        }

        tracing::info!(
            "Parsed {} annotation rows: {} kept, {} filtered, {} malformed",
            stats.rows,
            stats.kept,
            stats.filtered,
            stats.malformed
        );

        Ok((records, stats))
    }
}
