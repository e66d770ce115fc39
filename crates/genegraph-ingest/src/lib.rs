//! Genegraph Ingest - source file parsing
//!
//! Turns a directory of KGML pathway files and a GAF annotation file into
//! ordered record batches for [`genegraph_core::GraphBuilder`].

pub mod annotation;
pub mod error;
pub mod loader;
pub mod pathway;

pub use annotation::{AnnotationParser, AnnotationStats, GafRow};
pub use error::{IngestError, IngestResult};
pub use loader::{
    known_gene_symbols, load_graph, load_records, pathway_files, FailedFile, IngestReport,
    Ingested, Sources,
};
pub use pathway::{choose_symbol, PathwayParser};
