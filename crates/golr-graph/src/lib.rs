//! # golr-graph
//!
//! Turns GOlr annotation documents into deduplicated bioentities and the
//! gene annotations that reference them.
//!
//! # Example
//!
//! ```rust
//! use golr_core::AnnotationDocument;
//! use golr_graph::{ConversionOptions, DocumentConverter};
//!
//! let doc: AnnotationDocument = serde_json::from_str(
//!     r#"{"bioentity": "MGI:MGI:97290", "annotation_class": "GO:0005634"}"#,
//! )
//! .unwrap();
//! let graph = DocumentConverter::new(ConversionOptions::default())
//!     .convert_documents(&[doc])
//!     .unwrap();
//! assert_eq!(graph.entities.len(), 1);
//! ```

pub mod convert;
pub mod graph;

pub use convert::{parse_extension, ConversionOptions, DocumentConverter};
pub use graph::{AnnotationGraph, EntityMap};
