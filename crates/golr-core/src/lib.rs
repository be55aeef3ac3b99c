//! # golr-core
//!
//! Core types, traits, and abstractions for the GOlr annotation client.
//!
//! This crate provides the document shapes returned by the search backend,
//! the normalized annotation models, filter constraints, and the trait seams
//! that the client and converter crates depend on. It performs no I/O.

pub mod defaults;
pub mod documents;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use documents::{AnnotationDocument, BioentityDocument, OntologyClassDocument};
pub use error::{Error, Result};
pub use filter::FilterConstraint;
pub use models::{Bioentity, ExtensionExpression, GeneAnnotation, CHAIN_OPERATOR, NOT_QUALIFIER};
pub use reqwest::Url;
pub use traits::{GolrDocument, NoopObserver, RequestObserver, Transport};
