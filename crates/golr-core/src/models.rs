//! Graph-side data models.
//!
//! These are the normalized records produced from annotation documents:
//! deduplicated bioentities, the annotations that reference them, and the
//! relation chains parsed out of annotation extensions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// =============================================================================
// BIOENTITY
// =============================================================================

/// A deduplicated subject of annotations, such as a gene product.
///
/// The `id` is the unique key; every other field is taken from the first
/// annotation document that referenced the entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bioentity {
    pub id: String,
    /// Short label (gene symbol).
    pub symbol: Option<String>,
    pub full_name: Option<String>,
    pub ncbi_taxon_id: Option<String>,
    pub type_cls: Option<String>,
    /// Source database.
    pub db: Option<String>,
    pub synonyms: Vec<String>,
}

impl Bioentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

// =============================================================================
// EXTENSION EXPRESSIONS
// =============================================================================

/// Operator joining relation ids in a property chain.
pub const CHAIN_OPERATOR: &str = " o ";

/// One annotation extension: a relation (possibly a property chain) pointing
/// at a target class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtensionExpression {
    /// Relation ids joined with [`CHAIN_OPERATOR`], e.g. `"BFO:0000050 o RO:0002211"`.
    pub relation: String,
    /// Target class id.
    pub cls: String,
}

impl ExtensionExpression {
    pub fn new(relation: impl Into<String>, cls: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            cls: cls.into(),
        }
    }

    /// Build from the individual relation ids of a chain.
    ///
    /// Returns `None` for an empty chain.
    pub fn from_chain<I, S>(relations: I, cls: impl Into<String>) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let relation = relations
            .into_iter()
            .map(|r| r.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(CHAIN_OPERATOR);
        if relation.is_empty() {
            return None;
        }
        Some(Self::new(relation, cls))
    }

    /// The relation ids making up the chain, in order.
    pub fn chain(&self) -> impl Iterator<Item = &str> {
        self.relation.split(CHAIN_OPERATOR)
    }
}

impl fmt::Display for ExtensionExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.relation, self.cls)
    }
}

// =============================================================================
// GENE ANNOTATION
// =============================================================================

/// Qualifier marking a negated annotation.
pub const NOT_QUALIFIER: &str = "not";

/// One annotation linking a bioentity to an ontology class.
///
/// `extension_expressions` is a disjunction of conjunctions. GOlr cannot
/// distinguish conjunction from disjunction across extension payloads, so
/// every parsed payload becomes its own single-element group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneAnnotation {
    /// Id of the annotated bioentity.
    pub bioentity: String,
    /// Shared reference to the entity in the owning entity map.
    #[serde(skip)]
    pub bioentity_object: Arc<Bioentity>,
    pub aspect: Option<String>,
    pub assigned_by: Option<String>,
    /// Annotation class id.
    pub cls: Option<String>,
    /// Evidence type code.
    pub evidence: Option<String>,
    /// Isoform, when the annotation is to a specific gene product form.
    pub gene_product_form: Option<String>,
    /// Date as sent by the backend (`YYYYMMDD`).
    pub last_update_date: Option<String>,
    pub reference_ids: Vec<String>,
    pub with_infos: Vec<String>,
    pub qualifiers: Vec<String>,
    pub extension_expressions: Vec<Vec<ExtensionExpression>>,
}

impl GeneAnnotation {
    /// Create an annotation for the given entity with all other fields empty.
    pub fn for_entity(entity: Arc<Bioentity>) -> Self {
        Self {
            bioentity: entity.id.clone(),
            bioentity_object: entity,
            aspect: None,
            assigned_by: None,
            cls: None,
            evidence: None,
            gene_product_form: None,
            last_update_date: None,
            reference_ids: Vec::new(),
            with_infos: Vec::new(),
            qualifiers: Vec::new(),
            extension_expressions: Vec::new(),
        }
    }

    /// True if any qualifier is `NOT`.
    pub fn is_negated(&self) -> bool {
        self.qualifiers
            .iter()
            .any(|q| q.eq_ignore_ascii_case(NOT_QUALIFIER))
    }

    /// Parsed last update date, accepting `YYYYMMDD` and `YYYY-MM-DD`.
    pub fn last_update(&self) -> Option<NaiveDate> {
        let raw = self.last_update_date.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y%m%d")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()
    }

    /// All extension expressions regardless of grouping.
    pub fn extensions(&self) -> impl Iterator<Item = &ExtensionExpression> {
        self.extension_expressions.iter().flatten()
    }
}
