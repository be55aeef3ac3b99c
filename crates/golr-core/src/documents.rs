//! Document shapes returned by the GOlr search backend.
//!
//! Each shape declares its `document_category` and the explicit field list
//! requested via `fl`, avoiding `*` retrieval of unused fields. All wire
//! fields are optional; multi-valued fields default to empty lists.

use serde::{Deserialize, Deserializer, Serialize};

use crate::traits::GolrDocument;

// =============================================================================
// BIOENTITY
// =============================================================================

/// A `bioentity` document (gene or gene product record).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BioentityDocument {
    pub document_category: Option<String>,
    pub id: Option<String>,
    pub bioentity: Option<String>,
    pub bioentity_label: Option<String>,
    pub bioentity_name: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "type")]
    pub type_cls: Option<String>,
    pub taxon: Option<String>,
    pub taxon_label: Option<String>,
    pub synonym: Vec<String>,
}

const BIOENTITY_FIELDS: &[&str] = &[
    "document_category",
    "id",
    "bioentity",
    "bioentity_label",
    "bioentity_name",
    "source",
    "type",
    "taxon",
    "taxon_label",
    "synonym",
];

impl GolrDocument for BioentityDocument {
    const CATEGORY: &'static str = "bioentity";

    fn relevant_fields() -> &'static [&'static str] {
        BIOENTITY_FIELDS
    }
}

// =============================================================================
// ANNOTATION
// =============================================================================

/// An `annotation` document: one association of a bioentity with an
/// ontology class, with provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationDocument {
    pub source: Option<String>,
    pub bioentity: Option<String>,
    pub bioentity_internal_id: Option<String>,
    pub bioentity_label: Option<String>,
    pub bioentity_name: Option<String>,
    pub annotation_class: Option<String>,
    pub annotation_class_label: Option<String>,
    pub evidence_type: Option<String>,
    pub aspect: Option<String>,
    #[serde(rename = "type")]
    pub type_cls: Option<String>,
    pub taxon: Option<String>,
    pub taxon_label: Option<String>,
    pub date: Option<String>,
    pub assigned_by: Option<String>,
    pub bioentity_isoform: Option<String>,
    pub panther_family: Option<String>,
    pub panther_family_label: Option<String>,
    /// Raw annotation extension payloads, one JSON object per string.
    pub annotation_extension_json: Vec<String>,
    pub synonym: Vec<String>,
    pub evidence_with: Vec<String>,
    pub reference: Vec<String>,
    pub qualifier: Vec<String>,
}

const ANNOTATION_FIELDS: &[&str] = &[
    "source",
    "bioentity",
    "bioentity_internal_id",
    "bioentity_label",
    "bioentity_name",
    "annotation_class",
    "annotation_class_label",
    "evidence_type",
    "aspect",
    "type",
    "taxon",
    "taxon_label",
    "date",
    "assigned_by",
    "bioentity_isoform",
    "panther_family",
    "panther_family_label",
    "annotation_extension_json",
    "synonym",
    "evidence_with",
    "reference",
    "qualifier",
];

impl GolrDocument for AnnotationDocument {
    const CATEGORY: &'static str = "annotation";

    fn relevant_fields() -> &'static [&'static str] {
        ANNOTATION_FIELDS
    }
}

// =============================================================================
// ONTOLOGY CLASS
// =============================================================================

/// An `ontology_class` document: one ontology term with its closures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologyClassDocument {
    pub document_category: Option<String>,
    pub annotation_class: Option<String>,
    pub annotation_class_label: Option<String>,
    pub description: Option<String>,
    pub source: Option<String>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_obsolete: bool,
    pub alternate_id: Vec<String>,
    pub replaced_by: Vec<String>,
    pub consider: Vec<String>,
    pub synonym: Vec<String>,
    pub subset: Option<String>,
    pub definition_xref: Vec<String>,
    pub database_xref: Vec<String>,
    pub isa_partof_closure: Vec<String>,
    pub regulates_closure: Vec<String>,
    pub only_in_taxon: Option<String>,
    pub only_in_taxon_closure: Vec<String>,
}

const ONTOLOGY_CLASS_FIELDS: &[&str] = &[
    "document_category",
    "annotation_class",
    "annotation_class_label",
    "description",
    "source",
    "is_obsolete",
    "alternate_id",
    "replaced_by",
    "consider",
    "synonym",
    "subset",
    "definition_xref",
    "database_xref",
    "isa_partof_closure",
    "regulates_closure",
    "only_in_taxon",
    "only_in_taxon_closure",
];

impl GolrDocument for OntologyClassDocument {
    const CATEGORY: &'static str = "ontology_class";

    fn relevant_fields() -> &'static [&'static str] {
        ONTOLOGY_CLASS_FIELDS
    }
}

/// Accept a boolean flag sent either as a JSON bool or as a string.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Text(s)) => s.eq_ignore_ascii_case("true"),
        None => false,
    })
}
