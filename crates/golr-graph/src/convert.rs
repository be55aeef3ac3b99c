//! Conversion of GOlr annotation documents into the annotation graph.
//!
//! Each document yields one [`GeneAnnotation`] in input order. Bioentities
//! are created from the first document that references them and shared by
//! every later annotation of the same entity.
//!
//! Annotation extensions arrive as one JSON string per extension:
//!
//! ```json
//! {"relationship": {"relation": [{"id": "BFO:0000050", "label": "part of"}],
//!                   "id": "GO:0008150", "label": "biological_process"}}
//! ```
//!
//! The relation list is a property chain. Every payload becomes its own
//! single-expression group, since the index does not record whether
//! extensions were conjoined or disjoined.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use golr_core::{
    AnnotationDocument, Bioentity, Error, ExtensionExpression, GeneAnnotation, Result,
};

use crate::graph::{AnnotationGraph, EntityMap};

/// Options controlling document conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Skip malformed extension payloads instead of failing the conversion.
    pub ignore_extension_parse_errors: bool,
}

impl ConversionOptions {
    pub fn tolerant() -> Self {
        Self {
            ignore_extension_parse_errors: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExtensionPayload {
    relationship: Option<ExtensionTarget>,
}

#[derive(Debug, Deserialize)]
struct ExtensionTarget {
    #[serde(default)]
    relation: Option<Vec<ExtensionRelation>>,
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExtensionRelation {
    id: Option<String>,
}

/// Converts annotation documents into graph records.
#[derive(Debug, Clone, Default)]
pub struct DocumentConverter {
    options: ConversionOptions,
}

impl DocumentConverter {
    pub fn new(options: ConversionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ConversionOptions {
        self.options
    }

    /// Convert `documents`, adding unseen bioentities to `entities`.
    ///
    /// Documents without a `bioentity` id are skipped. A malformed extension
    /// payload fails the whole call with [`Error::ExtensionParse`] unless
    /// [`ConversionOptions::ignore_extension_parse_errors`] is set.
    pub fn convert(
        &self,
        documents: &[AnnotationDocument],
        entities: &mut EntityMap,
    ) -> Result<Vec<GeneAnnotation>> {
        let mut annotations = Vec::with_capacity(documents.len());

        for (position, document) in documents.iter().enumerate() {
            let Some(id) = document.bioentity.as_deref() else {
                warn!(position, "Skipping annotation document without bioentity");
                continue;
            };

            let (entity, inserted) =
                entities.get_or_insert_with(id, || bioentity_from(id, document));
            if inserted {
                trace!(bioentity = id, "New bioentity");
            }

            let mut annotation = GeneAnnotation::for_entity(entity);
            annotation.aspect = document.aspect.clone();
            annotation.assigned_by = document.assigned_by.clone();
            annotation.cls = document.annotation_class.clone();
            annotation.evidence = document.evidence_type.clone();
            annotation.gene_product_form = document.bioentity_isoform.clone();
            annotation.last_update_date = document.date.clone();
            annotation.reference_ids = document.reference.clone();
            annotation.with_infos = document.evidence_with.clone();
            annotation.qualifiers = document.qualifier.clone();
            annotation.extension_expressions = self.extension_groups(document)?;

            annotations.push(annotation);
        }

        debug!(
            documents = documents.len(),
            result_count = annotations.len(),
            entities = entities.len(),
            "Converted annotation documents"
        );
        Ok(annotations)
    }

    /// Convert `documents` into a new graph with its own entity map.
    pub fn convert_documents(&self, documents: &[AnnotationDocument]) -> Result<AnnotationGraph> {
        let mut entities = EntityMap::new();
        let annotations = self.convert(documents, &mut entities)?;
        Ok(AnnotationGraph {
            entities,
            annotations,
        })
    }

    fn extension_groups(
        &self,
        document: &AnnotationDocument,
    ) -> Result<Vec<Vec<ExtensionExpression>>> {
        let mut groups = Vec::with_capacity(document.annotation_extension_json.len());

        for payload in &document.annotation_extension_json {
            match parse_extension(payload) {
                Ok(Some(expression)) => groups.push(vec![expression]),
                Ok(None) => trace!(payload = %payload, "Extension payload without relation"),
                Err(e) if self.options.ignore_extension_parse_errors => {
                    warn!(
                        bioentity = document.bioentity.as_deref().unwrap_or_default(),
                        error = %e,
                        "Skipping malformed annotation extension"
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Ok(groups)
    }
}

/// Parse one extension payload.
///
/// `Ok(None)` for a blank payload, `null`, a missing relationship, a missing
/// target, or an empty relation chain. A chain link without an id is an
/// [`Error::ExtensionParse`].
pub fn parse_extension(payload: &str) -> Result<Option<ExtensionExpression>> {
    if payload.trim().is_empty() {
        return Ok(None);
    }

    let parsed: Option<ExtensionPayload> = serde_json::from_str(payload)
        .map_err(|e| Error::ExtensionParse(format!("{} in payload: {}", e, payload)))?;

    let Some(target) = parsed.and_then(|p| p.relationship) else {
        return Ok(None);
    };
    let Some(cls) = target.id else {
        return Ok(None);
    };

    let links = target.relation.unwrap_or_default();
    let mut chain = Vec::with_capacity(links.len());
    for (position, link) in links.into_iter().enumerate() {
        let Some(id) = link.id else {
            return Err(Error::ExtensionParse(format!(
                "relation {} has no id in payload: {}",
                position, payload
            )));
        };
        chain.push(id);
    }

    Ok(ExtensionExpression::from_chain(chain, cls))
}

fn bioentity_from(id: &str, document: &AnnotationDocument) -> Bioentity {
    Bioentity {
        id: id.to_string(),
        symbol: document.bioentity_label.clone(),
        full_name: document.bioentity_name.clone(),
        ncbi_taxon_id: document.taxon.clone(),
        type_cls: document.type_cls.clone(),
        db: document.source.clone(),
        synonyms: document.synonym.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    const PART_OF_NUCLEUS: &str = r#"{"relationship":{"relation":[{"id":"BFO:0000050","label":"part_of"}],"id":"GO:0005634","label":"nucleus"}}"#;
    const CHAINED: &str = r#"{"relationship":{"relation":[{"id":"BFO:0000050","label":"part_of"},{"id":"RO:0002211","label":"regulates"}],"id":"GO:0006915","label":"apoptotic process"}}"#;
    const MALFORMED: &str = r#"{"relationship":{"relation":[{"id":"BFO:0000050""#;

    fn document(bioentity: &str, cls: &str, extensions: &[&str]) -> AnnotationDocument {
        serde_json::from_value(json!({
            "source": "MGI",
            "bioentity": bioentity,
            "bioentity_label": "Rb1",
            "bioentity_name": "RB transcriptional corepressor 1",
            "annotation_class": cls,
            "evidence_type": "IDA",
            "aspect": "C",
            "type": "protein",
            "taxon": "NCBITaxon:10090",
            "date": "20150324",
            "assigned_by": "MGI",
            "bioentity_isoform": "UniProtKB:P13405-1",
            "synonym": ["pRb", "Rb-1"],
            "reference": ["PMID:12345", "GO_REF:0000033"],
            "evidence_with": ["UniProtKB:Q0IIF6"],
            "annotation_extension_json": extensions,
        }))
        .unwrap()
    }

    #[test]
    fn test_fields_are_mapped() {
        let graph = DocumentConverter::default()
            .convert_documents(&[document("MGI:MGI:97290", "GO:0005634", &[])])
            .unwrap();

        let entity = graph.entities.get("MGI:MGI:97290").unwrap();
        assert_eq!(entity.symbol.as_deref(), Some("Rb1"));
        assert_eq!(entity.full_name.as_deref(), Some("RB transcriptional corepressor 1"));
        assert_eq!(entity.ncbi_taxon_id.as_deref(), Some("NCBITaxon:10090"));
        assert_eq!(entity.type_cls.as_deref(), Some("protein"));
        assert_eq!(entity.db.as_deref(), Some("MGI"));
        assert_eq!(entity.synonyms, vec!["pRb", "Rb-1"]);

        let annotation = &graph.annotations[0];
        assert_eq!(annotation.bioentity, "MGI:MGI:97290");
        assert_eq!(annotation.cls.as_deref(), Some("GO:0005634"));
        assert_eq!(annotation.evidence.as_deref(), Some("IDA"));
        assert_eq!(annotation.aspect.as_deref(), Some("C"));
        assert_eq!(annotation.assigned_by.as_deref(), Some("MGI"));
        assert_eq!(annotation.gene_product_form.as_deref(), Some("UniProtKB:P13405-1"));
        assert_eq!(annotation.reference_ids, vec!["PMID:12345", "GO_REF:0000033"]);
        assert_eq!(annotation.with_infos, vec!["UniProtKB:Q0IIF6"]);
        assert_eq!(annotation.last_update_date.as_deref(), Some("20150324"));
        assert!(annotation.last_update().is_some());
        assert!(annotation.extension_expressions.is_empty());
    }

    #[test]
    fn test_shared_bioentity_is_created_once() {
        let graph = DocumentConverter::default()
            .convert_documents(&[
                document("MGI:MGI:97290", "GO:0005634", &[]),
                document("MGI:MGI:97290", "GO:0006915", &[]),
            ])
            .unwrap();

        assert_eq!(graph.entities.len(), 1);
        assert_eq!(graph.annotations.len(), 2);
        assert!(Arc::ptr_eq(
            &graph.annotations[0].bioentity_object,
            &graph.annotations[1].bioentity_object
        ));
    }

    #[test]
    fn test_entity_map_reused_across_calls() {
        let converter = DocumentConverter::default();
        let mut entities = EntityMap::new();

        let first = converter
            .convert(&[document("MGI:MGI:97290", "GO:0005634", &[])], &mut entities)
            .unwrap();

        let mut renamed = document("MGI:MGI:97290", "GO:0006915", &[]);
        renamed.bioentity_label = Some("ignored".into());
        let second = converter.convert(&[renamed], &mut entities).unwrap();

        assert_eq!(entities.len(), 1);
        assert!(Arc::ptr_eq(&first[0].bioentity_object, &second[0].bioentity_object));
        assert_eq!(second[0].bioentity_object.symbol.as_deref(), Some("Rb1"));
    }

    #[test]
    fn test_annotations_keep_input_order() {
        let graph = DocumentConverter::default()
            .convert_documents(&[
                document("A", "GO:3", &[]),
                document("B", "GO:1", &[]),
                document("A", "GO:2", &[]),
            ])
            .unwrap();

        let classes: Vec<_> = graph
            .annotations
            .iter()
            .filter_map(|a| a.cls.as_deref())
            .collect();
        assert_eq!(classes, vec!["GO:3", "GO:1", "GO:2"]);
        let ids: Vec<_> = graph.entities.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_each_extension_is_its_own_group() {
        let graph = DocumentConverter::default()
            .convert_documents(&[document("A", "GO:1", &[PART_OF_NUCLEUS, CHAINED])])
            .unwrap();

        assert_eq!(
            graph.annotations[0].extension_expressions,
            vec![
                vec![ExtensionExpression::new("BFO:0000050", "GO:0005634")],
                vec![ExtensionExpression::new("BFO:0000050 o RO:0002211", "GO:0006915")],
            ]
        );
    }

    #[test]
    fn test_malformed_extension_fails_by_default() {
        let err = DocumentConverter::default()
            .convert_documents(&[document("A", "GO:1", &[PART_OF_NUCLEUS, MALFORMED])])
            .unwrap_err();
        assert!(matches!(err, Error::ExtensionParse(_)));
    }

    #[test]
    fn test_malformed_extension_skipped_when_tolerant() {
        let graph = DocumentConverter::new(ConversionOptions::tolerant())
            .convert_documents(&[document("A", "GO:1", &[PART_OF_NUCLEUS, MALFORMED])])
            .unwrap();

        assert_eq!(graph.annotations[0].extension_expressions.len(), 1);
        assert_eq!(
            graph.annotations[0].extension_expressions[0][0].cls,
            "GO:0005634"
        );
    }

    #[test]
    fn test_wrong_shape_is_a_parse_error() {
        assert!(matches!(
            parse_extension(r#"{"relationship":"part_of"}"#),
            Err(Error::ExtensionParse(_))
        ));
        assert!(matches!(parse_extension("42"), Err(Error::ExtensionParse(_))));
    }

    #[test]
    fn test_payloads_without_relation_yield_nothing() {
        assert_eq!(parse_extension("null").unwrap(), None);
        assert_eq!(parse_extension("{}").unwrap(), None);
        assert_eq!(
            parse_extension(r#"{"relationship":{"relation":[],"id":"GO:1"}}"#).unwrap(),
            None
        );
        assert_eq!(
            parse_extension(r#"{"relationship":{"id":"GO:1"}}"#).unwrap(),
            None
        );
        assert_eq!(
            parse_extension(r#"{"relationship":{"relation":[{"id":"BFO:0000050"}]}}"#).unwrap(),
            None
        );
    }

    #[test]
    fn test_blank_payloads_yield_nothing() {
        assert_eq!(parse_extension("").unwrap(), None);
        assert_eq!(parse_extension("   ").unwrap(), None);

        let graph = DocumentConverter::default()
            .convert_documents(&[document("A", "GO:1", &["", "   ", PART_OF_NUCLEUS])])
            .unwrap();
        assert_eq!(graph.annotations.len(), 1);
        assert_eq!(graph.annotations[0].extension_expressions.len(), 1);
    }

    #[test]
    fn test_chain_link_without_id_is_a_parse_error() {
        let gap = r#"{"relationship":{"relation":[{"id":null},{"id":"RO:0002211"}],"id":"GO:1"}}"#;
        let missing = r#"{"relationship":{"relation":[{"id":"BFO:0000050"},{"label":"regulates"}],"id":"GO:1"}}"#;
        assert!(matches!(parse_extension(gap), Err(Error::ExtensionParse(_))));
        assert!(matches!(parse_extension(missing), Err(Error::ExtensionParse(_))));

        let strict = DocumentConverter::default()
            .convert_documents(&[document("A", "GO:1", &[gap])]);
        assert!(matches!(strict, Err(Error::ExtensionParse(_))));

        let tolerant = DocumentConverter::new(ConversionOptions::tolerant())
            .convert_documents(&[document("A", "GO:1", &[gap, CHAINED])])
            .unwrap();
        assert_eq!(
            tolerant.annotations[0].extension_expressions,
            vec![vec![ExtensionExpression::new("BFO:0000050 o RO:0002211", "GO:0006915")]]
        );
    }

    #[test]
    fn test_negation_from_qualifier() {
        let mut doc = document("A", "GO:1", &[]);
        doc.qualifier = vec!["NOT".into(), "contributes_to".into()];
        let graph = DocumentConverter::default().convert_documents(&[doc]).unwrap();
        assert!(graph.annotations[0].is_negated());
    }

    #[test]
    fn test_document_without_bioentity_is_skipped() {
        let mut orphan = document("A", "GO:1", &[]);
        orphan.bioentity = None;
        let graph = DocumentConverter::default()
            .convert_documents(&[orphan, document("B", "GO:2", &[])])
            .unwrap();

        assert_eq!(graph.annotations.len(), 1);
        assert_eq!(graph.annotations[0].bioentity, "B");
        assert_eq!(graph.entities.len(), 1);
    }
}
