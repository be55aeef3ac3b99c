//! Typed retrievals for the three GOlr document categories.

use golr_core::{
    AnnotationDocument, BioentityDocument, FilterConstraint, OntologyClassDocument, Result,
};

use crate::client::GolrClient;

const BIOENTITY_FIELD: &str = "bioentity";
const ANNOTATION_CLASS_FIELD: &str = "annotation_class";
const SOURCE_FIELD: &str = "source";
const SYNONYM_FIELD: &str = "synonym";

impl GolrClient {
    // -------------------------------------------------------------------------
    // Annotations
    // -------------------------------------------------------------------------

    pub async fn annotations(
        &self,
        constraints: &[FilterConstraint],
    ) -> Result<Vec<AnnotationDocument>> {
        self.fetch_all(constraints).await
    }

    /// All annotations of one gene or gene product.
    pub async fn annotations_for_gene(&self, id: &str) -> Result<Vec<AnnotationDocument>> {
        self.annotations(&[FilterConstraint::eq(BIOENTITY_FIELD, id)])
            .await
    }

    /// Annotations of any of `ids`, fetched as a single OR query.
    ///
    /// An empty id list returns no annotations without contacting the server.
    pub async fn annotations_for_genes<I, S>(&self, ids: I) -> Result<Vec<AnnotationDocument>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let constraint = FilterConstraint::any_of(BIOENTITY_FIELD, ids);
        if constraint.values().is_empty() {
            return Ok(Vec::new());
        }
        self.annotations(&[constraint]).await
    }

    /// Annotations whose bioentity from `source` carries `synonym`.
    pub async fn annotations_for_synonym(
        &self,
        source: &str,
        synonym: &str,
    ) -> Result<Vec<AnnotationDocument>> {
        self.annotations(&[
            FilterConstraint::eq(SOURCE_FIELD, source),
            FilterConstraint::eq(SYNONYM_FIELD, synonym),
        ])
        .await
    }

    // -------------------------------------------------------------------------
    // Bioentities
    // -------------------------------------------------------------------------

    pub async fn bioentities(
        &self,
        constraints: &[FilterConstraint],
    ) -> Result<Vec<BioentityDocument>> {
        self.fetch_all(constraints).await
    }

    /// Bioentity documents for `id`; normally at most one.
    pub async fn bioentity(&self, id: &str) -> Result<Vec<BioentityDocument>> {
        self.bioentities(&[FilterConstraint::eq(BIOENTITY_FIELD, id)])
            .await
    }

    // -------------------------------------------------------------------------
    // Ontology classes
    // -------------------------------------------------------------------------

    pub async fn ontology_classes(
        &self,
        constraints: &[FilterConstraint],
    ) -> Result<Vec<OntologyClassDocument>> {
        self.fetch_all(constraints).await
    }

    /// Ontology class documents for a class id such as `GO:0005634`.
    pub async fn ontology_class(&self, id: &str) -> Result<Vec<OntologyClassDocument>> {
        self.ontology_classes(&[FilterConstraint::eq(ANNOTATION_CLASS_FIELD, id)])
            .await
    }
}
