//! The annotation graph: deduplicated bioentities and the annotations that
//! reference them.

use std::collections::HashMap;
use std::sync::Arc;

use golr_core::{Bioentity, GeneAnnotation};

/// Bioentities keyed by id, in first-insertion order.
///
/// Pass the same map to successive conversions to share entities across
/// calls. Mutation requires `&mut`, so a map is never updated concurrently.
#[derive(Debug, Clone, Default)]
pub struct EntityMap {
    entities: Vec<Arc<Bioentity>>,
    index: HashMap<String, usize>,
}

impl EntityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Bioentity>> {
        self.index.get(id).map(|&i| &self.entities[i])
    }

    /// Return the entity for `id`, creating it with `make` when absent.
    ///
    /// The boolean is `true` when the entity was inserted by this call.
    pub fn get_or_insert_with<F>(&mut self, id: &str, make: F) -> (Arc<Bioentity>, bool)
    where
        F: FnOnce() -> Bioentity,
    {
        if let Some(&i) = self.index.get(id) {
            return (Arc::clone(&self.entities[i]), false);
        }
        let entity = Arc::new(make());
        self.index.insert(id.to_string(), self.entities.len());
        self.entities.push(Arc::clone(&entity));
        (entity, true)
    }

    /// Entities in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Bioentity>> {
        self.entities.iter()
    }

    pub fn into_entities(self) -> Vec<Arc<Bioentity>> {
        self.entities
    }
}

/// Result of converting a batch of annotation documents.
#[derive(Debug, Clone, Default)]
pub struct AnnotationGraph {
    pub entities: EntityMap,
    pub annotations: Vec<GeneAnnotation>,
}

impl AnnotationGraph {
    /// Annotations grouped per bioentity, entities in first-arrival order and
    /// annotations in input order within each group.
    pub fn annotations_by_entity(&self) -> Vec<(Arc<Bioentity>, Vec<&GeneAnnotation>)> {
        let mut groups: Vec<(Arc<Bioentity>, Vec<&GeneAnnotation>)> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();

        for annotation in &self.annotations {
            let slot = *slots.entry(annotation.bioentity.as_str()).or_insert_with(|| {
                groups.push((Arc::clone(&annotation.bioentity_object), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(annotation);
        }
        groups
    }

    /// Annotations referencing `id`, in input order.
    pub fn annotations_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GeneAnnotation> {
        self.annotations.iter().filter(move |a| a.bioentity == id)
    }
}
