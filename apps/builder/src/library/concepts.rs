//! Concept and variant operations over one entry's bullet library.
//!
//! Every function takes the full library by reference and returns a new one.
//! Rejected or unmatched calls return an unchanged copy; nothing here fails.

use tracing::debug;

use crate::ids::generate_id;
use crate::models::bullet::{BulletConcept, BulletVariant};
use crate::models::patch::ConceptPatch;

const CONCEPT_ID_PREFIX: &str = "concept";
const VARIANT_ID_PREFIX: &str = "variant";

// ────────────────────────────────────────────────────────────────────────────
// Concepts
// ────────────────────────────────────────────────────────────────────────────

/// Appends a concept with exactly one variant.
///
/// No-op when `summary` or `initial_variant_text` is blank after trimming.
/// Stored summary, tags and text are trimmed; blank tags are dropped.
pub fn add_concept(
    options: &[BulletConcept],
    summary: &str,
    tags: &[String],
    initial_variant_text: &str,
) -> Vec<BulletConcept> {
    let summary = summary.trim();
    let text = initial_variant_text.trim();
    if summary.is_empty() || text.is_empty() {
        debug!("add_concept rejected: summary or initial variant is blank");
        return options.to_vec();
    }

    let concept = BulletConcept {
        id: generate_id(CONCEPT_ID_PREFIX),
        summary: summary.to_string(),
        tags: tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        variants: vec![BulletVariant {
            id: generate_id(VARIANT_ID_PREFIX),
            text: text.to_string(),
        }],
    };

    let mut next = options.to_vec();
    next.push(concept);
    next
}

/// Removes a concept. Selected-bullet references to it are left dangling.
pub fn delete_concept(options: &[BulletConcept], concept_id: &str) -> Vec<BulletConcept> {
    options
        .iter()
        .filter(|c| c.id != concept_id)
        .cloned()
        .collect()
}

/// Merges `patch` into the matching concept.
pub fn update_concept(
    options: &[BulletConcept],
    concept_id: &str,
    patch: &ConceptPatch,
) -> Vec<BulletConcept> {
    options
        .iter()
        .map(|c| {
            if c.id == concept_id {
                patch.apply(c)
            } else {
                c.clone()
            }
        })
        .collect()
}

/// Deep-copies `source` into `target` under fresh concept and variant ids.
///
/// Summary, tags and variant texts are carried over verbatim. The source is
/// only read, so later edits to either copy never reach the other.
pub fn copy_concept(source: &BulletConcept, target: &[BulletConcept]) -> Vec<BulletConcept> {
    let duplicate = BulletConcept {
        id: generate_id(CONCEPT_ID_PREFIX),
        summary: source.summary.clone(),
        tags: source.tags.clone(),
        variants: source
            .variants
            .iter()
            .map(|v| BulletVariant {
                id: generate_id(VARIANT_ID_PREFIX),
                text: v.text.clone(),
            })
            .collect(),
    };

    let mut next = target.to_vec();
    next.push(duplicate);
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Variants
// ────────────────────────────────────────────────────────────────────────────

/// Appends a variant to the matching concept.
///
/// No-op when `text` is blank after trimming or the concept does not exist.
pub fn add_variant(options: &[BulletConcept], concept_id: &str, text: &str) -> Vec<BulletConcept> {
    let text = text.trim();
    if text.is_empty() {
        debug!("add_variant rejected: blank text for concept {concept_id}");
        return options.to_vec();
    }

    options
        .iter()
        .map(|c| {
            if c.id != concept_id {
                return c.clone();
            }
            let mut next = c.clone();
            next.variants.push(BulletVariant {
                id: generate_id(VARIANT_ID_PREFIX),
                text: text.to_string(),
            });
            next
        })
        .collect()
}

/// Removes one variant from one concept.
///
/// Refuses silently when the variant is the concept's last one, so every live
/// concept keeps at least one phrasing regardless of what the caller checks.
pub fn delete_variant(
    options: &[BulletConcept],
    concept_id: &str,
    variant_id: &str,
) -> Vec<BulletConcept> {
    options
        .iter()
        .map(|c| {
            if c.id != concept_id || c.variant(variant_id).is_none() {
                return c.clone();
            }
            if c.variants.len() <= 1 {
                debug!("delete_variant refused: {variant_id} is the last variant of {concept_id}");
                return c.clone();
            }
            BulletConcept {
                variants: c
                    .variants
                    .iter()
                    .filter(|v| v.id != variant_id)
                    .cloned()
                    .collect(),
                ..c.clone()
            }
        })
        .collect()
}

/// Splits a comma-separated tag field: `"React, Perf,,"` → `["React", "Perf"]`.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
