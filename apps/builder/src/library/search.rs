//! Library search: text and tag filtering over one entry's concepts, plus
//! read-only cross-entry search over sibling entries of the same kind.
//!
//! Text matching is a case-insensitive substring test against the summary,
//! every variant text and every tag. Tag filtering uses OR semantics with exact
//! tag equality and only applies to the local library.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::bullet::BulletConcept;
use crate::models::entry::BulletOwner;
use crate::models::resume::StoredResume;

// ────────────────────────────────────────────────────────────────────────────
// Filter state
// ────────────────────────────────────────────────────────────────────────────

/// Library panel filter as the user has set it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LibraryFilter {
    pub query: String,
    /// Active tag chips; empty means "any tag".
    pub tags: Vec<String>,
    /// Also search sibling entries of the same kind.
    pub cross_entry: bool,
}

impl LibraryFilter {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Adds `tag` if absent, removes it if present.
    pub fn toggle_tag(&self, tag: &str) -> Self {
        let mut next = self.clone();
        if let Some(pos) = next.tags.iter().position(|t| t == tag) {
            next.tags.remove(pos);
        } else {
            next.tags.push(tag.to_string());
        }
        next
    }

    /// Cross-entry search runs only when toggled on and the query is non-empty.
    pub fn searches_other_entries(&self) -> bool {
        self.cross_entry && !self.query.is_empty()
    }
}

/// Concepts from one sibling entry that matched a cross-entry search.
#[derive(Debug, Clone)]
pub struct CrossEntryMatches<'a, T> {
    pub entry: &'a T,
    pub concepts: Vec<&'a BulletConcept>,
}

// ────────────────────────────────────────────────────────────────────────────
// Matching
// ────────────────────────────────────────────────────────────────────────────

/// True when `query` is empty or found in the summary, a variant or a tag.
pub fn concept_matches_query(concept: &BulletConcept, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    let hit = |haystack: &str| haystack.to_lowercase().contains(&needle);

    hit(concept.summary.as_str())
        || concept.variants.iter().any(|v| hit(v.text.as_str()))
        || concept.tags.iter().any(|t| hit(t.as_str()))
}

/// True when no tags are active or the concept carries at least one of them.
pub fn concept_matches_tags(concept: &BulletConcept, active_tags: &[String]) -> bool {
    active_tags.is_empty() || active_tags.iter().any(|tag| concept.tags.contains(tag))
}

/// Local results: concepts passing both the text and the tag filter, in library order.
pub fn filter_concepts<'a>(
    options: &'a [BulletConcept],
    filter: &LibraryFilter,
) -> Vec<&'a BulletConcept> {
    options
        .iter()
        .filter(|c| concept_matches_query(c, &filter.query) && concept_matches_tags(c, &filter.tags))
        .collect()
}

/// Cross-entry results grouped by source entry.
///
/// Skips the current entry, ignores the tag filter, and omits entries with no
/// match. Empty unless [`LibraryFilter::searches_other_entries`] holds.
pub fn search_other_entries<'a, T: BulletOwner>(
    entries: &'a [Arc<T>],
    current_id: Option<&str>,
    filter: &LibraryFilter,
) -> Vec<CrossEntryMatches<'a, T>> {
    if !filter.searches_other_entries() {
        return Vec::new();
    }

    entries
        .iter()
        .filter(|e| Some(e.id()) != current_id)
        .map(|e| CrossEntryMatches {
            entry: e.as_ref(),
            concepts: e
                .bullet_options()
                .iter()
                .filter(|c| concept_matches_query(c, &filter.query))
                .collect(),
        })
        .filter(|m| !m.concepts.is_empty())
        .collect()
}

/// Distinct tags across a library, first-seen order.
pub fn library_tags(options: &[BulletConcept]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in options.iter().flat_map(|c| c.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Dashboard filter: case-insensitive substring on resume name or any tag.
pub fn filter_resumes<'a>(resumes: &'a [StoredResume], query: &str) -> Vec<&'a StoredResume> {
    let needle = query.to_lowercase();
    resumes
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&needle)
                || r.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
