//! Copy-on-write transitions over a whole `Resume`.
//!
//! Each method returns a new `Resume`. Untouched entries keep their `Arc`, so
//! callers can detect what changed with `Arc::ptr_eq`. Unknown ids and
//! rejected input yield a value equal to the input.

use std::sync::Arc;

use tracing::debug;

use crate::ids::generate_id;
use crate::models::entry::Entry;
use crate::models::patch::PersonalPatch;
use crate::models::resume::{Resume, SkillCategory};

impl Resume {
    pub fn with_personal(&self, patch: &PersonalPatch) -> Resume {
        patch.apply(self)
    }

    pub fn entries<T: Entry>(&self) -> &[Arc<T>] {
        T::collection(self)
    }

    pub fn entry<T: Entry>(&self, id: &str) -> Option<&Arc<T>> {
        T::collection(self).iter().find(|e| e.id() == id)
    }

    /// Appends an empty entry with a fresh id. Returns the new document and the id.
    pub fn with_new_entry<T: Entry>(&self) -> (Resume, String) {
        let id = generate_id(T::ID_PREFIX);
        let next = self.with_entry_appended(T::empty(id.clone()));
        (next, id)
    }

    pub fn with_entry_appended<T: Entry>(&self, entry: T) -> Resume {
        let mut entries = T::collection(self).to_vec();
        entries.push(Arc::new(entry));
        T::with_collection(self, entries)
    }

    /// Replaces the entry `id` with `update(entry)`. No-op when `id` is unknown
    /// or `update` returns an equal value.
    pub fn with_entry_updated<T: Entry>(&self, id: &str, update: impl FnOnce(&T) -> T) -> Resume {
        let current = T::collection(self);
        let Some(index) = current.iter().position(|e| e.id() == id) else {
            debug!("entry {id} not found; update skipped");
            return self.clone();
        };

        let updated = update(current[index].as_ref());
        if updated == *current[index] {
            return self.clone();
        }

        let mut entries = current.to_vec();
        entries[index] = Arc::new(updated);
        T::with_collection(self, entries)
    }

    /// Removes the entry and everything it owns.
    pub fn with_entry_removed<T: Entry>(&self, id: &str) -> Resume {
        let current = T::collection(self);
        if !current.iter().any(|e| e.id() == id) {
            return self.clone();
        }
        let entries = current.iter().filter(|e| e.id() != id).cloned().collect();
        T::with_collection(self, entries)
    }

    // ── Skills ──────────────────────────────────────────────────────────────

    /// Appends a trimmed skill. Blank values and exact duplicates are ignored.
    pub fn with_skill_added(&self, category: SkillCategory, value: &str) -> Resume {
        let value = value.trim();
        let items = self.skills.items(category);
        if value.is_empty() || items.iter().any(|s| s == value) {
            debug!("skill '{value}' rejected for {}", category.as_str());
            return self.clone();
        }
        let mut next_items = items.to_vec();
        next_items.push(value.to_string());
        self.with_skill_category(category, next_items)
    }

    pub fn with_skill_removed(&self, category: SkillCategory, index: usize) -> Resume {
        let items = self.skills.items(category);
        if index >= items.len() {
            return self.clone();
        }
        let mut next_items = items.to_vec();
        next_items.remove(index);
        self.with_skill_category(category, next_items)
    }

    pub fn with_skill_category(&self, category: SkillCategory, items: Vec<String>) -> Resume {
        Resume {
            skills: self.skills.with_items(category, items),
            ..self.clone()
        }
    }

    /// Moves one skill from `from` to `to` within its category (drag reordering).
    pub fn with_skill_moved(&self, category: SkillCategory, from: usize, to: usize) -> Resume {
        let items = self.skills.items(category);
        if from >= items.len() || to >= items.len() || from == to {
            return self.clone();
        }
        let mut next_items = items.to_vec();
        let moved = next_items.remove(from);
        next_items.insert(to, moved);
        self.with_skill_category(category, next_items)
    }
}
