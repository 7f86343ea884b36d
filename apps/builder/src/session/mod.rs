//! Builder session: the in-memory editing state consumed by the view layer.
//!
//! The view dispatches intents, `BuilderState` turns each into a copy-on-write
//! transition of the current `Resume`, and the view re-renders from the new
//! snapshot. All transitions run synchronously; only `sync` touches I/O.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::library;
use crate::models::bullet::{BulletConcept, SelectedBulletRef};
use crate::models::entry::{BulletOwner, EntryKind};
use crate::models::patch::{
    ConceptPatch, EducationPatch, ExperiencePatch, PersonalPatch, ProjectPatch,
};
use crate::models::resume::{Education, Experience, Project, Resume, SkillCategory};

pub mod panel;
pub mod selection;
pub mod sync;

pub use panel::{LibraryPanel, OtherEntryMatches};
pub use selection::{ActivePanel, Selection};
pub use sync::{LoadOutcome, LoadStatus, LoadTicket, SaveOutcome, SaveTicket};

/// A selected bullet with its text resolved for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBullet {
    pub option_id: String,
    pub variant_id: String,
    /// Empty when the reference dangles.
    pub text: String,
    pub variant_count: usize,
}

/// Editing session over one resume.
#[derive(Debug)]
pub struct BuilderState {
    resume: Arc<Resume>,
    selection: Selection,
    /// Bumped on every transition that changed the document.
    revision: u64,
    sync: sync::SyncTracker,
}

impl Default for BuilderState {
    fn default() -> Self {
        Self::new(Resume::blank())
    }
}

impl BuilderState {
    pub fn new(resume: Resume) -> Self {
        let selection = Selection::initial(&resume);
        Self {
            resume: Arc::new(resume),
            selection,
            revision: 0,
            sync: sync::SyncTracker::default(),
        }
    }

    // ── Snapshot access ─────────────────────────────────────────────────────

    pub fn resume(&self) -> &Resume {
        &self.resume
    }

    /// Shared handle to the current snapshot. Pointer-equal across no-op intents.
    pub fn snapshot(&self) -> Arc<Resume> {
        Arc::clone(&self.resume)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Installs `next` unless it equals the current document.
    fn commit(&mut self, next: Resume) -> bool {
        if next == *self.resume {
            return false;
        }
        self.resume = Arc::new(next);
        self.revision += 1;
        true
    }

    /// Replaces document and selection wholesale (load completion).
    fn reset(&mut self, resume: Resume) {
        self.selection = Selection::initial(&resume);
        self.resume = Arc::new(resume);
        self.revision += 1;
    }

    // ── Selection ───────────────────────────────────────────────────────────

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn active_panel(&self) -> ActivePanel {
        self.selection.active_panel()
    }

    pub fn select_experience(&mut self, id: Option<&str>) {
        self.selection = self.selection.select_experience(id);
    }

    pub fn select_project(&mut self, id: Option<&str>) {
        self.selection = self.selection.select_project(id);
    }

    pub fn selected_experience(&self) -> Option<&Experience> {
        self.selected_entry::<Experience>()
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected_entry::<Project>()
    }

    fn selected_entry<T: BulletOwner>(&self) -> Option<&T> {
        let id = self.selection.selected(T::KIND)?;
        self.resume.entry::<T>(id).map(|e| e.as_ref())
    }

    // ── Personal fields ─────────────────────────────────────────────────────

    pub fn update_personal(&mut self, patch: &PersonalPatch) -> bool {
        let next = self.resume.with_personal(patch);
        self.commit(next)
    }

    // ── Experiences / projects / education ──────────────────────────────────

    /// Appends an empty experience and selects it.
    pub fn add_experience(&mut self) -> String {
        let (next, id) = self.resume.with_new_entry::<Experience>();
        self.commit(next);
        self.select_experience(Some(id.as_str()));
        id
    }

    pub fn update_experience(&mut self, id: &str, patch: &ExperiencePatch) -> bool {
        let next = self.resume.with_entry_updated::<Experience>(id, |e| patch.apply(e));
        self.commit(next)
    }

    /// Removes the experience with its library. Clears the selection if it was selected.
    pub fn remove_experience(&mut self, id: &str) -> bool {
        self.remove_owner::<Experience>(id)
    }

    /// Appends an empty project and selects it.
    pub fn add_project(&mut self) -> String {
        let (next, id) = self.resume.with_new_entry::<Project>();
        self.commit(next);
        self.select_project(Some(id.as_str()));
        id
    }

    pub fn update_project(&mut self, id: &str, patch: &ProjectPatch) -> bool {
        let next = self.resume.with_entry_updated::<Project>(id, |p| patch.apply(p));
        self.commit(next)
    }

    pub fn remove_project(&mut self, id: &str) -> bool {
        self.remove_owner::<Project>(id)
    }

    fn remove_owner<T: BulletOwner>(&mut self, id: &str) -> bool {
        let next = self.resume.with_entry_removed::<T>(id);
        let changed = self.commit(next);
        if changed {
            self.selection = self.selection.forget(T::KIND, id);
        }
        changed
    }

    pub fn add_education(&mut self) -> String {
        let (next, id) = self.resume.with_new_entry::<Education>();
        self.commit(next);
        id
    }

    pub fn update_education(&mut self, id: &str, patch: &EducationPatch) -> bool {
        let next = self.resume.with_entry_updated::<Education>(id, |e| patch.apply(e));
        self.commit(next)
    }

    pub fn remove_education(&mut self, id: &str) -> bool {
        let next = self.resume.with_entry_removed::<Education>(id);
        self.commit(next)
    }

    // ── Skills ──────────────────────────────────────────────────────────────

    pub fn add_skill(&mut self, category: SkillCategory, value: &str) -> bool {
        let next = self.resume.with_skill_added(category, value);
        self.commit(next)
    }

    pub fn remove_skill(&mut self, category: SkillCategory, index: usize) -> bool {
        let next = self.resume.with_skill_removed(category, index);
        self.commit(next)
    }

    pub fn set_skill_category(&mut self, category: SkillCategory, items: Vec<String>) -> bool {
        let next = self.resume.with_skill_category(category, items);
        self.commit(next)
    }

    pub fn move_skill(&mut self, category: SkillCategory, from: usize, to: usize) -> bool {
        let next = self.resume.with_skill_moved(category, from, to);
        self.commit(next)
    }

    // ── Bullet library (per entry) ──────────────────────────────────────────

    fn edit_entry<T: BulletOwner>(&mut self, entry_id: &str, edit: impl FnOnce(&T) -> T) -> bool {
        let next = self.resume.with_entry_updated::<T>(entry_id, edit);
        self.commit(next)
    }

    fn edit_library<T: BulletOwner>(
        &mut self,
        entry_id: &str,
        edit: impl FnOnce(&[BulletConcept]) -> Vec<BulletConcept>,
    ) -> bool {
        self.edit_entry::<T>(entry_id, |e| e.with_bullet_options(edit(e.bullet_options())))
    }

    fn edit_selected<T: BulletOwner>(
        &mut self,
        entry_id: &str,
        edit: impl FnOnce(&T) -> Vec<SelectedBulletRef>,
    ) -> bool {
        self.edit_entry::<T>(entry_id, |e| e.with_selected_bullets(edit(e)))
    }

    pub fn add_concept<T: BulletOwner>(
        &mut self,
        entry_id: &str,
        summary: &str,
        tags: &[String],
        initial_variant_text: &str,
    ) -> bool {
        self.edit_library::<T>(entry_id, |options| {
            library::add_concept(options, summary, tags, initial_variant_text)
        })
    }

    /// Leaves selected references to the concept dangling; they render as "".
    pub fn delete_concept<T: BulletOwner>(&mut self, entry_id: &str, concept_id: &str) -> bool {
        self.edit_library::<T>(entry_id, |options| library::delete_concept(options, concept_id))
    }

    pub fn update_concept<T: BulletOwner>(
        &mut self,
        entry_id: &str,
        concept_id: &str,
        patch: &ConceptPatch,
    ) -> bool {
        self.edit_library::<T>(entry_id, |options| {
            library::update_concept(options, concept_id, patch)
        })
    }

    pub fn add_variant<T: BulletOwner>(&mut self, entry_id: &str, concept_id: &str, text: &str) -> bool {
        self.edit_library::<T>(entry_id, |options| library::add_variant(options, concept_id, text))
    }

    pub fn delete_variant<T: BulletOwner>(
        &mut self,
        entry_id: &str,
        concept_id: &str,
        variant_id: &str,
    ) -> bool {
        self.edit_library::<T>(entry_id, |options| {
            library::delete_variant(options, concept_id, variant_id)
        })
    }

    /// Replaces an entry's whole library.
    pub fn set_bullet_options<T: BulletOwner>(
        &mut self,
        entry_id: &str,
        options: Vec<BulletConcept>,
    ) -> bool {
        self.edit_entry::<T>(entry_id, |e| e.with_bullet_options(options))
    }

    /// Duplicates `concept` into the target entry's library under fresh ids.
    pub fn copy_concept<T: BulletOwner>(&mut self, target_entry_id: &str, concept: &BulletConcept) -> bool {
        self.edit_library::<T>(target_entry_id, |options| library::copy_concept(concept, options))
    }

    pub fn add_bullet<T: BulletOwner>(&mut self, entry_id: &str, concept_id: &str, variant_id: &str) -> bool {
        self.edit_selected::<T>(entry_id, |e| {
            library::add_selected_bullet(e.selected_bullets(), concept_id, variant_id)
        })
    }

    pub fn remove_bullet<T: BulletOwner>(
        &mut self,
        entry_id: &str,
        concept_id: &str,
        variant_id: &str,
    ) -> bool {
        self.edit_selected::<T>(entry_id, |e| {
            library::remove_selected_bullet(e.selected_bullets(), concept_id, variant_id)
        })
    }

    /// Cycles every selected reference to `concept_id` to the next variant.
    pub fn switch_bullet_variant<T: BulletOwner>(
        &mut self,
        entry_id: &str,
        concept_id: &str,
        current_variant_id: &str,
    ) -> bool {
        self.edit_selected::<T>(entry_id, |e| {
            library::switch_selected_variant(
                e.selected_bullets(),
                e.bullet_options(),
                concept_id,
                current_variant_id,
            )
        })
    }

    /// Opt-in cleanup of references left behind by concept or variant deletion.
    pub fn prune_dangling_bullets<T: BulletOwner>(&mut self, entry_id: &str) -> bool {
        self.edit_selected::<T>(entry_id, |e| {
            library::prune_dangling(e.selected_bullets(), e.bullet_options())
        })
    }

    /// Selected bullets of one entry in render order, text resolved.
    pub fn resolved_bullets<T: BulletOwner>(&self, entry_id: &str) -> Vec<ResolvedBullet> {
        let Some(entry) = self.resume.entry::<T>(entry_id) else {
            return Vec::new();
        };
        let options = entry.bullet_options();
        entry
            .selected_bullets()
            .iter()
            .map(|b| ResolvedBullet {
                option_id: b.option_id.clone(),
                variant_id: b.variant_id.clone(),
                text: library::resolve_bullet_text(options, &b.option_id, &b.variant_id)
                    .to_string(),
                variant_count: library::variant_count(options, &b.option_id),
            })
            .collect()
    }

    // ── Bullet library (active panel) ───────────────────────────────────────

    /// "Add to resume" from the library panel of whichever entry is active.
    pub fn add_bullet_to_active(&mut self, concept_id: &str, variant_id: &str) -> bool {
        match self.active_target() {
            Some((EntryKind::Experience, id)) => {
                self.add_bullet::<Experience>(&id, concept_id, variant_id)
            }
            Some((EntryKind::Project, id)) => self.add_bullet::<Project>(&id, concept_id, variant_id),
            None => {
                debug!("add_bullet_to_active ignored: no active entry");
                false
            }
        }
    }

    /// Copies a cross-entry search result into the active entry.
    pub fn copy_concept_into_active(&mut self, concept: &BulletConcept) -> bool {
        match self.active_target() {
            Some((EntryKind::Experience, id)) => self.copy_concept::<Experience>(&id, concept),
            Some((EntryKind::Project, id)) => self.copy_concept::<Project>(&id, concept),
            None => {
                debug!("copy_concept_into_active ignored: no active entry");
                false
            }
        }
    }

    fn active_target(&self) -> Option<(EntryKind, String)> {
        let kind = match self.active_panel() {
            ActivePanel::Experience => EntryKind::Experience,
            ActivePanel::Project => EntryKind::Project,
            ActivePanel::None => return None,
        };
        self.selection
            .selected(kind)
            .map(|id| (kind, id.to_string()))
    }
}
