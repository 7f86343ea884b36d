use serde::Serialize;

use crate::library::{filter_concepts, library_tags, search_other_entries, LibraryFilter};
use crate::models::bullet::BulletConcept;
use crate::models::entry::{BulletOwner, EntryKind};
use crate::models::resume::{Experience, Project};
use crate::session::{ActivePanel, BuilderState};

/// Everything the library side panel renders for the active entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryPanel {
    pub kind: EntryKind,
    pub entry_id: String,
    pub label: String,
    /// Tag chips: every tag in the entry's library, unfiltered.
    pub available_tags: Vec<String>,
    pub concepts: Vec<BulletConcept>,
    /// Read-only matches from sibling entries of the same kind.
    pub other_entries: Vec<OtherEntryMatches>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OtherEntryMatches {
    pub entry_id: String,
    pub label: String,
    pub concepts: Vec<BulletConcept>,
}

impl BuilderState {
    /// Library panel for the active entry, or `None` when nothing is selected
    /// or the selected id no longer exists.
    pub fn library_panel(&self, filter: &LibraryFilter) -> Option<LibraryPanel> {
        match self.active_panel() {
            ActivePanel::Experience => self.panel_for::<Experience>(filter),
            ActivePanel::Project => self.panel_for::<Project>(filter),
            ActivePanel::None => None,
        }
    }

    fn panel_for<T: BulletOwner>(&self, filter: &LibraryFilter) -> Option<LibraryPanel> {
        let id = self.selection().selected(T::KIND)?;
        let entry = self.resume().entry::<T>(id)?;
        let siblings = self.resume().entries::<T>();

        Some(LibraryPanel {
            kind: T::KIND,
            entry_id: entry.id().to_string(),
            label: entry.label(),
            available_tags: library_tags(entry.bullet_options()),
            concepts: filter_concepts(entry.bullet_options(), filter)
                .into_iter()
                .cloned()
                .collect(),
            other_entries: search_other_entries(siblings, Some(id), filter)
                .into_iter()
                .map(|m| OtherEntryMatches {
                    entry_id: m.entry.id().to_string(),
                    label: m.entry.label(),
                    concepts: m.concepts.into_iter().cloned().collect(),
                })
                .collect(),
        })
    }
}
