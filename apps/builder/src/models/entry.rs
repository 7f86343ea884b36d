//! Entry traits. The seam that lets document, library and session code treat
//! experiences and projects uniformly.
//!
//! `Entry` locates a record's collection inside a `Resume`; `BulletOwner` adds the
//! private bullet library. Libraries are never mixed across kinds.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::bullet::{BulletConcept, SelectedBulletRef};
use crate::models::resume::{Education, Experience, Project, Resume};

/// Which kind of bullet-owning entry a panel or search is scoped to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Experience,
    Project,
}

/// A record owned by one of the resume's ordered collections.
pub trait Entry: Clone + PartialEq {
    /// Prefix for freshly generated ids.
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;
    /// A new record with the given id and all other fields empty.
    fn empty(id: String) -> Self;
    fn collection(resume: &Resume) -> &[Arc<Self>];
    fn with_collection(resume: &Resume, entries: Vec<Arc<Self>>) -> Resume;
}

/// An entry that owns a bullet library and a selected-bullet list.
pub trait BulletOwner: Entry {
    const KIND: EntryKind;

    fn bullet_options(&self) -> &[BulletConcept];
    fn selected_bullets(&self) -> &[SelectedBulletRef];
    fn with_bullet_options(&self, options: Vec<BulletConcept>) -> Self;
    fn with_selected_bullets(&self, selected: Vec<SelectedBulletRef>) -> Self;
    /// Subtitle shown above the entry's library panel.
    fn label(&self) -> String;
}

impl Entry for Experience {
    const ID_PREFIX: &'static str = "exp";

    fn id(&self) -> &str {
        &self.id
    }

    fn empty(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn collection(resume: &Resume) -> &[Arc<Self>] {
        &resume.experiences
    }

    fn with_collection(resume: &Resume, entries: Vec<Arc<Self>>) -> Resume {
        Resume {
            experiences: entries,
            ..resume.clone()
        }
    }
}

impl BulletOwner for Experience {
    const KIND: EntryKind = EntryKind::Experience;

    fn bullet_options(&self) -> &[BulletConcept] {
        &self.bullet_options
    }

    fn selected_bullets(&self) -> &[SelectedBulletRef] {
        &self.selected_bullets
    }

    fn with_bullet_options(&self, options: Vec<BulletConcept>) -> Self {
        Self {
            bullet_options: options,
            ..self.clone()
        }
    }

    fn with_selected_bullets(&self, selected: Vec<SelectedBulletRef>) -> Self {
        Self {
            selected_bullets: selected,
            ..self.clone()
        }
    }

    fn label(&self) -> String {
        let company = if self.company.is_empty() {
            "Company"
        } else {
            &self.company
        };
        format!("{} at {}", self.title, company)
    }
}

impl Entry for Project {
    const ID_PREFIX: &'static str = "proj";

    fn id(&self) -> &str {
        &self.id
    }

    fn empty(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn collection(resume: &Resume) -> &[Arc<Self>] {
        &resume.projects
    }

    fn with_collection(resume: &Resume, entries: Vec<Arc<Self>>) -> Resume {
        Resume {
            projects: entries,
            ..resume.clone()
        }
    }
}

impl BulletOwner for Project {
    const KIND: EntryKind = EntryKind::Project;

    fn bullet_options(&self) -> &[BulletConcept] {
        &self.bullet_options
    }

    fn selected_bullets(&self) -> &[SelectedBulletRef] {
        &self.selected_bullets
    }

    fn with_bullet_options(&self, options: Vec<BulletConcept>) -> Self {
        Self {
            bullet_options: options,
            ..self.clone()
        }
    }

    fn with_selected_bullets(&self, selected: Vec<SelectedBulletRef>) -> Self {
        Self {
            selected_bullets: selected,
            ..self.clone()
        }
    }

    fn label(&self) -> String {
        if self.title.is_empty() {
            "Untitled Project".to_string()
        } else {
            self.title.clone()
        }
    }
}

impl Entry for Education {
    const ID_PREFIX: &'static str = "edu";

    fn id(&self) -> &str {
        &self.id
    }

    fn empty(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn collection(resume: &Resume) -> &[Arc<Self>] {
        &resume.education
    }

    fn with_collection(resume: &Resume, entries: Vec<Arc<Self>>) -> Resume {
        Resume {
            education: entries,
            ..resume.clone()
        }
    }
}
