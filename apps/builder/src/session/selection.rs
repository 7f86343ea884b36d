use serde::{Deserialize, Serialize};

use crate::models::entry::EntryKind;
use crate::models::resume::Resume;

/// Which entry's bullet library the side panel shows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivePanel {
    Experience,
    Project,
    None,
}

/// Expanded-entry state. At most one of experience/project is set at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    experience: Option<String>,
    project: Option<String>,
}

impl Selection {
    /// First experience if there is one, otherwise nothing.
    /// Projects are never auto-selected.
    pub fn initial(resume: &Resume) -> Self {
        Self {
            experience: resume.experiences.first().map(|e| e.id.clone()),
            project: None,
        }
    }

    /// Selecting an experience clears the project; `None` only collapses the experience.
    pub fn select_experience(&self, id: Option<&str>) -> Self {
        match id {
            Some(id) => Self {
                experience: Some(id.to_string()),
                project: None,
            },
            None => Self {
                experience: None,
                project: self.project.clone(),
            },
        }
    }

    pub fn select_project(&self, id: Option<&str>) -> Self {
        match id {
            Some(id) => Self {
                experience: None,
                project: Some(id.to_string()),
            },
            None => Self {
                experience: self.experience.clone(),
                project: None,
            },
        }
    }

    pub fn selected(&self, kind: EntryKind) -> Option<&str> {
        match kind {
            EntryKind::Experience => self.experience.as_deref(),
            EntryKind::Project => self.project.as_deref(),
        }
    }

    pub fn active_panel(&self) -> ActivePanel {
        if self.project.is_some() {
            ActivePanel::Project
        } else if self.experience.is_some() {
            ActivePanel::Experience
        } else {
            ActivePanel::None
        }
    }

    /// Clears the selection if it points at the removed entry.
    pub fn forget(&self, kind: EntryKind, removed_id: &str) -> Self {
        if self.selected(kind) != Some(removed_id) {
            return self.clone();
        }
        match kind {
            EntryKind::Experience => self.select_experience(None),
            EntryKind::Project => self.select_project(None),
        }
    }
}
