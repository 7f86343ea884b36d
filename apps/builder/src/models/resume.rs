use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::bullet::{BulletConcept, SelectedBulletRef};

pub const UNTITLED_RESUME: &str = "Untitled Resume";

/// Aggregate root of the builder.
///
/// Entry collections hold `Arc`s so that a transition shares every entry it does
/// not touch with the previous snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    /// Assigned by the persistence backend; `None` until first saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub experiences: Vec<Arc<Experience>>,
    pub education: Vec<Arc<Education>>,
    pub projects: Vec<Arc<Project>>,
    pub skills: Skills,
    pub tags: Vec<String>,
    #[serde(with = "crate::timestamp::lenient_option", skip_serializing_if = "Option::is_none")]
    pub last_edited: Option<DateTime<Utc>>,
}

impl Resume {
    /// A never-saved resume with placeholder name and empty collections.
    pub fn blank() -> Self {
        Self {
            name: UNTITLED_RESUME.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub selected_bullets: Vec<SelectedBulletRef>,
    #[serde(default)]
    pub bullet_options: Vec<BulletConcept>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub selected_bullets: Vec<SelectedBulletRef>,
    #[serde(default)]
    pub bullet_options: Vec<BulletConcept>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub graduation_date: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Languages,
    Frameworks,
    Tools,
    Awards,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Languages,
        SkillCategory::Frameworks,
        SkillCategory::Tools,
        SkillCategory::Awards,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Languages => "languages",
            SkillCategory::Frameworks => "frameworks",
            SkillCategory::Tools => "tools",
            SkillCategory::Awards => "awards",
        }
    }
}

/// Four fixed skill lists. Item order is the display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Skills {
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub tools: Vec<String>,
    pub awards: Vec<String>,
}

impl Skills {
    pub fn items(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::Languages => &self.languages,
            SkillCategory::Frameworks => &self.frameworks,
            SkillCategory::Tools => &self.tools,
            SkillCategory::Awards => &self.awards,
        }
    }

    /// Returns a copy with one category replaced.
    pub fn with_items(&self, category: SkillCategory, items: Vec<String>) -> Self {
        let mut next = self.clone();
        match category {
            SkillCategory::Languages => next.languages = items,
            SkillCategory::Frameworks => next.frameworks = items,
            SkillCategory::Tools => next.tools = items,
            SkillCategory::Awards => next.awards = items,
        }
        next
    }
}

/// Envelope returned by every read or write against the persistence backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredResume {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "crate::timestamp")]
    pub last_edited: DateTime<Utc>,
    #[serde(default)]
    pub data: Resume,
}

impl StoredResume {
    /// Unwraps the stored document, letting the envelope's id, tags and
    /// timestamp win over whatever the document body carries.
    pub fn into_resume(self) -> Resume {
        let mut resume = self.data;
        resume.id = Some(self.id);
        resume.tags = self.tags;
        resume.last_edited = Some(self.last_edited);
        if resume.name.trim().is_empty() && !self.name.is_empty() {
            resume.name = self.name;
        }
        resume
    }
}

/// Body of a create (`id == None`) or update request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SaveRequest {
    #[serde(skip)]
    pub id: Option<String>,
    pub name: String,
    pub tags: Vec<String>,
    pub data: Resume,
}

impl SaveRequest {
    pub fn from_resume(resume: &Resume) -> Self {
        Self {
            id: resume.id.clone(),
            name: resume.name.clone(),
            tags: resume.tags.clone(),
            data: resume.clone(),
        }
    }
}
