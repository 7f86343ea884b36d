//! Merge patches. A `None` field leaves the target untouched; `Some` replaces it.

use serde::{Deserialize, Serialize};

use crate::models::bullet::BulletConcept;
use crate::models::resume::{Education, Experience, Project, Resume};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PersonalPatch {
    pub fn apply(&self, resume: &Resume) -> Resume {
        let mut next = resume.clone();
        merge(&mut next.name, &self.name);
        merge(&mut next.email, &self.email);
        merge(&mut next.phone, &self.phone);
        merge(&mut next.location, &self.location);
        merge(&mut next.linkedin, &self.linkedin);
        merge(&mut next.github, &self.github);
        merge(&mut next.tags, &self.tags);
        next
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperiencePatch {
    pub company: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ExperiencePatch {
    pub fn apply(&self, exp: &Experience) -> Experience {
        let mut next = exp.clone();
        merge(&mut next.company, &self.company);
        if let Some(location) = &self.location {
            next.location = Some(location.clone());
        }
        merge(&mut next.title, &self.title);
        merge(&mut next.start_date, &self.start_date);
        merge(&mut next.end_date, &self.end_date);
        merge(&mut next.tags, &self.tags);
        next
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ProjectPatch {
    pub fn apply(&self, project: &Project) -> Project {
        let mut next = project.clone();
        merge(&mut next.title, &self.title);
        merge(&mut next.url, &self.url);
        merge(&mut next.tags, &self.tags);
        next
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationPatch {
    pub school: Option<String>,
    pub field: Option<String>,
    pub degree: Option<String>,
    pub graduation_date: Option<String>,
    pub description: Option<String>,
}

impl EducationPatch {
    pub fn apply(&self, education: &Education) -> Education {
        let mut next = education.clone();
        merge(&mut next.school, &self.school);
        merge(&mut next.field, &self.field);
        merge(&mut next.degree, &self.degree);
        merge(&mut next.graduation_date, &self.graduation_date);
        merge(&mut next.description, &self.description);
        next
    }
}

/// Editable concept metadata. Variants are managed through their own operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConceptPatch {
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ConceptPatch {
    pub fn apply(&self, concept: &BulletConcept) -> BulletConcept {
        let mut next = concept.clone();
        // A blank summary would leave the concept unlabeled; keep the old one.
        if let Some(summary) = self.summary.as_deref().map(str::trim) {
            if !summary.is_empty() {
                next.summary = summary.to_string();
            }
        }
        if let Some(tags) = &self.tags {
            next.tags = tags
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
        }
        next
    }
}

fn merge<T: Clone>(target: &mut T, patch: &Option<T>) {
    if let Some(value) = patch {
        *target = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_patch_replaces_only_named_fields() {
        let exp = Experience {
            id: "exp-1".to_string(),
            company: "Acme".to_string(),
            title: "Engineer".to_string(),
            ..Experience::default()
        };
        let patch = ExperiencePatch {
            title: Some("Senior Engineer".to_string()),
            location: Some("Berlin".to_string()),
            ..ExperiencePatch::default()
        };
        let next = patch.apply(&exp);
        assert_eq!(next.company, "Acme");
        assert_eq!(next.title, "Senior Engineer");
        assert_eq!(next.location.as_deref(), Some("Berlin"));
        assert_eq!(exp.title, "Engineer");
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let resume = Resume::blank();
        assert_eq!(PersonalPatch::default().apply(&resume), resume);
    }

    #[test]
    fn test_concept_patch_keeps_variants() {
        let concept = BulletConcept {
            id: "c1".to_string(),
            summary: "Old".to_string(),
            tags: vec!["a".to_string()],
            variants: vec![],
        };
        let patch: ConceptPatch = serde_json::from_str(r#"{"summary":"New"}"#).unwrap();
        let next = patch.apply(&concept);
        assert_eq!(next.summary, "New");
        assert_eq!(next.tags, vec!["a".to_string()]);
    }

    #[test]
    fn test_concept_patch_trims_summary_and_drops_blank_tags() {
        let concept = BulletConcept {
            id: "c1".to_string(),
            summary: "Old".to_string(),
            tags: vec![],
            variants: vec![],
        };
        let patch = ConceptPatch {
            summary: Some("  Perf  ".to_string()),
            tags: Some(vec![" React ".to_string(), " ".to_string(), "".to_string()]),
        };
        let next = patch.apply(&concept);
        assert_eq!(next.summary, "Perf");
        assert_eq!(next.tags, vec!["React".to_string()]);

        let blank = ConceptPatch {
            summary: Some("   ".to_string()),
            tags: None,
        };
        assert_eq!(blank.apply(&next).summary, "Perf");
    }
}
