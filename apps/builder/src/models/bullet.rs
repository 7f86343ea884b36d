use serde::{Deserialize, Serialize};

/// One concrete phrasing of a bullet concept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulletVariant {
    pub id: String,
    pub text: String,
}

/// A reusable achievement statement with one or more phrasings.
///
/// Serialized as `BulletOption` in the stored document. `variants` is never empty
/// while the concept is alive; the library operations refuse to drop the last one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulletConcept {
    pub id: String,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub variants: Vec<BulletVariant>,
}

impl BulletConcept {
    pub fn variant(&self, variant_id: &str) -> Option<&BulletVariant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }
}

/// A (concept, variant) pair chosen to appear on the rendered resume.
///
/// This is a reference into the owning entry's library, not a copy of the text.
/// A reference whose concept or variant was deleted stays valid and resolves to "".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct SelectedBulletRef {
    pub option_id: String,
    pub variant_id: String,
}

impl SelectedBulletRef {
    pub fn new(option_id: impl Into<String>, variant_id: impl Into<String>) -> Self {
        Self {
            option_id: option_id.into(),
            variant_id: variant_id.into(),
        }
    }

    pub fn matches(&self, option_id: &str, variant_id: &str) -> bool {
        self.option_id == option_id && self.variant_id == variant_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selected_ref_uses_camel_case_wire_names() {
        let value = serde_json::to_value(SelectedBulletRef::new("c1", "v1")).unwrap();
        assert_eq!(value, json!({ "optionId": "c1", "variantId": "v1" }));
    }

    #[test]
    fn test_concept_tolerates_missing_tags() {
        let concept: BulletConcept = serde_json::from_value(json!({
            "id": "c1",
            "summary": "Latency work",
            "variants": [{ "id": "v1", "text": "Cut p99 by 40%" }]
        }))
        .unwrap();
        assert!(concept.tags.is_empty());
        assert_eq!(concept.variant("v1").map(|v| v.text.as_str()), Some("Cut p99 by 40%"));
        assert!(concept.variant("v2").is_none());
    }
}
