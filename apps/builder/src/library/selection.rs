//! Selected-bullet operations: the references that decide what an entry renders.

use tracing::debug;

use crate::models::bullet::{BulletConcept, SelectedBulletRef};

/// Appends a reference. Duplicates are allowed; existence is not checked.
pub fn add_selected_bullet(
    selected: &[SelectedBulletRef],
    concept_id: &str,
    variant_id: &str,
) -> Vec<SelectedBulletRef> {
    let mut next = selected.to_vec();
    next.push(SelectedBulletRef::new(concept_id, variant_id));
    next
}

/// Removes every reference equal to `(concept_id, variant_id)`.
/// References to the same concept with another variant stay.
pub fn remove_selected_bullet(
    selected: &[SelectedBulletRef],
    concept_id: &str,
    variant_id: &str,
) -> Vec<SelectedBulletRef> {
    selected
        .iter()
        .filter(|b| !b.matches(concept_id, variant_id))
        .cloned()
        .collect()
}

/// Advances the concept's selection to its next variant.
///
/// Next index is `(index_of(current) + 1) % variant_count`; an unknown current
/// variant counts as index -1, so a stale reference snaps to the first variant.
///
/// Lock-step policy: every reference to `concept_id` is rewritten to the same
/// next variant, whatever variant it pointed at before. Unknown concepts and
/// concepts without variants leave the list unchanged.
pub fn switch_selected_variant(
    selected: &[SelectedBulletRef],
    options: &[BulletConcept],
    concept_id: &str,
    current_variant_id: &str,
) -> Vec<SelectedBulletRef> {
    let Some(concept) = options.iter().find(|c| c.id == concept_id) else {
        debug!("switch_selected_variant: concept {concept_id} not in library");
        return selected.to_vec();
    };
    if concept.variants.is_empty() {
        return selected.to_vec();
    }

    let next_index = concept
        .variants
        .iter()
        .position(|v| v.id == current_variant_id)
        .map_or(0, |i| (i + 1) % concept.variants.len());
    let next_variant_id = &concept.variants[next_index].id;

    selected
        .iter()
        .map(|b| {
            if b.option_id == concept_id {
                SelectedBulletRef::new(concept_id, next_variant_id.as_str())
            } else {
                b.clone()
            }
        })
        .collect()
}

/// Text of the referenced variant, or `""` when either lookup misses.
pub fn resolve_bullet_text<'a>(
    options: &'a [BulletConcept],
    concept_id: &str,
    variant_id: &str,
) -> &'a str {
    options
        .iter()
        .find(|c| c.id == concept_id)
        .and_then(|c| c.variant(variant_id))
        .map(|v| v.text.as_str())
        .unwrap_or("")
}

/// Number of variants of a concept; 0 when it does not exist.
pub fn variant_count(options: &[BulletConcept], concept_id: &str) -> usize {
    options
        .iter()
        .find(|c| c.id == concept_id)
        .map_or(0, |c| c.variants.len())
}

/// Drops references whose concept or variant no longer exists.
///
/// Never called implicitly: concept and variant deletion leave references in
/// place and rendering resolves them to empty text.
pub fn prune_dangling(
    selected: &[SelectedBulletRef],
    options: &[BulletConcept],
) -> Vec<SelectedBulletRef> {
    selected
        .iter()
        .filter(|b| {
            options
                .iter()
                .any(|c| c.id == b.option_id && c.variant(&b.variant_id).is_some())
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::concepts::{delete_concept, delete_variant};
    use crate::models::bullet::BulletVariant;

    fn c1() -> Vec<BulletConcept> {
        vec![BulletConcept {
            id: "C1".to_string(),
            summary: "X".to_string(),
            tags: vec![],
            variants: vec![
                BulletVariant {
                    id: "v1".to_string(),
                    text: "Built X".to_string(),
                },
                BulletVariant {
                    id: "v2".to_string(),
                    text: "Led X".to_string(),
                },
            ],
        }]
    }

    fn refs(pairs: &[(&str, &str)]) -> Vec<SelectedBulletRef> {
        pairs
            .iter()
            .map(|(c, v)| SelectedBulletRef::new(*c, *v))
            .collect()
    }

    #[test]
    fn test_switch_cycles_between_two_variants() {
        let options = c1();
        let selected = refs(&[("C1", "v1")]);

        let once = switch_selected_variant(&selected, &options, "C1", "v1");
        assert_eq!(once, refs(&[("C1", "v2")]));

        let twice = switch_selected_variant(&once, &options, "C1", "v2");
        assert_eq!(twice, refs(&[("C1", "v1")]));
    }

    #[test]
    fn test_switch_unknown_current_snaps_to_first() {
        let options = c1();
        let selected = refs(&[("C1", "gone")]);
        let next = switch_selected_variant(&selected, &options, "C1", "gone");
        assert_eq!(next, refs(&[("C1", "v1")]));
    }

    #[test]
    fn test_switch_moves_all_refs_of_concept_in_lock_step() {
        let options = c1();
        let selected = refs(&[("C1", "v1"), ("C2", "x"), ("C1", "v2")]);
        let next = switch_selected_variant(&selected, &options, "C1", "v1");
        assert_eq!(next, refs(&[("C1", "v2"), ("C2", "x"), ("C1", "v2")]));
    }

    #[test]
    fn test_switch_variant_count_times_is_identity() {
        let mut options = c1();
        options[0].variants.push(BulletVariant {
            id: "v3".to_string(),
            text: "Drove X".to_string(),
        });
        let original = refs(&[("C1", "v2")]);
        let mut current = original.clone();
        for _ in 0..options[0].variants.len() {
            let current_variant = current[0].variant_id.clone();
            current = switch_selected_variant(&current, &options, "C1", &current_variant);
        }
        assert_eq!(current, original);
    }

    #[test]
    fn test_switch_unknown_concept_is_noop() {
        let selected = refs(&[("C1", "v1")]);
        assert_eq!(switch_selected_variant(&selected, &c1(), "C9", "v1"), selected);
    }

    #[test]
    fn test_switch_concept_without_variants_is_noop() {
        let mut options = c1();
        options[0].variants.clear();
        let selected = refs(&[("C1", "v1")]);
        assert_eq!(switch_selected_variant(&selected, &options, "C1", "v1"), selected);
    }

    #[test]
    fn test_remove_selected_targets_exact_pair() {
        let selected = refs(&[("C1", "v1"), ("C1", "v2"), ("C2", "v1")]);
        let next = remove_selected_bullet(&selected, "C1", "v1");
        assert_eq!(next, refs(&[("C1", "v2"), ("C2", "v1")]));
    }

    #[test]
    fn test_remove_then_readd_does_not_duplicate() {
        let selected = refs(&[("C1", "v1"), ("C2", "v3")]);
        let removed = remove_selected_bullet(&selected, "C1", "v1");
        let restored = add_selected_bullet(&removed, "C1", "v1");
        assert_eq!(restored.len(), selected.len());
        assert!(restored.contains(&SelectedBulletRef::new("C1", "v1")));
        assert!(restored.contains(&SelectedBulletRef::new("C2", "v3")));
    }

    #[test]
    fn test_resolve_text_hits_and_misses() {
        let options = c1();
        assert_eq!(resolve_bullet_text(&options, "C1", "v2"), "Led X");
        assert_eq!(resolve_bullet_text(&options, "C1", "v9"), "");
        assert_eq!(resolve_bullet_text(&options, "C9", "v1"), "");
    }

    #[test]
    fn test_resolve_after_delete_is_empty() {
        let options = delete_concept(&c1(), "C1");
        assert_eq!(resolve_bullet_text(&options, "C1", "v1"), "");

        let options = delete_variant(&c1(), "C1", "v1");
        assert_eq!(resolve_bullet_text(&options, "C1", "v1"), "");
        assert_eq!(resolve_bullet_text(&options, "C1", "v2"), "Led X");
    }

    #[test]
    fn test_variant_count() {
        assert_eq!(variant_count(&c1(), "C1"), 2);
        assert_eq!(variant_count(&c1(), "C2"), 0);
    }

    #[test]
    fn test_prune_dangling_keeps_live_refs_only() {
        let options = delete_variant(&c1(), "C1", "v1");
        let selected = refs(&[("C1", "v1"), ("C1", "v2"), ("C7", "v2")]);
        assert_eq!(prune_dangling(&selected, &options), refs(&[("C1", "v2")]));
    }
}
