// Bullet library: per-entry concept arenas and the pure operations over them.
// Libraries are owned by one entry; moving content between entries is always a copy.

pub mod concepts;
pub mod search;
pub mod selection;

pub use concepts::{
    add_concept, add_variant, copy_concept, delete_concept, delete_variant, parse_tag_list,
    update_concept,
};
pub use search::{
    concept_matches_query, concept_matches_tags, filter_concepts, filter_resumes, library_tags,
    search_other_entries, CrossEntryMatches, LibraryFilter,
};
pub use selection::{
    add_selected_bullet, prune_dangling, remove_selected_bullet, resolve_bullet_text,
    switch_selected_variant, variant_count,
};
