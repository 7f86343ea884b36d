//! Resume builder core.
//!
//! Each experience and project owns a bullet library: concepts with one or
//! more phrasings. The resume selects `(concept, variant)` pairs out of that
//! library. The view layer drives a [`BuilderState`] and persists through a
//! [`PersistenceGateway`].

pub mod config;
pub mod document;
pub mod errors;
pub mod gateway;
pub mod ids;
pub mod library;
pub mod models;
pub mod session;
pub mod telemetry;
pub mod timestamp;

pub use config::Config;
pub use errors::GatewayError;
pub use gateway::{HttpGateway, PersistenceGateway};
pub use models::bullet::{BulletConcept, BulletVariant, SelectedBulletRef};
pub use models::entry::{BulletOwner, Entry, EntryKind};
pub use models::resume::{
    Education, Experience, Project, Resume, SaveRequest, SkillCategory, Skills, StoredResume,
};
pub use session::{ActivePanel, BuilderState, LibraryPanel, LoadOutcome, LoadStatus, SaveOutcome};
