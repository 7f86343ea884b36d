//! Load/save orchestration between a `BuilderState` and a `PersistenceGateway`.
//!
//! Each operation is split into a synchronous begin/finish pair so the view
//! layer can keep editing while a request is outstanding. Tickets tie a
//! response to the request that produced it:
//! - only the most recent load may apply; older or cancelled ones are dropped;
//! - a save response applies only to the document it was taken from;
//! - a never-saved document has at most one create (POST) in flight.
//!
//! Nothing is retried. Failures are logged and returned; local state is kept.

use tracing::{debug, info, warn};

use crate::errors::GatewayError;
use crate::gateway::PersistenceGateway;
use crate::models::resume::{Resume, SaveRequest, StoredResume};
use crate::session::BuilderState;

/// Outcome of the most recent load, for "not loaded" banners.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Session started from a local document and never loaded.
    #[default]
    Local,
    Loading(String),
    Loaded(String),
    /// Last load failed; the previous document is still shown.
    NotLoaded(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    resume_id: String,
    generation: u64,
}

impl LoadTicket {
    pub fn resume_id(&self) -> &str {
        &self.resume_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTicket {
    document: u64,
    /// True when this save creates the resume on the backend.
    creates: bool,
}

#[derive(Debug)]
pub enum LoadOutcome {
    Applied,
    /// Superseded or cancelled before the response arrived; discarded.
    Stale,
    Failed(GatewayError),
}

#[derive(Debug)]
pub enum SaveOutcome {
    Applied,
    /// The first save of this document is still in flight; nothing was sent.
    InProgress,
    /// A different document was loaded while the save was in flight.
    Stale,
    Failed(GatewayError),
}

#[derive(Debug, Default)]
pub(crate) struct SyncTracker {
    load_generation: u64,
    pending_load: Option<LoadTicket>,
    /// Bumped whenever a load replaces the document.
    document: u64,
    status: LoadStatus,
    create_in_flight: bool,
}

impl BuilderState {
    pub fn load_status(&self) -> &LoadStatus {
        &self.sync.status
    }

    /// Starts a load of `resume_id`, superseding any load still in flight.
    pub fn begin_load(&mut self, resume_id: &str) -> LoadTicket {
        self.sync.load_generation += 1;
        let ticket = LoadTicket {
            resume_id: resume_id.to_string(),
            generation: self.sync.load_generation,
        };
        self.sync.pending_load = Some(ticket.clone());
        self.sync.status = LoadStatus::Loading(resume_id.to_string());
        ticket
    }

    /// Forgets the pending load; its response will be discarded on arrival.
    pub fn cancel_pending_load(&mut self) {
        if let Some(ticket) = self.sync.pending_load.take() {
            info!("Cancelled pending load of resume {}", ticket.resume_id);
            if self.sync.status == LoadStatus::Loading(ticket.resume_id) {
                self.sync.status = LoadStatus::Local;
            }
        }
    }

    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<StoredResume, GatewayError>,
    ) -> LoadOutcome {
        if self.sync.pending_load.as_ref() != Some(&ticket) {
            warn!(
                "Discarding stale load response for resume {} (generation {})",
                ticket.resume_id, ticket.generation
            );
            return LoadOutcome::Stale;
        }
        self.sync.pending_load = None;

        match result {
            Ok(stored) => {
                let resume = stored.into_resume();
                info!(
                    "Loaded resume {} ({} experiences, {} projects)",
                    ticket.resume_id,
                    resume.experiences.len(),
                    resume.projects.len()
                );
                self.reset(resume);
                self.sync.document += 1;
                self.sync.create_in_flight = false;
                self.sync.status = LoadStatus::Loaded(ticket.resume_id);
                LoadOutcome::Applied
            }
            Err(e) => {
                if e.is_transport() {
                    warn!("Resume backend unreachable while loading {}: {e}", ticket.resume_id);
                } else {
                    warn!("Failed to load resume {}: {e}", ticket.resume_id);
                }
                self.sync.status = LoadStatus::NotLoaded(ticket.resume_id);
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Snapshot to send plus the ticket to finish the save with.
    ///
    /// `None` while the create of a never-saved document is still in flight:
    /// a second POST would leave an orphaned copy on the backend.
    pub fn begin_save(&mut self) -> Option<(SaveTicket, SaveRequest)> {
        let request = SaveRequest::from_resume(self.resume());
        let creates = request.id.is_none();
        if creates {
            if self.sync.create_in_flight {
                debug!("begin_save deferred: create already in flight");
                return None;
            }
            self.sync.create_in_flight = true;
        }
        let ticket = SaveTicket {
            document: self.sync.document,
            creates,
        };
        Some((ticket, request))
    }

    /// Applies the server-assigned id and timestamp. Everything else in the
    /// current document, including edits made after `begin_save`, is kept.
    pub fn finish_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<StoredResume, GatewayError>,
    ) -> SaveOutcome {
        if ticket.creates && ticket.document == self.sync.document {
            self.sync.create_in_flight = false;
        }

        let stored = match result {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to save resume: {e}");
                return SaveOutcome::Failed(e);
            }
        };

        if ticket.document != self.sync.document {
            warn!("Discarding save response for {}: document was replaced", stored.id);
            return SaveOutcome::Stale;
        }

        info!("Saved resume {} at {}", stored.id, stored.last_edited);
        let next = Resume {
            id: Some(stored.id),
            last_edited: Some(stored.last_edited),
            ..self.resume().clone()
        };
        self.commit(next);
        SaveOutcome::Applied
    }

    pub async fn load_from(
        &mut self,
        gateway: &dyn PersistenceGateway,
        resume_id: &str,
    ) -> LoadOutcome {
        let ticket = self.begin_load(resume_id);
        let result = gateway.load(resume_id).await;
        self.finish_load(ticket, result)
    }

    pub async fn save_to(&mut self, gateway: &dyn PersistenceGateway) -> SaveOutcome {
        let Some((ticket, request)) = self.begin_save() else {
            return SaveOutcome::InProgress;
        };
        let result = gateway.save(&request).await;
        self.finish_save(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Experience;
    use crate::models::patch::PersonalPatch;
    use chrono::Utc;
    use std::sync::Arc;

    fn stored(id: &str, experiences: usize) -> StoredResume {
        let mut data = Resume::blank();
        data.experiences = (0..experiences)
            .map(|i| {
                Arc::new(Experience {
                    id: format!("exp-{i}"),
                    ..Experience::default()
                })
            })
            .collect();
        StoredResume {
            id: id.to_string(),
            name: "Stored".to_string(),
            tags: vec!["backend".to_string()],
            last_edited: Utc::now(),
            data,
        }
    }

    #[test]
    fn test_load_applies_and_resets_selection() {
        let mut state = BuilderState::default();
        state.add_project();

        let ticket = state.begin_load("resume-1");
        assert_eq!(state.load_status(), &LoadStatus::Loading("resume-1".to_string()));
        let outcome = state.finish_load(ticket, Ok(stored("resume-1", 2)));

        assert!(matches!(outcome, LoadOutcome::Applied));
        assert_eq!(state.resume().id.as_deref(), Some("resume-1"));
        assert_eq!(state.resume().tags, vec!["backend".to_string()]);
        assert_eq!(state.selected_experience().map(|e| e.id.as_str()), Some("exp-0"));
        assert_eq!(state.load_status(), &LoadStatus::Loaded("resume-1".to_string()));
    }

    #[test]
    fn test_superseded_load_is_discarded() {
        let mut state = BuilderState::default();
        let first = state.begin_load("resume-1");
        let second = state.begin_load("resume-2");

        let outcome = state.finish_load(first, Ok(stored("resume-1", 1)));
        assert!(matches!(outcome, LoadOutcome::Stale));
        assert!(state.resume().id.is_none());

        let outcome = state.finish_load(second, Ok(stored("resume-2", 0)));
        assert!(matches!(outcome, LoadOutcome::Applied));
        assert_eq!(state.resume().id.as_deref(), Some("resume-2"));
    }

    #[test]
    fn test_cancelled_load_is_discarded() {
        let mut state = BuilderState::default();
        let ticket = state.begin_load("resume-1");
        state.cancel_pending_load();
        assert_eq!(state.load_status(), &LoadStatus::Local);

        let outcome = state.finish_load(ticket, Ok(stored("resume-1", 1)));
        assert!(matches!(outcome, LoadOutcome::Stale));
        assert!(state.resume().experiences.is_empty());
    }

    #[test]
    fn test_failed_load_keeps_local_document() {
        let mut state = BuilderState::default();
        let before = state.snapshot();
        let ticket = state.begin_load("resume-404");
        let outcome = state.finish_load(
            ticket,
            Err(GatewayError::NotFound("resume-404".to_string())),
        );

        assert!(matches!(outcome, LoadOutcome::Failed(GatewayError::NotFound(_))));
        assert!(Arc::ptr_eq(&before, &state.snapshot()));
        assert_eq!(state.load_status(), &LoadStatus::NotLoaded("resume-404".to_string()));
    }

    #[test]
    fn test_save_keeps_edits_made_while_in_flight() {
        let mut state = BuilderState::default();
        let (ticket, request) = state.begin_save().unwrap();
        assert!(request.id.is_none());

        state.update_personal(&PersonalPatch {
            email: Some("ada@example.com".to_string()),
            ..PersonalPatch::default()
        });

        let outcome = state.finish_save(ticket, Ok(stored("resume-7", 0)));
        assert!(matches!(outcome, SaveOutcome::Applied));
        assert_eq!(state.resume().id.as_deref(), Some("resume-7"));
        assert!(state.resume().last_edited.is_some());
        assert_eq!(state.resume().email, "ada@example.com");
        assert!(state.resume().experiences.is_empty());

        let (_, request) = state.begin_save().unwrap();
        assert_eq!(request.id.as_deref(), Some("resume-7"));
    }

    #[test]
    fn test_failed_save_leaves_state_unchanged() {
        let mut state = BuilderState::default();
        let revision = state.revision();
        let (ticket, _) = state.begin_save().unwrap();
        let outcome = state.finish_save(
            ticket,
            Err(GatewayError::Api {
                status: 500,
                message: "boom".to_string(),
            }),
        );
        assert!(matches!(outcome, SaveOutcome::Failed(_)));
        assert_eq!(state.revision(), revision);
        assert!(state.resume().id.is_none());
    }

    #[test]
    fn test_save_response_for_replaced_document_is_discarded() {
        let mut state = BuilderState::default();
        let (save_ticket, _) = state.begin_save().unwrap();

        let load_ticket = state.begin_load("resume-2");
        state.finish_load(load_ticket, Ok(stored("resume-2", 0)));

        let outcome = state.finish_save(save_ticket, Ok(stored("resume-1", 0)));
        assert!(matches!(outcome, SaveOutcome::Stale));
        assert_eq!(state.resume().id.as_deref(), Some("resume-2"));
    }

    #[test]
    fn test_second_create_waits_for_first() {
        let mut state = BuilderState::default();
        let (first, request) = state.begin_save().unwrap();
        assert!(request.id.is_none());
        assert!(state.begin_save().is_none());

        let outcome = state.finish_save(first, Ok(stored("resume-1", 0)));
        assert!(matches!(outcome, SaveOutcome::Applied));

        let (_, request) = state.begin_save().unwrap();
        assert_eq!(request.id.as_deref(), Some("resume-1"));
    }

    #[test]
    fn test_failed_create_allows_retry() {
        let mut state = BuilderState::default();
        let (ticket, _) = state.begin_save().unwrap();
        state.finish_save(
            ticket,
            Err(GatewayError::Api {
                status: 503,
                message: "unavailable".to_string(),
            }),
        );
        let (_, request) = state.begin_save().unwrap();
        assert!(request.id.is_none());
    }

    #[test]
    fn test_updates_may_overlap() {
        let mut state = BuilderState::new(stored("resume-3", 0).into_resume());
        let first = state.begin_save();
        let second = state.begin_save();
        assert!(first.is_some());
        assert!(second.is_some());
    }
}
