//! Persistence boundary. The builder never talks to the backend except through
//! a `PersistenceGateway`; the session holds no connection of its own.

use async_trait::async_trait;

use crate::errors::GatewayError;
use crate::models::resume::{SaveRequest, StoredResume};

pub mod http;

pub use http::HttpGateway;

/// Load/save contract of the resume backend.
///
/// Swap implementations (HTTP, in-memory fakes) without touching session code.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// All stored resumes, in the order the backend returns them.
    async fn list(&self) -> Result<Vec<StoredResume>, GatewayError>;

    async fn load(&self, id: &str) -> Result<StoredResume, GatewayError>;

    /// Creates when `request.id` is `None`, otherwise updates. Returns the
    /// canonical stored copy with server-assigned id and timestamp.
    async fn save(&self, request: &SaveRequest) -> Result<StoredResume, GatewayError>;

    async fn delete(&self, id: &str) -> Result<(), GatewayError>;
}
