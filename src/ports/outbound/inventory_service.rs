use crate::sbom_upload::domain::{
    NewProject, ProcessingStatus, ProjectId, ProjectProperty, ProjectRef, UploadToken,
};
use crate::shared::Result;
use async_trait::async_trait;

/// InventoryService port for the remote SBOM inventory (Dependency-Track)
///
/// Errors carry an [`InventoryError`](crate::shared::error::InventoryError)
/// kind where the service reported one, so callers can tell a conflict
/// from a transport failure.
///
/// Implementations must be `Send + Sync`; the orchestrator still calls them
/// strictly one at a time.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Looks up a project by its (name, version) key
    ///
    /// # Returns
    /// `Ok(None)` when no such project exists
    async fn lookup_project(&self, name: &str, version: &str) -> Result<Option<ProjectRef>>;

    /// Creates a project
    ///
    /// # Errors
    /// `Conflict` when (name, version) is already taken, `BadRequest` when
    /// the service rejects the payload
    async fn create_project(&self, project: &NewProject) -> Result<ProjectRef>;

    /// Creates or overwrites a property on a project
    async fn set_project_property(
        &self,
        project: &ProjectId,
        property: &ProjectProperty,
    ) -> Result<()>;

    /// Uploads a raw SBOM to a project
    ///
    /// # Returns
    /// The token used to follow server-side processing
    async fn upload_artifact(&self, project: &ProjectId, bom: &[u8]) -> Result<UploadToken>;

    /// Queries whether an upload is still being processed
    async fn processing_status(&self, token: &UploadToken) -> Result<ProcessingStatus>;
}
