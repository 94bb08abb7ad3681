use async_trait::async_trait;
use sbom_uploader::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
struct State {
    projects: Vec<(NewProject, ProjectRef)>,
    properties: HashMap<(ProjectId, String), String>,
    uploads: Vec<(ProjectId, Vec<u8>)>,
    create_calls: usize,
    lookup_calls: usize,
    status_calls: HashMap<UploadToken, u32>,
}

/// In-memory inventory service for testing
///
/// Behaves like a server enforcing (name, version) uniqueness: creating a
/// taken key fails with a conflict.
#[derive(Default, Clone)]
pub struct MockInventoryService {
    state: Arc<Mutex<State>>,
    failing_creates: Arc<HashSet<String>>,
    failing_uploads: Arc<HashSet<String>>,
    failing_properties: Arc<HashSet<String>>,
    polls_until_done: u32,
}

impl MockInventoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creating a project with this name fails with a bad request
    pub fn with_failing_create(mut self, name: &str) -> Self {
        let mut set = (*self.failing_creates).clone();
        set.insert(name.to_string());
        self.failing_creates = Arc::new(set);
        self
    }

    /// Uploading to the project with this name fails
    pub fn with_failing_upload(mut self, project_name: &str) -> Self {
        let mut set = (*self.failing_uploads).clone();
        set.insert(project_name.to_string());
        self.failing_uploads = Arc::new(set);
        self
    }

    /// Setting the property with this name fails
    pub fn with_failing_property(mut self, property_name: &str) -> Self {
        let mut set = (*self.failing_properties).clone();
        set.insert(property_name.to_string());
        self.failing_properties = Arc::new(set);
        self
    }

    /// Status queries report "processing" this many times per token
    pub fn with_polls_until_done(mut self, polls: u32) -> Self {
        self.polls_until_done = polls;
        self
    }

    /// Seeds an existing project
    pub fn with_existing(self, name: &str, version: &str) -> Self {
        let project = ProjectRef {
            id: ProjectId::new(Uuid::new_v4()),
            name: name.to_string(),
            version: version.to_string(),
        };
        let new = NewProject {
            name: name.to_string(),
            version: version.to_string(),
            classifier: Classifier::Device,
            description: String::new(),
            parent: None,
        };
        self.state.lock().unwrap().projects.push((new, project));
        self
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    pub fn lookup_calls(&self) -> usize {
        self.state.lock().unwrap().lookup_calls
    }

    pub fn project_count(&self) -> usize {
        self.state.lock().unwrap().projects.len()
    }

    pub fn upload_count(&self) -> usize {
        self.state.lock().unwrap().uploads.len()
    }

    /// The creation request and resulting reference of a named project
    pub fn project(&self, name: &str) -> Option<(NewProject, ProjectRef)> {
        self.state
            .lock()
            .unwrap()
            .projects
            .iter()
            .find(|(_, r)| r.name == name)
            .cloned()
    }

    pub fn property(&self, project: &ProjectId, name: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .properties
            .get(&(*project, name.to_string()))
            .cloned()
    }

    /// Raw bytes uploaded to a project, in upload order
    pub fn uploads_to(&self, project: &ProjectId) -> Vec<Vec<u8>> {
        self.state
            .lock()
            .unwrap()
            .uploads
            .iter()
            .filter(|(id, _)| id == project)
            .map(|(_, bom)| bom.clone())
            .collect()
    }
}

#[async_trait]
impl InventoryService for MockInventoryService {
    async fn lookup_project(&self, name: &str, version: &str) -> Result<Option<ProjectRef>> {
        let mut state = self.state.lock().unwrap();
        state.lookup_calls += 1;
        Ok(state
            .projects
            .iter()
            .find(|(_, r)| r.name == name && r.version == version)
            .map(|(_, r)| r.clone()))
    }

    async fn create_project(&self, project: &NewProject) -> Result<ProjectRef> {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;

        if self.failing_creates.contains(&project.name) {
            return Err(InventoryError::BadRequest {
                details: format!("cannot create {}", project.name),
            }
            .into());
        }
        if state
            .projects
            .iter()
            .any(|(_, r)| r.name == project.name && r.version == project.version)
        {
            return Err(InventoryError::Conflict {
                details: format!("{} {} exists", project.name, project.version),
            }
            .into());
        }

        let created = ProjectRef {
            id: ProjectId::new(Uuid::new_v4()),
            name: project.name.clone(),
            version: project.version.clone(),
        };
        state.projects.push((project.clone(), created.clone()));
        Ok(created)
    }

    async fn set_project_property(
        &self,
        project: &ProjectId,
        property: &ProjectProperty,
    ) -> Result<()> {
        if self.failing_properties.contains(&property.name) {
            return Err(InventoryError::UnexpectedStatus {
                operation: "project property",
                status: 500,
                body: String::new(),
            }
            .into());
        }
        self.state
            .lock()
            .unwrap()
            .properties
            .insert((*project, property.name.clone()), property.value.clone());
        Ok(())
    }

    async fn upload_artifact(&self, project: &ProjectId, bom: &[u8]) -> Result<UploadToken> {
        let mut state = self.state.lock().unwrap();
        let name = state
            .projects
            .iter()
            .find(|(_, r)| r.id == *project)
            .map(|(_, r)| r.name.clone())
            .unwrap_or_default();
        if self.failing_uploads.contains(&name) {
            return Err(InventoryError::UnexpectedStatus {
                operation: "BOM upload",
                status: 500,
                body: "internal error".to_string(),
            }
            .into());
        }
        state.uploads.push((*project, bom.to_vec()));
        Ok(UploadToken::new(Uuid::new_v4()))
    }

    async fn processing_status(&self, token: &UploadToken) -> Result<ProcessingStatus> {
        let mut state = self.state.lock().unwrap();
        let calls = state.status_calls.entry(*token).or_insert(0);
        *calls += 1;
        Ok(ProcessingStatus {
            processing: *calls <= self.polls_until_done,
        })
    }
}
