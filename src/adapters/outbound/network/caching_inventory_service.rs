use crate::ports::outbound::InventoryService;
use crate::sbom_upload::domain::{
    NewProject, ProcessingStatus, ProjectId, ProjectProperty, ProjectRef, UploadToken,
};
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Cache key for resolved projects
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    name: String,
    version: String,
}

impl CacheKey {
    fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
        }
    }
}

/// CachingInventoryService wraps an InventoryService and remembers
/// resolved projects for the lifetime of one run.
///
/// Only positive results are cached: a lookup that finds nothing is
/// always forwarded, so a project created by someone else is picked up.
/// Properties, uploads and status queries pass straight through.
pub struct CachingInventoryService<S: InventoryService> {
    inner: S,
    cache: Arc<DashMap<CacheKey, ProjectRef>>,
}

impl<S: InventoryService> CachingInventoryService<S> {
    /// Creates a new caching service wrapping the given inner service
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<S: InventoryService> InventoryService for CachingInventoryService<S> {
    async fn lookup_project(&self, name: &str, version: &str) -> Result<Option<ProjectRef>> {
        let key = CacheKey::new(name, version);

        if let Some(cached) = self.cache.get(&key) {
            return Ok(Some(cached.clone()));
        }

        let found = self.inner.lookup_project(name, version).await?;
        if let Some(project) = &found {
            self.cache.insert(key, project.clone());
        }

        Ok(found)
    }

    async fn create_project(&self, project: &NewProject) -> Result<ProjectRef> {
        let created = self.inner.create_project(project).await?;
        self.cache.insert(
            CacheKey::new(&project.name, &project.version),
            created.clone(),
        );
        Ok(created)
    }

    async fn set_project_property(
        &self,
        project: &ProjectId,
        property: &ProjectProperty,
    ) -> Result<()> {
        self.inner.set_project_property(project, property).await
    }

    async fn upload_artifact(&self, project: &ProjectId, bom: &[u8]) -> Result<UploadToken> {
        self.inner.upload_artifact(project, bom).await
    }

    async fn processing_status(&self, token: &UploadToken) -> Result<ProcessingStatus> {
        self.inner.processing_status(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_upload::domain::Classifier;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    /// Mock service that tracks call counts and knows one project
    struct MockInventoryService {
        lookup_count: AtomicUsize,
        known: ProjectRef,
    }

    impl MockInventoryService {
        fn new() -> Self {
            Self {
                lookup_count: AtomicUsize::new(0),
                known: ProjectRef {
                    id: ProjectId::new(Uuid::new_v4()),
                    name: "host".to_string(),
                    version: "latest".to_string(),
                },
            }
        }

        fn get_lookup_count(&self) -> usize {
            self.lookup_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl InventoryService for MockInventoryService {
        async fn lookup_project(&self, name: &str, version: &str) -> Result<Option<ProjectRef>> {
            self.lookup_count.fetch_add(1, Ordering::SeqCst);
            Ok((name == self.known.name && version == self.known.version)
                .then(|| self.known.clone()))
        }

        async fn create_project(&self, project: &NewProject) -> Result<ProjectRef> {
            Ok(ProjectRef {
                id: ProjectId::new(Uuid::new_v4()),
                name: project.name.clone(),
                version: project.version.clone(),
            })
        }

        async fn set_project_property(&self, _: &ProjectId, _: &ProjectProperty) -> Result<()> {
            Ok(())
        }

        async fn upload_artifact(&self, _: &ProjectId, _: &[u8]) -> Result<UploadToken> {
            Ok(UploadToken::new(Uuid::new_v4()))
        }

        async fn processing_status(&self, _: &UploadToken) -> Result<ProcessingStatus> {
            Ok(ProcessingStatus { processing: false })
        }
    }

    #[tokio::test]
    async fn test_found_project_is_cached() {
        let service = CachingInventoryService::new(MockInventoryService::new());

        let first = service.lookup_project("host", "latest").await.unwrap();
        let second = service.lookup_project("host", "latest").await.unwrap();

        assert_eq!(first, second);
        assert!(first.is_some());
        assert_eq!(service.inner.get_lookup_count(), 1);
        assert_eq!(service.cache_size(), 1);
    }

    #[tokio::test]
    async fn test_missing_project_is_not_cached() {
        let service = CachingInventoryService::new(MockInventoryService::new());

        assert!(service.lookup_project("other", "1").await.unwrap().is_none());
        assert!(service.lookup_project("other", "1").await.unwrap().is_none());

        assert_eq!(service.inner.get_lookup_count(), 2);
        assert_eq!(service.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_created_project_answers_later_lookups() {
        let service = CachingInventoryService::new(MockInventoryService::new());
        let created = service
            .create_project(&NewProject {
                name: "host - applications".to_string(),
                version: "2025-12-13-1654".to_string(),
                classifier: Classifier::Application,
                description: String::new(),
                parent: None,
            })
            .await
            .unwrap();

        let found = service
            .lookup_project("host - applications", "2025-12-13-1654")
            .await
            .unwrap();

        assert_eq!(found, Some(created));
        assert_eq!(service.inner.get_lookup_count(), 0);
    }

    #[test]
    fn test_cache_key_equality() {
        assert_eq!(CacheKey::new("host", "latest"), CacheKey::new("host", "latest"));
        assert_ne!(CacheKey::new("host", "latest"), CacheKey::new("host", "1"));
    }
}
