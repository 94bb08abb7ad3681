use crate::ports::outbound::InventoryService;
use crate::sbom_upload::domain::{
    Classifier, NewProject, ProcessingStatus, ProjectId, ProjectProperty, ProjectRef,
    PropertyType, UploadToken,
};
use crate::shared::error::InventoryError;
use crate::shared::Result;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

const API_KEY_HEADER: &str = "X-Api-Key";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);
const STATUS_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    uuid: Uuid,
    name: String,
    #[serde(default)]
    version: Option<String>,
}

impl From<ProjectResponse> for ProjectRef {
    fn from(response: ProjectResponse) -> Self {
        ProjectRef {
            id: ProjectId::new(response.uuid),
            name: response.name,
            version: response.version.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ParentRef {
    uuid: ProjectId,
}

#[derive(Debug, Serialize)]
struct CreateProjectBody<'a> {
    name: &'a str,
    version: &'a str,
    classifier: Classifier,
    description: &'a str,
    active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<ParentRef>,
}

impl<'a> From<&'a NewProject> for CreateProjectBody<'a> {
    fn from(project: &'a NewProject) -> Self {
        Self {
            name: &project.name,
            version: &project.version,
            classifier: project.classifier,
            description: &project.description,
            active: true,
            parent: project.parent.map(|uuid| ParentRef { uuid }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PropertyBody<'a> {
    group_name: &'a str,
    property_name: &'a str,
    property_value: &'a str,
    property_type: PropertyType,
    description: &'a str,
}

impl<'a> From<&'a ProjectProperty> for PropertyBody<'a> {
    fn from(property: &'a ProjectProperty) -> Self {
        Self {
            group_name: &property.group,
            property_name: &property.name,
            property_value: &property.value,
            property_type: property.property_type,
            description: &property.description,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BomUploadBody {
    project: ProjectId,
    bom: String,
    auto_create: bool,
}

#[derive(Debug, Deserialize)]
struct BomUploadResponse {
    token: UploadToken,
}

/// DependencyTrackClient adapter for the Dependency-Track REST API
///
/// This adapter implements the InventoryService port over the `/api/v1`
/// endpoints, authenticating every request with the `X-Api-Key` header.
/// HTTP failures are mapped onto [`InventoryError`] kinds.
pub struct DependencyTrackClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DependencyTrackClient {
    /// Creates a client for the server at `base_url`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("sbom-uploader/{}", version);
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    fn lookup_url(&self, name: &str, version: &str) -> String {
        self.url(&format!(
            "project/lookup?name={}&version={}",
            urlencoding::encode(name),
            urlencoding::encode(version)
        ))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key)
    }

    async fn send(operation: &'static str, request: RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            InventoryError::Transport {
                operation,
                details: e.to_string(),
            }
            .into()
        })
    }

    async fn read_json<T>(operation: &'static str, response: Response) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        response.json::<T>().await.map_err(|e| {
            InventoryError::InvalidResponse {
                operation,
                details: e.to_string(),
            }
            .into()
        })
    }

    /// Turns a non-success response into an error of the matching kind
    async fn failure(operation: &'static str, response: Response) -> anyhow::Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(operation, status = status.as_u16(), %body, "request rejected");
        status_error(operation, status, body).into()
    }
}

/// Maps an HTTP status to the error kind callers branch on
fn status_error(operation: &'static str, status: StatusCode, body: String) -> InventoryError {
    match status {
        StatusCode::CONFLICT => InventoryError::Conflict { details: body },
        StatusCode::BAD_REQUEST => InventoryError::BadRequest { details: body },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => InventoryError::Unauthorized {
            status: status.as_u16(),
        },
        StatusCode::NOT_FOUND => InventoryError::NotFound { details: body },
        _ => InventoryError::UnexpectedStatus {
            operation,
            status: status.as_u16(),
            body,
        },
    }
}

#[async_trait]
impl InventoryService for DependencyTrackClient {
    async fn lookup_project(&self, name: &str, version: &str) -> Result<Option<ProjectRef>> {
        const OPERATION: &str = "project lookup";
        let url = self.lookup_url(name, version);
        let response = Self::send(OPERATION, self.request(Method::GET, &url)).await?;

        match response.status() {
            StatusCode::OK => {
                let project: ProjectResponse = Self::read_json(OPERATION, response).await?;
                Ok(Some(project.into()))
            }
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(Self::failure(OPERATION, response).await),
        }
    }

    async fn create_project(&self, project: &NewProject) -> Result<ProjectRef> {
        const OPERATION: &str = "project creation";
        let body = CreateProjectBody::from(project);
        let response = Self::send(
            OPERATION,
            self.request(Method::PUT, &self.url("project")).json(&body),
        )
        .await?;

        if !response.status().is_success() {
            return Err(Self::failure(OPERATION, response).await);
        }

        let created: ProjectResponse = Self::read_json(OPERATION, response).await?;
        tracing::debug!(name = %created.name, uuid = %created.uuid, "project created");
        Ok(created.into())
    }

    async fn set_project_property(
        &self,
        project: &ProjectId,
        property: &ProjectProperty,
    ) -> Result<()> {
        const OPERATION: &str = "project property";
        let url = self.url(&format!("project/{}/property", project));
        let body = PropertyBody::from(property);

        let response =
            Self::send(OPERATION, self.request(Method::PUT, &url).json(&body)).await?;
        if response.status().is_success() {
            return Ok(());
        }
        if response.status() != StatusCode::CONFLICT {
            return Err(Self::failure(OPERATION, response).await);
        }

        // Property exists; POST updates it in place
        let response =
            Self::send(OPERATION, self.request(Method::POST, &url).json(&body)).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::failure(OPERATION, response).await)
        }
    }

    async fn upload_artifact(&self, project: &ProjectId, bom: &[u8]) -> Result<UploadToken> {
        const OPERATION: &str = "BOM upload";
        let body = BomUploadBody {
            project: *project,
            bom: STANDARD.encode(bom),
            auto_create: false,
        };
        let response = Self::send(
            OPERATION,
            self.request(Method::PUT, &self.url("bom"))
                .timeout(UPLOAD_TIMEOUT)
                .json(&body),
        )
        .await?;

        if !response.status().is_success() {
            return Err(Self::failure(OPERATION, response).await);
        }

        let uploaded: BomUploadResponse = Self::read_json(OPERATION, response).await?;
        Ok(uploaded.token)
    }

    async fn processing_status(&self, token: &UploadToken) -> Result<ProcessingStatus> {
        const OPERATION: &str = "processing status";
        let url = self.url(&format!("bom/token/{}", token));
        let response = Self::send(
            OPERATION,
            self.request(Method::GET, &url).timeout(STATUS_TIMEOUT),
        )
        .await?;

        if !response.status().is_success() {
            return Err(Self::failure(OPERATION, response).await);
        }

        Self::read_json(OPERATION, response).await
    }
}
