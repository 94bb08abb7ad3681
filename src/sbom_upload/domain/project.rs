use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Version used for every host-level parent project
pub const PARENT_VERSION: &str = "latest";

/// Project type tag recognised by the inventory service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classifier {
    Application,
    Framework,
    Library,
    Container,
    OperatingSystem,
    Device,
    Firmware,
    File,
}

impl Classifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classifier::Application => "APPLICATION",
            Classifier::Framework => "FRAMEWORK",
            Classifier::Library => "LIBRARY",
            Classifier::Container => "CONTAINER",
            Classifier::OperatingSystem => "OPERATING_SYSTEM",
            Classifier::Device => "DEVICE",
            Classifier::Firmware => "FIRMWARE",
            Classifier::File => "FILE",
        }
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque identifier the inventory service assigns to a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A project resolved on the remote service.
///
/// (name, version) is the key the service enforces uniqueness on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: ProjectId,
    pub name: String,
    pub version: String,
}

/// Everything needed to create a project that does not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub version: String,
    pub classifier: Classifier,
    pub description: String,
    pub parent: Option<ProjectId>,
}

/// Property type; the uploader only writes free-form strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    String,
}

/// Descriptive key/value attached to a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectProperty {
    pub group: String,
    pub name: String,
    pub value: String,
    pub property_type: PropertyType,
    pub description: String,
}

impl ProjectProperty {
    pub fn string(group: &str, name: &str, value: &str, description: &str) -> Self {
        Self {
            group: group.to_string(),
            name: name.to_string(),
            value: value.to_string(),
            property_type: PropertyType::String,
            description: description.to_string(),
        }
    }
}
