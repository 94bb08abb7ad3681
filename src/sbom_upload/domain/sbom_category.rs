use super::Classifier;
use std::fmt;

/// SBOM category produced by one scanner family on the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SbomCategory {
    PackageManagers,
    Applications,
    IdeExtensions,
    BrowserExtensions,
}

impl SbomCategory {
    /// Key as it appears in file names and child project names
    pub fn key(&self) -> &'static str {
        match self {
            SbomCategory::PackageManagers => "package-managers",
            SbomCategory::Applications => "applications",
            SbomCategory::IdeExtensions => "ide-extensions",
            SbomCategory::BrowserExtensions => "browser-extensions",
        }
    }

    pub fn classifier(&self) -> Classifier {
        match self {
            SbomCategory::Applications => Classifier::Application,
            SbomCategory::PackageManagers
            | SbomCategory::IdeExtensions
            | SbomCategory::BrowserExtensions => Classifier::Library,
        }
    }

    pub fn base_description(&self) -> &'static str {
        match self {
            SbomCategory::PackageManagers => {
                "Dependencies from package managers (npm, pip, etc.)"
            }
            SbomCategory::Applications => "Installed desktop applications",
            SbomCategory::IdeExtensions => "IDE extensions and MCP servers",
            SbomCategory::BrowserExtensions => "Browser extensions and plugins",
        }
    }
}

impl fmt::Display for SbomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
