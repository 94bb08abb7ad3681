use crate::sbom_upload::domain::scan_file::file_name_of;
use crate::sbom_upload::domain::{is_artifact_name, ScanFile, ScanTimestamp, ARTIFACT_SUFFIX};
use crate::sbom_upload::policies::CategoryTable;
use std::path::{Path, PathBuf};

/// Result of choosing the files of the most recent scan run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Files sharing the single most recent timestamp, sorted by file name
    pub files: Vec<ScanFile>,
    /// Artifacts skipped because no segment of their name is a timestamp
    pub skipped: Vec<PathBuf>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Timestamp shared by every selected file
    pub fn timestamp(&self) -> Option<ScanTimestamp> {
        self.files.first().map(ScanFile::timestamp)
    }
}

/// ScanFileSelector service for picking the latest scan run
///
/// Pure logic over file paths; listing the directory is the caller's job.
pub struct ScanFileSelector;

impl ScanFileSelector {
    /// Extracts the embedded timestamp of an artifact file name.
    ///
    /// The stem (name without `.cdx.json`) is split on `.` and the first
    /// segment with the timestamp shape is authoritative, wherever it sits.
    /// An impossible date in that segment makes the whole name unparseable.
    pub fn timestamp_of(file_name: &str) -> Option<ScanTimestamp> {
        let stem = file_name.strip_suffix(ARTIFACT_SUFFIX)?;
        let token = stem.split('.').find(|s| ScanTimestamp::has_token_shape(s))?;
        ScanTimestamp::parse_filename_token(token)
    }

    /// Selects every artifact whose timestamp equals the maximum.
    ///
    /// Paths that do not follow the artifact naming convention are ignored;
    /// artifacts without a timestamp segment end up in `skipped`.
    pub fn select_most_recent<I>(paths: I) -> Selection
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut skipped = Vec::new();
        let mut candidates = Vec::new();

        for path in paths {
            let name = file_name_of(&path);
            if !is_artifact_name(&name) {
                continue;
            }
            match Self::timestamp_of(&name) {
                Some(timestamp) => candidates.push((path, timestamp)),
                None => skipped.push(path),
            }
        }

        let Some(latest) = candidates.iter().map(|(_, ts)| *ts).max() else {
            skipped.sort();
            return Selection {
                files: Vec::new(),
                skipped,
            };
        };

        let mut files: Vec<ScanFile> = candidates
            .into_iter()
            .filter(|(_, ts)| *ts == latest)
            .map(|(path, ts)| {
                let category = CategoryTable::detect(&file_name_of(&path));
                ScanFile::new(path, ts, category)
            })
            .collect();

        files.sort_by_key(ScanFile::file_name);
        skipped.sort();

        Selection { files, skipped }
    }

    /// Convenience for logging: the file name part of a skipped path
    pub fn display_name(path: &Path) -> String {
        file_name_of(path)
    }
}
