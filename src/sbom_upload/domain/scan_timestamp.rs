use chrono::{DateTime, Local, NaiveDateTime};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Length of the `YYYYMMDD-HHMMSS` part of a filename timestamp
const TOKEN_LEN: usize = 15;

const TOKEN_FORMAT: &str = "%Y%m%d-%H%M%S";
const VERSION_FORMAT: &str = "%Y-%m-%d-%H%M";

/// Scan timestamp embedded in an SBOM file name.
///
/// Shape: `YYYYMMDD-HHMMSS`, optionally followed by `-<timezone>`. The
/// timezone suffix is informational only; two tokens naming the same wall
/// clock instant compare equal whether or not they carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScanTimestamp(NaiveDateTime);

impl ScanTimestamp {
    pub fn new(instant: NaiveDateTime) -> Self {
        Self(instant)
    }

    /// Whether a filename segment is shaped like a timestamp:
    /// `YYYYMMDD-HHMMSS`, optionally followed by `-<timezone>`.
    ///
    /// Only the shape is checked, so host names such as `mbp.local` never
    /// pass while `20251340-112345` does.
    pub fn has_token_shape(token: &str) -> bool {
        let bytes = token.as_bytes();
        if bytes.len() < TOKEN_LEN || !token.is_ascii() {
            return false;
        }

        let date_time_shape = bytes[..8].iter().all(u8::is_ascii_digit)
            && bytes[8] == b'-'
            && bytes[9..TOKEN_LEN].iter().all(u8::is_ascii_digit);

        // Anything after the date-time must be a `-<timezone>` suffix
        date_time_shape && (bytes.len() == TOKEN_LEN || bytes[TOKEN_LEN] == b'-')
    }

    /// Parses one dot-separated filename segment.
    ///
    /// Returns `None` when the segment is not timestamp-shaped or names an
    /// impossible calendar date.
    pub fn parse_filename_token(token: &str) -> Option<Self> {
        if !Self::has_token_shape(token) {
            return None;
        }

        NaiveDateTime::parse_from_str(&token[..TOKEN_LEN], TOKEN_FORMAT)
            .ok()
            .map(Self)
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for ScanTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TOKEN_FORMAT))
    }
}

fn iso_prefix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):\d{2}")
            .expect("static regex is valid")
    })
}

/// Converts a BOM `metadata.timestamp` into a project version string
/// (`YYYY-MM-DD-HHMM`).
///
/// Falls back to the current local time when the value cannot be read, so
/// one malformed document never aborts a run.
pub fn format_version(iso_timestamp: &str) -> String {
    format_version_at(iso_timestamp, Local::now().naive_local())
}

/// [`format_version`] with an explicit "now" for the final fallback.
pub fn format_version_at(iso_timestamp: &str, now: NaiveDateTime) -> String {
    let trimmed = iso_timestamp.trim();

    // Offset-aware values keep their own wall-clock time, not UTC.
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.format(VERSION_FORMAT).to_string();
    }

    if let Some(caps) = iso_prefix_pattern().captures(trimmed) {
        return format!(
            "{}-{}-{}-{}{}",
            &caps[1], &caps[2], &caps[3], &caps[4], &caps[5]
        );
    }

    now.format(VERSION_FORMAT).to_string()
}
