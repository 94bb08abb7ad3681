use clap::Parser;
use std::path::PathBuf;

use crate::config::CliOverrides;

/// Upload endpoint SBOMs to Dependency-Track
#[derive(Parser, Debug)]
#[command(name = "sbom-uploader")]
#[command(version)]
#[command(
    about = "Upload the most recent endpoint SBOM scan to Dependency-Track",
    long_about = "Selects the newest *.cdx.json scan in SCANS_DIR, creates one parent project \
                  per host with a child project per SBOM category, uploads every SBOM, waits \
                  for processing and moves the files to SCANS_DIR/archive.\n\n\
                  The API key is read from DEPENDENCY_TRACK_API_KEY or the config file."
)]
pub struct Args {
    /// Directory holding the *.cdx.json files (defaults to the config file, then ./scans)
    #[arg(value_name = "SCANS_DIR")]
    pub scans_dir: Option<PathBuf>,

    /// Path to a config file (defaults to ./sbom-uploader.config.yml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parses the process arguments, leaving the exit decision to the caller
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            scans_dir: self.scans_dir.clone(),
            verbose: self.verbose,
        }
    }
}
