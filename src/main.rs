use sbom_uploader::adapters::outbound::console::StderrProgressReporter;
use sbom_uploader::adapters::outbound::filesystem::FileSystemScanRepository;
use sbom_uploader::adapters::outbound::network::{CachingInventoryService, DependencyTrackClient};
use sbom_uploader::application::dto::{RunReport, UploadRequest};
use sbom_uploader::application::use_cases::UploadScansUseCase;
use sbom_uploader::cli::Args;
use sbom_uploader::config::{self, ConfigFile, Settings};
use sbom_uploader::logging::init_tracing;
use sbom_uploader::ports::inbound::UploadScansPort;
use sbom_uploader::shared::error::ExitCode;
use sbom_uploader::shared::Result;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => process::exit(argument_error(e).as_i32()),
    };

    let code = tokio::select! {
        result = run(args) => match result {
            Ok(()) => ExitCode::Success,
            Err(e) => {
                eprintln!("\n❌ An error occurred:\n");
                eprintln!("{}", e);

                // Display error chain
                for cause in e.chain().skip(1) {
                    eprintln!("\nCaused by: {}", cause);
                }

                eprintln!();
                ExitCode::Fatal
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\n\n⚠️  Upload cancelled by user");
            ExitCode::Fatal
        }
    };

    process::exit(code.as_i32());
}

/// Prints a clap error; help and version requests are not failures
fn argument_error(e: clap::Error) -> ExitCode {
    let code = if e.use_stderr() {
        ExitCode::InvalidArguments
    } else {
        ExitCode::Success
    };
    if let Err(io_error) = e.print() {
        eprintln!("{}", io_error);
    }
    code
}

async fn run(args: Args) -> Result<()> {
    // Load configuration: explicit path, else auto-discovered file
    let file = load_config_file(args.config.as_deref())?;
    let settings = config::resolve(&args.overrides(), file, |name| std::env::var(name).ok())?;

    init_tracing(&settings.log_level, settings.log_format)?;
    tracing::debug!(
        url = %settings.dependency_track_url,
        scans_dir = %settings.scans_dir.display(),
        "configuration resolved"
    );

    print_header(&settings);

    // Create adapters (Dependency Injection)
    let client = DependencyTrackClient::new(&settings.dependency_track_url, &settings.api_key)?;
    let use_case = UploadScansUseCase::new(
        FileSystemScanRepository::new(),
        CachingInventoryService::new(client),
        StderrProgressReporter::new(),
    );

    let request = UploadRequest::new(&settings.scans_dir)
        .with_retention_days(settings.retention_days)
        .with_poll_policy(settings.poll_policy)
        .with_frontend_url(&settings.frontend_url);

    let report = use_case.upload_scans(request).await?;
    print_summary(&report);

    Ok(())
}

fn load_config_file(explicit: Option<&Path>) -> Result<Option<ConfigFile>> {
    match explicit {
        Some(path) => Ok(Some(config::load_config_from_path(path)?)),
        None => config::discover_config(Path::new(".")),
    }
}

fn print_header(settings: &Settings) {
    let rule = "=".repeat(60);
    eprintln!("{}", rule);
    eprintln!("Dependency-Track SBOM Upload (Hierarchical)");
    eprintln!("{}", rule);
    eprintln!("Server: {}", settings.dependency_track_url);
    eprintln!("Scans directory: {}", settings.scans_dir.display());
    eprintln!();
}

fn print_summary(report: &RunReport) {
    eprintln!();
    eprintln!(
        "🏁 Done: {} host(s), {} upload(s), {} file(s) archived, {} expired file(s) removed",
        report.hosts.len(),
        report.total_uploads(),
        report.archive.archived.len(),
        report.archive.removed.len()
    );
    if report.abandoned_hosts() > 0 {
        eprintln!(
            "⚠️  {} host(s) could not be processed; see messages above",
            report.abandoned_hosts()
        );
    }
}
