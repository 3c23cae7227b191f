//! ferry-cli - Command-line interface for the ferry sync tool
//!
//! This crate provides the main CLI application for ferry, including:
//! - Idempotent directory-to-bucket synchronization
//! - Dry-run planning of what a sync would upload
//! - Cloud storage support (S3, GCS, Azure) with env-based credentials
//! - Line-oriented progress and summary reporting

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cloud_handler;
mod report;

use ferry_core::config::Config;
use ferry_core::{sync_directory, SyncOptions};

/// ferry - upload a directory to an object storage bucket
///
/// Ferry synchronizes a flat local directory with a bucket prefix:
/// files whose derived remote key already exists are skipped, the rest
/// are uploaded sequentially. Re-running converges without uploading
/// anything twice.
#[derive(Parser)]
#[command(name = "ferry")]
#[command(author, version, about = "Idempotent directory-to-bucket synchronization", long_about = None)]
struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show progress bar during operations
    #[arg(long, global = true)]
    progress: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload missing files from a directory to a bucket
    Sync {
        /// Source directory to synchronize (non-recursive)
        source: PathBuf,

        /// Destination bucket URL (s3://, gs://, az://)
        bucket: String,

        /// Remote key prefix prepended to every file name
        #[arg(long)]
        prefix: Option<String>,

        /// Cache-control directive attached to uploaded objects
        #[arg(long)]
        cache_control: Option<String>,

        /// Emit a progress line every N processed items
        #[arg(long)]
        interval: Option<usize>,

        /// Exit non-zero if any item fails to upload
        #[arg(long)]
        fail_on_errors: bool,
    },

    /// Show which files would be uploaded, without transferring anything
    Plan {
        /// Source directory to inspect (non-recursive)
        source: PathBuf,

        /// Destination bucket URL (s3://, gs://, az://)
        bucket: String,

        /// Remote key prefix prepended to every file name
        #[arg(long)]
        prefix: Option<String>,

        /// Output the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long, conflicts_with_all = ["edit", "path"])]
        show: bool,

        /// Edit configuration file
        #[arg(long, conflicts_with_all = ["show", "path"])]
        edit: bool,

        /// Show configuration file path
        #[arg(long, conflicts_with_all = ["show", "edit"])]
        path: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let result = run();

    match result {
        Ok(_) => process::exit(0),
        Err(e) => {
            error!("Error: {}", e);

            let exit_code = map_error_to_exit_code(&e);
            process::exit(exit_code);
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Sync {
            source,
            bucket,
            prefix,
            cache_control,
            interval,
            fail_on_errors,
        } => {
            let config = Config::load_or_default();
            let store = open_bucket(&source, &bucket)?;

            let options = SyncOptions {
                prefix: prefix.unwrap_or(config.sync.prefix),
                cache_control: cache_control.or(config.sync.cache_control),
                report_interval: interval.unwrap_or(config.sync.report_interval),
                dry_run: false,
            };

            info!(
                "Syncing {} to {} under '{}'",
                source.display(),
                cloud_handler::describe_cloud_location(&bucket),
                options.prefix
            );

            let reporter = report::ConsoleReporter::new(cli.quiet, cli.progress);
            let stats = sync_directory(&store, &source, &options, &reporter)?;

            info!(
                "Sync complete: {} uploaded, {} skipped, {} errors",
                stats.uploaded, stats.skipped, stats.errors
            );

            // Accurate counts are the default contract; failing the
            // process on item errors is opt-in.
            if fail_on_errors && stats.errors > 0 {
                return Err(ferry_core::Error::PartialFailure {
                    count: stats.errors,
                }
                .into());
            }
        }

        Commands::Plan {
            source,
            bucket,
            prefix,
            json,
        } => {
            let config = Config::load_or_default();
            let store = open_bucket(&source, &bucket)?;

            let options = SyncOptions {
                prefix: prefix.unwrap_or(config.sync.prefix),
                cache_control: None,
                report_interval: 0,
                dry_run: true,
            };

            info!(
                "Planning sync of {} to {}",
                source.display(),
                cloud_handler::describe_cloud_location(&bucket)
            );

            let reporter = report::PlanReporter::new(&options.prefix, json);
            sync_directory(&store, &source, &options, &reporter)?;
        }

        Commands::Config { show, edit, path } => {
            if show {
                match Config::load() {
                    Ok(config) => {
                        let toml_str = toml::to_string_pretty(&config)?;
                        println!("{}", toml_str);
                    }
                    Err(e) => {
                        error!("Failed to load configuration: {}", e);
                        return Err(e.into());
                    }
                }
            } else if edit {
                let config_path = Config::config_path()
                    .map_err(|e| anyhow::anyhow!("Failed to get config path: {}", e))?;

                // Ensure config exists
                if !config_path.exists() {
                    info!("Creating default configuration file...");
                    Config::default()
                        .save()
                        .map_err(|e| anyhow::anyhow!("Failed to save default config: {}", e))?;
                }

                let editor = std::env::var("EDITOR").unwrap_or_else(|_| {
                    if cfg!(windows) {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

                info!("Opening configuration file in {}", editor);
                std::process::Command::new(&editor)
                    .arg(&config_path)
                    .status()
                    .map_err(|e| anyhow::anyhow!("Failed to open editor: {}", e))?;
            } else if path {
                let config_path = Config::config_path()
                    .map_err(|e| anyhow::anyhow!("Failed to get config path: {}", e))?;
                println!("{}", config_path.display());
            } else {
                eprintln!("Please specify --show, --edit, or --path");
            }
        }
    }

    Ok(())
}

/// Validate the source and bucket arguments and open the bucket.
///
/// Credentials are checked before any network call so a misconfigured
/// environment fails fast with a clear message.
fn open_bucket(source: &PathBuf, bucket: &str) -> Result<cloud_handler::BucketStore> {
    if !source.is_dir() {
        return Err(ferry_core::Error::InvalidPath(format!(
            "Source must be a directory: {}",
            source.display()
        ))
        .into());
    }

    if !cloud_handler::is_cloud_path(bucket) {
        return Err(ferry_core::Error::InvalidPath(format!(
            "Not a cloud URL: {} (expected s3://, gs://, or az://)",
            bucket
        ))
        .into());
    }

    cloud_handler::check_cloud_credentials(bucket)?;
    cloud_handler::BucketStore::open(bucket)
}

/// Map errors to exit codes according to requirements:
/// - 0: Success
/// - 1: General error
/// - 2: IO / enumeration error
/// - 3: Invalid arguments or paths
/// - 4: Partial failure
fn map_error_to_exit_code(err: &anyhow::Error) -> i32 {
    if let Some(core_err) = err.downcast_ref::<ferry_core::Error>() {
        match core_err {
            ferry_core::Error::Io(_) => 2,
            ferry_core::Error::Enumeration(_) => 2,
            ferry_core::Error::InvalidPath(_) => 3,
            ferry_core::Error::Config(_) => 1,
            ferry_core::Error::Upload { .. } => 4,
            ferry_core::Error::Storage(_) => 4,
            ferry_core::Error::PartialFailure { .. } => 4,
            ferry_core::Error::Other(_) => 1,
        }
    } else if err.is::<std::io::Error>() {
        2
    } else if err.to_string().contains("argument") || err.to_string().contains("invalid") {
        3
    } else {
        1
    }
}
