mod error;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use blogmill_assets::fetch::HttpFetcher;
use blogmill_assets::store::LocalStore;
use blogmill_config::{Config, OnFetchError, OutputOverrides, Overrides, RewriteOverrides};
use blogmill_library::RunReport;
use clap::{ArgAction, Parser};
use exn::ResultExt;
use tracing_subscriber::EnvFilter;

use crate::error::{ErrorKind, Result};

/// Convert a Blogger export into JSON post documents, caching every
/// referenced image locally.
#[derive(Debug, Parser)]
#[command(name = "blogmill", version, about)]
struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Blogger export document to read
    #[arg(long)]
    export: Option<PathBuf>,

    /// Directory for summary.json and posts/
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory for cached images
    #[arg(long)]
    images: Option<PathBuf>,

    /// Keep the remote source of images that cannot be downloaded instead of
    /// aborting
    #[arg(long)]
    skip_failed_images: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}
impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            export: self.export.clone(),
            output: OutputOverrides {
                data_dir: self.output.clone(),
                image_dir: self.images.clone(),
            },
            rewrite: RewriteOverrides {
                on_fetch_error: self.skip_failed_images.then_some(OnFetchError::Skip),
            },
        }
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn execute(cli: &Cli) -> Result<RunReport> {
    let config = Config::load(cli.config.as_deref(), &cli.overrides()).or_raise(|| ErrorKind::Config)?;
    let image_dir = std::path::absolute(&config.output.image_dir).or_raise(|| ErrorKind::Setup)?;
    let store = LocalStore::new("images", image_dir).or_raise(|| ErrorKind::Setup)?;
    let fetcher = HttpFetcher::new().or_raise(|| ErrorKind::Setup)?;
    blogmill_library::run(&config, Arc::new(store), Arc::new(fetcher)).or_raise(|| ErrorKind::Run)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())))
        .with_writer(std::io::stderr)
        .init();

    match execute(&cli) {
        Ok(report) => {
            println!(
                "{} posts written, {} images fetched, {} reused",
                report.written, report.rewrite.images_fetched, report.rewrite.images_reused
            );
            ExitCode::SUCCESS
        },
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}
