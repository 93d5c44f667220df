//! k2merge: CLI tool for inlining Clash rule-providers into literal rules.

use clap::{Args, Parser, Subcommand};
use k2merge::{merge_document, process_files, FileStatus, Settings};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "k2merge")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Inline Clash rule-providers into literal rules", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge config files, writing <name>_merge.yaml next to each
    Merge {
        /// Config files to process (defaults to the settings file list)
        files: Vec<PathBuf>,

        #[command(flatten)]
        fetch: FetchArgs,

        /// Write a JSON run report
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print the merged rules of one config without writing anything
    Preview {
        /// Config file to merge
        input: PathBuf,

        #[command(flatten)]
        fetch: FetchArgs,
    },
}

#[derive(Args)]
struct FetchArgs {
    /// Settings file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prefix prepended to every provider URL
    #[arg(long)]
    url_prefix: Option<String>,

    /// Download timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl FetchArgs {
    fn settings(&self) -> k2merge::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(prefix) = &self.url_prefix {
            settings.url_prefix = prefix.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Merge {
            files,
            fetch,
            report,
        } => merge(files, &fetch, report),
        Commands::Preview { input, fetch } => preview(&input, &fetch),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn merge(
    files: Vec<PathBuf>,
    fetch: &FetchArgs,
    report_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = fetch.settings()?;
    if !files.is_empty() {
        settings.files = files;
    }

    let merger = settings.merger()?;
    let report = process_files(&merger, &settings.files);

    println!(
        "Processed {} files: {} written, {} skipped, {} failed ({} rules)",
        report.files.len(),
        report.count(FileStatus::Written),
        report.count(FileStatus::Skipped),
        report.count(FileStatus::Failed),
        report.total_rules()
    );

    if let Some(path) = report_path {
        report.save(&path)?;
        println!("Report written to {:?}", path);
    }
    Ok(())
}

fn preview(input: &Path, fetch: &FetchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = fetch.settings()?;
    let merger = settings.merger()?;

    let text = fs::read_to_string(input)?;
    match merge_document(&merger, &text)? {
        Some(document) => {
            for rule in &document.output.rules {
                println!("{}", rule);
            }
            log::info!("{} rules, {:?}", document.output.rules.len(), document.output.stats);
        }
        None => {
            log::warn!("No rule-providers or rules found in {:?}", input);
        }
    }
    Ok(())
}
