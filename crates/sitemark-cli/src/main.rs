//! sitemark - build a static site from Markdown-subset documents
//!
//! Usage:
//!   sitemark [-v|-vv] <COMMAND>
//!
//! Commands:
//!   build   Convert the content tree into an HTML site
//!   page    Convert a single document
//!   check   Validate documents without writing output
//!   blocks  Show how a document is split into blocks

mod config;
mod report;
mod site;
mod template;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sitemark_core::block::segment_blocks;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{normalize_base_path, SiteConfig};
use crate::report::{BlockReport, CheckReport, ErrorReport};
use crate::site::Site;
use crate::template::{rewrite_base_path, Template};

#[derive(Parser)]
#[command(name = "sitemark")]
#[command(about = "Static site generator for a small Markdown subset")]
#[command(version)]
struct Cli {
    /// Increase log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert the content tree into an HTML site
    Build(BuildArgs),
    /// Convert a single document
    Page {
        file: PathBuf,
        /// Wrap the content in this template
        #[arg(short, long)]
        template: Option<PathBuf>,
        #[arg(long, default_value = "/")]
        base_path: String,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate documents without writing output
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(short, long)]
        json: bool,
    },
    /// Show how a document is split into blocks
    Blocks {
        file: PathBuf,
        #[arg(short, long)]
        json: bool,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Site config file
    #[arg(short, long, default_value = SiteConfig::DEFAULT_FILE)]
    config: PathBuf,
    #[arg(long)]
    content: Option<PathBuf>,
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long = "static")]
    static_dir: Option<PathBuf>,
    #[arg(long)]
    template: Option<PathBuf>,
    #[arg(long)]
    base_path: Option<String>,
    /// Skip documents that fail to convert instead of stopping
    #[arg(long)]
    keep_going: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run a command; `Ok(false)` means it finished but found problems.
fn run(command: Command) -> Result<bool> {
    match command {
        Command::Build(args) => cmd_build(args),
        Command::Page {
            file,
            template,
            base_path,
            output,
        } => cmd_page(&file, template.as_deref(), &base_path, output.as_deref()),
        Command::Check { files, json } => cmd_check(&files, json),
        Command::Blocks { file, json } => cmd_blocks(&file, json),
    }
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

// =============================================================================
// Build Command
// =============================================================================

fn cmd_build(args: BuildArgs) -> Result<bool> {
    let mut config = match SiteConfig::load_from_path(&args.config)? {
        Some(config) => {
            info!(path = %args.config.display(), "loaded site config");
            config
        }
        None => {
            debug!(path = %args.config.display(), "no site config, using defaults");
            SiteConfig::default()
        }
    };
    if let Some(content) = args.content {
        config.content_dir = content;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if let Some(static_dir) = args.static_dir {
        config.static_dir = static_dir;
    }
    if let Some(template) = args.template {
        config.template = template;
    }
    if let Some(base_path) = args.base_path {
        config.base_path = normalize_base_path(&base_path);
    }

    let site = Site::new(config).keep_going(args.keep_going);
    let report = site.build()?;

    println!(
        "Built {} page(s) into {} ({} static file(s) copied)",
        report.pages.len(),
        site.config().output_dir.display(),
        report.static_files
    );
    if !report.is_success() {
        eprintln!("{} page(s) failed:", report.failures.len());
        for failure in &report.failures {
            eprintln!("  - {}: {}", failure.path.display(), failure.message);
        }
    }
    Ok(report.is_success())
}

// =============================================================================
// Page Command
// =============================================================================

fn cmd_page(
    file: &Path,
    template: Option<&Path>,
    base_path: &str,
    output: Option<&Path>,
) -> Result<bool> {
    let source = read_document(file)?;
    let base_path = normalize_base_path(base_path);

    let html = match template {
        Some(template_path) => {
            let template = Template::load(template_path)?;
            site::generate_page(&source, &template, &base_path)
        }
        None => sitemark_core::to_html(&source).map(|html| rewrite_base_path(&html, &base_path)),
    }
    .with_context(|| format!("failed to convert '{}'", file.display()))?;

    match output {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("failed to write '{}'", path.display()))?
        }
        None => println!("{}", html),
    }
    Ok(true)
}

// =============================================================================
// Check Command
// =============================================================================

fn cmd_check(files: &[PathBuf], json: bool) -> Result<bool> {
    let mut sources = Vec::with_capacity(files.len());
    for file in files {
        sources.push(read_document(file)?);
    }

    let paths: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
    let reports: Vec<CheckReport<'_>> = paths
        .iter()
        .zip(&sources)
        .map(|(path, source)| check_document(path, source))
        .collect();
    let failed = reports.iter().filter(|r| !r.valid).count();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            match (&report.error, report.title) {
                (Some(error), _) => eprintln!("{}: {}", report.path, error.message),
                (None, Some(title)) => println!("{}: ok ({})", report.path, title),
                (None, None) => println!("{}: ok", report.path),
            }
        }
        if failed > 0 {
            eprintln!("{} of {} document(s) failed", failed, reports.len());
        }
    }
    Ok(failed == 0)
}

fn check_document<'a>(path: &'a str, source: &'a str) -> CheckReport<'a> {
    let result = sitemark_core::build(source).and_then(|_| sitemark_core::extract_title(source));
    match result {
        Ok(title) => CheckReport {
            path,
            valid: true,
            title: Some(title),
            error: None,
        },
        Err(err) => CheckReport {
            path,
            valid: false,
            title: None,
            error: Some(ErrorReport::from(&err)),
        },
    }
}

// =============================================================================
// Blocks Command
// =============================================================================

fn cmd_blocks(file: &Path, json: bool) -> Result<bool> {
    let source = read_document(file)?;
    let reports: Vec<BlockReport<'_>> = segment_blocks(&source)
        .iter()
        .enumerate()
        .map(|(index, block)| BlockReport::new(index, block))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(true);
    }

    println!("{} block(s) in {}", reports.len(), file.display());
    for report in &reports {
        let kind = match report.level {
            Some(level) => format!("{} {}", report.kind, level),
            None => report.kind.to_string(),
        };
        println!(
            "  {:>3}  line {:<5} {:<16} {}",
            report.index + 1,
            report.line,
            kind,
            report.preview
        );
    }
    Ok(true)
}
