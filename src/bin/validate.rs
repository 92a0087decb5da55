use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crosscheck::document::Document;
use crosscheck::print::tabulate_report;
use crosscheck::report::Report;
use crosscheck::validate::validate_document;

/// The write-up shipped with the crate, located independently of the working directory.
const DEFAULT_DOCUMENT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/homework.tex");

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// LaTeX write-up to validate [default: data/homework.tex in the crate directory]
    document: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if let Some(path) = &self.document {
            if path.is_dir() {
                bail!("{} is a directory", path.display());
            }
        }
        Ok(())
    }

    fn document_path(&self) -> PathBuf {
        self.document
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENT))
    }
}

fn main() -> anyhow::Result<ExitCode> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let path = args.document_path();
    let document = Document::read(&path)?;
    info!("validating {} ({} bytes)", path.display(), document.text.len());

    let report = Report::new(validate_document(&document)?);
    for line in report.lines() {
        println!("{line}");
    }
    println!("\n{}", Console::default().render(&tabulate_report(&report)));
    println!("{}", report.verdict());
    info!("{} of {} checks failed", report.failures(), report.results.len());
    Ok(ExitCode::from(report.exit_status()))
}
