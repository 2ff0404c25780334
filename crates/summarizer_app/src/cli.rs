use std::path::PathBuf;

use clap::Parser;
use summarizer_core::ModelKind;

/// Terminal client for a remote summarization service.
#[derive(Debug, Parser)]
#[command(name = "summarizer", version)]
pub struct Cli {
    /// Configuration file (RON). Defaults to the user config directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the summarization service.
    #[arg(long, value_name = "URL")]
    pub service_url: Option<String>,

    /// Directory downloaded summaries are written to.
    #[arg(long, value_name = "DIR")]
    pub download_dir: Option<PathBuf>,

    /// Model selected on start-up.
    #[arg(long, value_parser = parse_model)]
    pub model: Option<ModelKind>,

    /// Log level: off, error, warn, info, debug or trace.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Document to attach on start-up (.pdf, .docx or .txt).
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

fn parse_model(raw: &str) -> Result<ModelKind, String> {
    ModelKind::parse(raw).ok_or_else(|| format!("unknown model {raw:?}, expected bart or t5"))
}
