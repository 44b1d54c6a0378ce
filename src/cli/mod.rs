pub mod analyze;
pub mod classify;
pub mod parse;
pub mod render;
pub mod sample;
pub mod schema;

use clap::{Parser, Subcommand};
use marketpulse::classify::Axis;
use marketpulse::output::OutputFormat;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "marketpulse")]
#[command(
    author,
    version,
    about = "Turn model output into fully-populated market research reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the research agent to analyze a market
    Analyze(AnalyzeArgs),

    /// Normalize raw model output into a report
    Parse(ParseArgs),

    /// Bucket a sentiment, severity, threat or priority label
    Classify(ClassifyArgs),

    /// Show the block structure of markup text
    Render(RenderArgs),

    /// Print the built-in sample report
    Sample(SampleArgs),

    /// Print JSON Schema for the report
    Schema,
}

#[derive(Parser, Clone)]
pub struct AnalyzeArgs {
    /// Product name, concept or market idea
    #[arg(short, long)]
    pub query: String,

    /// Additional context for the agent
    #[arg(long)]
    pub context: Option<String>,

    /// Path to config file
    #[arg(short, long, default_value = "marketpulse.yaml")]
    pub config: PathBuf,

    /// Override the agent id
    #[arg(long, env = "MARKETPULSE_AGENT_ID")]
    pub agent_id: Option<String>,

    /// Override the agent timeout in seconds
    #[arg(long)]
    pub timeout_sec: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Clone)]
pub struct ParseArgs {
    /// File holding raw model output (stdin if omitted or "-")
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Clone)]
pub struct ClassifyArgs {
    /// Label to classify
    pub label: String,

    /// sentiment, severity, threat or priority
    #[arg(short, long, default_value = "sentiment")]
    pub axis: Axis,
}

#[derive(Parser, Clone)]
pub struct RenderArgs {
    /// File holding markup text (stdin if omitted or "-")
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Parser, Clone)]
pub struct SampleArgs {
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Read a whole file, or stdin for `None` and `-`.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    let bytes = match file {
        Some(path) if path != Path::new("-") => std::fs::read(path)?,
        _ => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
