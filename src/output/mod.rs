mod markdown;
mod text;

pub use markdown::to_markdown;
pub use text::to_plain_text;

use crate::error::OutputError;
use crate::report::Report;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain-text export document
    #[default]
    Text,
    Json,
    Markdown,
}

/// Render a report in the requested format
pub fn render_report(report: &Report, format: OutputFormat) -> Result<String, OutputError> {
    Ok(match format {
        OutputFormat::Text => to_plain_text(report),
        OutputFormat::Json => report.to_json_pretty()?,
        OutputFormat::Markdown => to_markdown(report),
    })
}

/// Write rendered output to a file, or to stdout when no path is given
pub fn write_output(content: &str, path: Option<&Path>) -> Result<(), OutputError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(OutputError::WriteReport)?;
            }
            fs::write(path, content).map_err(OutputError::WriteReport)?;
            tracing::info!("Wrote report to {:?}", path);
            Ok(())
        }
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}
