use anyhow::{Context, Result};
use flowscrub_core::{CredentialFinding, SanitizeReport, Sanitizer};
use serde_json::Value;
use std::path::Path;
use tracing::{error, info};

/// Read, sanitize and write one workflow file
pub fn process_file(sanitizer: &Sanitizer, input: &Path, output: &Path) -> Result<SanitizeReport> {
    let (document, report) = sanitize_path(sanitizer, input)?;
    write_document(&document, output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        redactions = report.redaction_count(),
        "sanitized workflow"
    );
    Ok(report)
}

/// [`process_file`] with failures logged and turned into `false`
pub fn try_process_file(sanitizer: &Sanitizer, input: &Path, output: &Path) -> bool {
    match process_file(sanitizer, input, output) {
        Ok(_) => true,
        Err(e) => {
            error!(input = %input.display(), "{:#}", e);
            false
        }
    }
}

/// Read and sanitize a workflow file without writing it anywhere
pub fn sanitize_path(sanitizer: &Sanitizer, input: &Path) -> Result<(Value, SanitizeReport)> {
    let content = read_input(input)?;
    sanitizer
        .sanitize_str(&content)
        .with_context(|| format!("Failed to sanitize {}", input.display()))
}

/// Read a workflow file and list credentials that still need sanitizing
pub fn scan_path(sanitizer: &Sanitizer, input: &Path) -> Result<Vec<CredentialFinding>> {
    let content = read_input(input)?;
    let document: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    sanitizer
        .scan(&document)
        .with_context(|| format!("Failed to scan {}", input.display()))
}

/// Pretty-print with 2-space indentation, no trailing newline.
///
/// Non-ASCII text is written as UTF-8 rather than `\uXXXX` escapes, and
/// numbers keep their source text (`1e2`, `-0`, integers beyond 64 bits).
pub fn render_document(document: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

fn read_input(input: &Path) -> Result<String> {
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}

fn write_document(document: &Value, output: &Path) -> Result<()> {
    let rendered = render_document(document)?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(output, rendered)
        .with_context(|| format!("Failed to write {}", output.display()))
}
