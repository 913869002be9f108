use anyhow::Result;
use flowscrub_config::Config;
use flowscrub_engine::{process_file, render_document, sanitize_path};
use std::path::Path;

pub fn handle(config: &Config, input: &Path, output: Option<&Path>) -> Result<()> {
    let sanitizer = config.sanitizer();

    match output {
        Some(output) => {
            let report = process_file(&sanitizer, input, output)?;
            eprintln!("✓ Sanitized file saved to: {}", output.display());
            eprintln!("  Replaced {} credential(s)", report.redaction_count());
        }
        None => {
            let (document, _) = sanitize_path(&sanitizer, input)?;
            println!("{}", render_document(&document)?);
        }
    }

    Ok(())
}
