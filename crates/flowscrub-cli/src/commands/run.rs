use anyhow::Result;
use flowscrub_config::ResolvedConfig;
use flowscrub_engine::{Driver, InputOutcome};
use std::path::Path;

use super::{build_plan, display_path, input_location};
use crate::cli::RunArgs;

pub fn handle(args: RunArgs, resolved: ResolvedConfig, cwd: &Path) -> Result<()> {
    tracing::debug!(source = ?resolved.source, "using config");

    let plan = build_plan(args.inputs, args.output_dir, &resolved, cwd);
    let driver = Driver::new(resolved.config.sanitizer());
    let location = input_location(&plan.base_dir, cwd);

    let summary = driver.run_with(&plan, |outcome| match outcome {
        InputOutcome::Sanitized {
            input,
            output,
            report,
        } => {
            println!("Processing: {}", input);
            println!("✓ Sanitized file saved to: {}", display_path(output, cwd));
            if report.redaction_count() > 0 {
                println!("  Replaced {} credential(s)", report.redaction_count());
            }
            if !report.unreviewed_settings.is_empty() {
                println!(
                    "  Settings left for review: {}",
                    report.unreviewed_settings.join(", ")
                );
            }
        }
        InputOutcome::Missing { input } => {
            eprintln!("⚠ Warning: {} not found in {}", input, location);
        }
        InputOutcome::Failed { input, error } => {
            println!("Processing: {}", input);
            eprintln!("✗ Error processing {}: {}", input, error);
        }
    })?;

    println!(
        "\n✓ Successfully sanitized {}/{} workflows",
        summary.succeeded(),
        summary.total()
    );
    println!("\n⚠ IMPORTANT: Manually verify the sanitized files before committing!");

    Ok(())
}
