use anyhow::Result;
use flowscrub_config::ResolvedConfig;
use flowscrub_core::CredentialFinding;
use flowscrub_engine::{CheckOutcome, Driver};
use std::path::Path;

use super::{build_plan, input_location};

/// Check the given files, or the sanitized copies of the configured inputs
pub fn handle(inputs: Vec<String>, resolved: ResolvedConfig, cwd: &Path) -> Result<()> {
    let plan = if inputs.is_empty() {
        build_plan(inputs, None, &resolved, cwd).outputs()
    } else {
        build_plan(inputs, None, &resolved, cwd)
    };
    let location = input_location(&plan.base_dir, cwd);
    let summary = Driver::new(resolved.config.sanitizer()).check(&plan);

    for outcome in &summary.outcomes {
        match outcome {
            CheckOutcome::Clean { input } => println!("✓ {}", input),
            CheckOutcome::Dirty { input, findings } => {
                println!("✗ {}", input);
                for finding in findings {
                    println!("  {}", describe(finding));
                }
            }
            CheckOutcome::Missing { input } => {
                eprintln!("⚠ Warning: {} not found in {}", input, location)
            }
            CheckOutcome::Failed { input, error } => {
                eprintln!("✗ Error checking {}: {}", input, error)
            }
        }
    }

    if !summary.is_clean() {
        anyhow::bail!(
            "{} workflow(s) still contain credential identities, {} could not be checked",
            summary.dirty(),
            summary.failed()
        );
    }

    println!("\n✓ No credential identities found");
    Ok(())
}

fn describe(finding: &CredentialFinding) -> String {
    match &finding.node_name {
        Some(name) => format!(
            "node #{} ({}): {} id={}",
            finding.node_index, name, finding.credential_type, finding.id
        ),
        None => format!(
            "node #{}: {} id={}",
            finding.node_index, finding.credential_type, finding.id
        ),
    }
}
