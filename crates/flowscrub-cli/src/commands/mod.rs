pub mod check;
pub mod file;
pub mod init;
pub mod run;

use flowscrub_config::ResolvedConfig;
use flowscrub_engine::RunPlan;
use std::path::{Path, PathBuf};

/// Build a run plan from command-line inputs, falling back to the config.
///
/// Inputs given on the command line are relative to `cwd`; configured inputs
/// are relative to the config's base dir. The output dir follows the same rule.
pub fn build_plan(
    inputs: Vec<String>,
    output_dir: Option<PathBuf>,
    resolved: &ResolvedConfig,
    cwd: &Path,
) -> RunPlan {
    let output_dir = match output_dir {
        Some(dir) => cwd.join(dir),
        None => resolved.base_dir.join(&resolved.config.output_dir),
    };

    if inputs.is_empty() {
        RunPlan::new(
            resolved.config.inputs.clone(),
            output_dir,
            resolved.base_dir.clone(),
        )
    } else {
        RunPlan::new(inputs, output_dir, cwd)
    }
}

/// Show `path` relative to `cwd` when it lives below it
pub fn display_path(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// How missing-input warnings name the directory inputs were looked up in
pub fn input_location(base_dir: &Path, cwd: &Path) -> String {
    if base_dir == cwd {
        "current directory".to_string()
    } else {
        display_path(base_dir, cwd)
    }
}
