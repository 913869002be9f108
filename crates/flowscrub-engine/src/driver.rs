//! Sequential batch driver
//!
//! Every configured input is resolved, processed and reported one at a time.
//! A missing or broken input never stops the run; only failing to create the
//! output directory does.

use anyhow::{Context, Result};
use flowscrub_core::{CredentialFinding, SanitizeReport, Sanitizer};
use std::path::{Component, Path, PathBuf};
use tracing::{error, info, warn};

use crate::processor::{process_file, scan_path};

/// Inputs and destinations for one run
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// File names or glob patterns, relative to `base_dir` unless absolute
    pub inputs: Vec<String>,
    pub output_dir: PathBuf,
    pub base_dir: PathBuf,
}

impl RunPlan {
    pub fn new(inputs: Vec<String>, output_dir: impl Into<PathBuf>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            output_dir: output_dir.into(),
            base_dir: base_dir.into(),
        }
    }

    fn output_root(&self) -> PathBuf {
        self.base_dir.join(&self.output_dir)
    }

    /// Plan over the sanitized copies this plan writes, for checking them
    pub fn outputs(&self) -> RunPlan {
        let inputs = self
            .inputs
            .iter()
            .map(|entry| output_relative(Path::new(entry)).to_string_lossy().to_string())
            .collect();
        let output_root = self.output_root();

        RunPlan {
            inputs,
            output_dir: self.output_dir.clone(),
            base_dir: output_root,
        }
    }
}

#[derive(Debug, Clone)]
pub enum InputOutcome {
    Sanitized {
        input: String,
        output: PathBuf,
        report: SanitizeReport,
    },
    Missing {
        input: String,
    },
    Failed {
        input: String,
        error: String,
    },
}

impl InputOutcome {
    pub fn input(&self) -> &str {
        match self {
            InputOutcome::Sanitized { input, .. }
            | InputOutcome::Missing { input }
            | InputOutcome::Failed { input, .. } => input,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub outcomes: Vec<InputOutcome>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, InputOutcome::Sanitized { .. }))
            .count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn redactions(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                InputOutcome::Sanitized { report, .. } => report.redaction_count(),
                _ => 0,
            })
            .sum()
    }
}

#[derive(Debug, Clone)]
pub enum CheckOutcome {
    Clean {
        input: String,
    },
    Dirty {
        input: String,
        findings: Vec<CredentialFinding>,
    },
    Missing {
        input: String,
    },
    Failed {
        input: String,
        error: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct CheckSummary {
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckSummary {
    pub fn dirty(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, CheckOutcome::Dirty { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, CheckOutcome::Failed { .. }))
            .count()
    }

    /// No input carries real credential identities and every input parsed
    pub fn is_clean(&self) -> bool {
        self.dirty() == 0 && self.failed() == 0
    }
}

/// One entry of a plan after glob expansion
enum ResolvedInput {
    Found {
        label: String,
        path: PathBuf,
        relative: PathBuf,
    },
    Missing(String),
    Invalid {
        label: String,
        error: String,
    },
}

pub struct Driver {
    sanitizer: Sanitizer,
}

impl Driver {
    pub fn new(sanitizer: Sanitizer) -> Self {
        Self { sanitizer }
    }

    pub fn run(&self, plan: &RunPlan) -> Result<RunSummary> {
        self.run_with(plan, |_| {})
    }

    /// Run the plan, handing each outcome to `on_outcome` as soon as it is known
    pub fn run_with<F>(&self, plan: &RunPlan, mut on_outcome: F) -> Result<RunSummary>
    where
        F: FnMut(&InputOutcome),
    {
        let output_root = plan.output_root();
        std::fs::create_dir_all(&output_root).with_context(|| {
            format!("Failed to create output directory {}", output_root.display())
        })?;

        let mut summary = RunSummary::default();

        for resolved in resolve_inputs(plan) {
            let outcome = match resolved {
                ResolvedInput::Found {
                    label,
                    path,
                    relative,
                } => {
                    let output = output_root.join(relative);
                    match process_file(&self.sanitizer, &path, &output) {
                        Ok(report) => InputOutcome::Sanitized {
                            input: label,
                            output,
                            report,
                        },
                        Err(e) => {
                            error!(input = %label, "{:#}", e);
                            InputOutcome::Failed {
                                input: label,
                                error: format!("{:#}", e),
                            }
                        }
                    }
                }
                ResolvedInput::Missing(label) => {
                    warn!(input = %label, "input not found, skipping");
                    InputOutcome::Missing { input: label }
                }
                ResolvedInput::Invalid { label, error } => {
                    error!(input = %label, "{}", error);
                    InputOutcome::Failed {
                        input: label,
                        error,
                    }
                }
            };

            on_outcome(&outcome);
            summary.outcomes.push(outcome);
        }

        info!(
            succeeded = summary.succeeded(),
            total = summary.total(),
            redactions = summary.redactions(),
            "run finished"
        );
        Ok(summary)
    }

    /// Scan every input of the plan without writing anything
    pub fn check(&self, plan: &RunPlan) -> CheckSummary {
        let mut summary = CheckSummary::default();

        for resolved in resolve_inputs(plan) {
            let outcome = match resolved {
                ResolvedInput::Found { label, path, .. } => {
                    match scan_path(&self.sanitizer, &path) {
                        Ok(findings) if findings.is_empty() => CheckOutcome::Clean { input: label },
                        Ok(findings) => CheckOutcome::Dirty {
                            input: label,
                            findings,
                        },
                        Err(e) => CheckOutcome::Failed {
                            input: label,
                            error: format!("{:#}", e),
                        },
                    }
                }
                ResolvedInput::Missing(label) => CheckOutcome::Missing { input: label },
                ResolvedInput::Invalid { label, error } => CheckOutcome::Failed {
                    input: label,
                    error,
                },
            };
            summary.outcomes.push(outcome);
        }

        summary
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new(Sanitizer::default())
    }
}

fn is_glob(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}

fn resolve_inputs(plan: &RunPlan) -> Vec<ResolvedInput> {
    let mut resolved = Vec::new();

    for entry in &plan.inputs {
        let path = plan.base_dir.join(entry);

        if !is_glob(entry) {
            if path.exists() {
                resolved.push(ResolvedInput::Found {
                    label: entry.clone(),
                    relative: output_relative(Path::new(entry)),
                    path,
                });
            } else {
                resolved.push(ResolvedInput::Missing(entry.clone()));
            }
            continue;
        }

        let pattern = glob_pattern(&plan.base_dir, entry);
        let paths = match glob::glob(&pattern) {
            Ok(paths) => paths,
            Err(e) => {
                resolved.push(ResolvedInput::Invalid {
                    label: entry.clone(),
                    error: format!("Invalid glob pattern {}: {}", entry, e),
                });
                continue;
            }
        };

        // glob yields matches in alphabetical order
        let matched: Vec<ResolvedInput> = paths
            .map(|p| p.map_err(|e| (e.path().to_path_buf(), e.into_error())))
            .filter_map(|p| resolve_match(&plan.base_dir, p))
            .collect();
        if matched.is_empty() {
            resolved.push(ResolvedInput::Missing(entry.clone()));
            continue;
        }
        resolved.extend(matched);
    }

    resolved
}

/// Join `entry` onto `base_dir` with the base dir's own metacharacters escaped
fn glob_pattern(base_dir: &Path, entry: &str) -> String {
    if Path::new(entry).is_absolute() {
        return entry.to_string();
    }

    let escaped = glob::Pattern::escape(&base_dir.to_string_lossy());
    Path::new(&escaped).join(entry).to_string_lossy().to_string()
}

/// Turn one glob match into an input, or `None` for non-files
fn resolve_match(
    base_dir: &Path,
    matched: Result<PathBuf, (PathBuf, std::io::Error)>,
) -> Option<ResolvedInput> {
    let matched = match matched {
        Ok(matched) => matched,
        Err((path, e)) => {
            let label = path
                .strip_prefix(base_dir)
                .unwrap_or(&path)
                .display()
                .to_string();
            return Some(ResolvedInput::Invalid {
                error: format!("Failed to read {}: {}", label, e),
                label,
            });
        }
    };

    if !matched.is_file() {
        return None;
    }

    let relative = matched
        .strip_prefix(base_dir)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| matched.clone());
    Some(ResolvedInput::Found {
        label: relative.display().to_string(),
        relative: output_relative(&relative),
        path: matched,
    })
}

/// Path of an input below the output directory.
///
/// Keeps only the normal components so absolute or `..` inputs cannot
/// escape the output directory.
fn output_relative(input: &Path) -> PathBuf {
    if input.is_absolute() {
        return input.file_name().map(PathBuf::from).unwrap_or_default();
    }

    input
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}
