//! File processing and batch driver for flowscrub

pub mod driver;
pub mod processor;

pub use driver::{CheckOutcome, CheckSummary, Driver, InputOutcome, RunPlan, RunSummary};
pub use processor::{process_file, render_document, sanitize_path, scan_path, try_process_file};
