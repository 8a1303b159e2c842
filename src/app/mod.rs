//! Run orchestration and report rendering.
mod export;
mod runner;
mod summary;


pub use export::{summary_json, write_output_file, write_stdout};
pub use runner::{LoadTestPlan, run_load_test};
pub use summary::summary_lines;
