//! gitadd: choose which changed files to stage from an interactive list.

pub mod checkbox;
pub mod git;
pub mod logging;
pub mod report;
pub mod stage;
pub mod status;
pub mod types;
