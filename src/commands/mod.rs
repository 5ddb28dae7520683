//! Command implementations, split in two groups:
//!
//! - `porcelain`: everyday local workflows (staging, commits, branches,
//!   history, merging)
//! - `remote`: syncing with another repository over a filesystem path

pub mod porcelain;
pub mod remote;
