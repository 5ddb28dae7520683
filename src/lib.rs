//! grit: a small local version-control system.
//!
//! Content-addressable object store, full-snapshot commits, a persisted
//! staging area, branches, three-way merging, and filesystem-path remotes.
//! Everything lives under a `.grit` directory in the repository root.

pub mod areas;
pub mod artifacts;
pub mod commands;
