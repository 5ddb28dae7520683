//! Three-way merge building blocks
//!
//! The merge command is driven by three pure pieces kept here, away from any
//! filesystem concern:
//!
//! - [`split_point`]: find the merge base of the two branch heads
//! - [`classifier`]: decide per path what the merge does
//! - [`conflict`]: render marker blocks for conflicting paths

pub mod classifier;
pub mod conflict;
pub mod split_point;
