//! Value types and pure logic shared by the repository areas and commands.

pub mod errors;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
