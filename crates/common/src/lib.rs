//! Helpers shared by every crate in the workspace.

pub mod utils;
