//! Command implementations

pub mod completions;
pub mod install;
pub mod languages;
pub mod version;
