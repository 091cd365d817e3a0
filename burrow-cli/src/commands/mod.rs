//! CLI command implementations

pub mod namespaces;
pub mod run;
