//! Namespace-isolated process launcher
//!
//! This crate spawns a child process attached to a caller-selected subset of
//! Linux namespaces:
//! - UTS namespace - Hostname isolation
//! - PID namespace - Process isolation
//! - Mount namespace - Filesystem isolation
//! - Network namespace - Network isolation
//! - IPC namespace - Inter-process communication isolation
//! - User namespace - UID/GID mapping
//!
//! The child begins execution in a dedicated entry routine on its own stack,
//! applies its identity (hostname) inside the new namespaces, then execs the
//! configured program. The parent blocks until that specific child is reaped.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod config;
pub mod info;
pub mod launcher;
pub mod stack;

pub use config::LaunchConfig;
pub use info::NamespaceInfo;
pub use launcher::{EXIT_EXEC_FAILED, EXIT_LAUNCH_FAILED, launch};
pub use stack::{ChildStack, DEFAULT_STACK_SIZE, MIN_STACK_SIZE};
