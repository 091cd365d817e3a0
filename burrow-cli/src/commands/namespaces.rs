//! `burrow namespaces` - show namespace IDs for a process

use anyhow::{Context, Result};
use tracing::info;

use burrow_launch::NamespaceInfo;

pub fn execute(pid: Option<u32>) -> Result<i32> {
    let info = match pid {
        Some(pid) => {
            info!("🔍 Namespaces for PID {pid}");
            NamespaceInfo::for_pid(pid).with_context(|| format!("Cannot inspect PID {pid}"))?
        }
        None => {
            info!("🔍 Namespaces for current process");
            NamespaceInfo::current().context("Cannot inspect current process")?
        }
    };

    println!("{info}");

    Ok(0)
}
