//! Namespace inspection via /proc
//!
//! Reads the `/proc/<pid>/ns` symlinks so callers (and tests) can tell which
//! namespaces a process actually lives in.

use burrow_core::{Error, Result};

/// Namespace identifiers of a process, as reported by `/proc/<pid>/ns`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceInfo {
    /// UTS namespace ID
    pub uts: Option<String>,
    /// PID namespace ID
    pub pid: Option<String>,
    /// Mount namespace ID
    pub mnt: Option<String>,
    /// Network namespace ID
    pub net: Option<String>,
    /// IPC namespace ID
    pub ipc: Option<String>,
    /// User namespace ID
    pub user: Option<String>,
    /// CGroup namespace ID
    pub cgroup: Option<String>,
}

impl NamespaceInfo {
    /// Read namespace IDs of the current process
    pub fn current() -> Result<Self> {
        Self::for_pid(std::process::id())
    }

    /// Read namespace IDs for a specific PID
    pub fn for_pid(pid: u32) -> Result<Self> {
        use std::fs;

        let base_path = format!("/proc/{pid}/ns");

        if !std::path::Path::new(&base_path).exists() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such process: {pid}"),
            )));
        }

        let read_ns = |name: &str| -> Option<String> {
            let path = format!("{base_path}/{name}");
            fs::read_link(&path)
                .map(|p| p.to_string_lossy().into_owned())
                .ok()
        };

        Ok(Self {
            uts: read_ns("uts"),
            pid: read_ns("pid"),
            mnt: read_ns("mnt"),
            net: read_ns("net"),
            ipc: read_ns("ipc"),
            user: read_ns("user"),
            cgroup: read_ns("cgroup"),
        })
    }
}

impl std::fmt::Display for NamespaceInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Namespace Info:")?;
        if let Some(ref uts) = self.uts {
            writeln!(f, "  UTS:    {uts}")?;
        }
        if let Some(ref pid) = self.pid {
            writeln!(f, "  PID:    {pid}")?;
        }
        if let Some(ref mnt) = self.mnt {
            writeln!(f, "  MNT:    {mnt}")?;
        }
        if let Some(ref net) = self.net {
            writeln!(f, "  NET:    {net}")?;
        }
        if let Some(ref ipc) = self.ipc {
            writeln!(f, "  IPC:    {ipc}")?;
        }
        if let Some(ref user) = self.user {
            writeln!(f, "  USER:   {user}")?;
        }
        if let Some(ref cgroup) = self.cgroup {
            writeln!(f, "  CGROUP: {cgroup}")?;
        }
        Ok(())
    }
}
