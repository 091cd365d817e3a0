//! Launch configuration

use nix::sched::CloneFlags;
use serde::{Deserialize, Serialize};

use burrow_core::{Error, Result};

use crate::stack::{DEFAULT_STACK_SIZE, MIN_STACK_SIZE};

/// Maximum hostname and domain name length accepted (`HOST_NAME_MAX` on Linux)
pub const MAX_HOSTNAME_LENGTH: usize = 64;

/// Configuration for a single launch
///
/// Selects the namespaces the child is detached into, the identity applied
/// inside them, and the program the child hands control to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Program to exec in the child
    pub program: String,

    /// Arguments passed to the program (not including `argv[0]`)
    pub args: Vec<String>,

    /// Enable UTS namespace (hostname)
    pub uts: bool,

    /// Enable PID namespace
    pub pid: bool,

    /// Enable mount namespace
    pub mount: bool,

    /// Enable network namespace
    pub network: bool,

    /// Enable IPC namespace
    pub ipc: bool,

    /// Enable user namespace
    pub user: bool,

    /// Enable cgroup namespace
    pub cgroup: bool,

    /// Hostname applied in the child before exec
    pub hostname: Option<String>,

    /// Domain name applied in the child before exec
    pub domainname: Option<String>,

    /// Size in bytes of the child's dedicated stack
    pub stack_size: usize,
}

impl LaunchConfig {
    /// Create a configuration with no namespace isolation
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            uts: false,
            pid: false,
            mount: false,
            network: false,
            ipc: false,
            user: false,
            cgroup: false,
            hostname: None,
            domainname: None,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }

    /// Set the argument vector
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Append a single argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Enable UTS namespace
    #[must_use]
    pub fn with_uts(mut self, enable: bool) -> Self {
        self.uts = enable;
        self
    }

    /// Enable PID namespace
    #[must_use]
    pub fn with_pid(mut self, enable: bool) -> Self {
        self.pid = enable;
        self
    }

    /// Enable mount namespace
    #[must_use]
    pub fn with_mount(mut self, enable: bool) -> Self {
        self.mount = enable;
        self
    }

    /// Enable network namespace
    #[must_use]
    pub fn with_network(mut self, enable: bool) -> Self {
        self.network = enable;
        self
    }

    /// Enable IPC namespace
    #[must_use]
    pub fn with_ipc(mut self, enable: bool) -> Self {
        self.ipc = enable;
        self
    }

    /// Enable user namespace
    #[must_use]
    pub fn with_user(mut self, enable: bool) -> Self {
        self.user = enable;
        self
    }

    /// Enable cgroup namespace
    #[must_use]
    pub fn with_cgroup(mut self, enable: bool) -> Self {
        self.cgroup = enable;
        self
    }

    /// Set the hostname applied in the child
    #[must_use]
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Set the domain name applied in the child
    #[must_use]
    pub fn with_domainname(mut self, domainname: impl Into<String>) -> Self {
        self.domainname = Some(domainname.into());
        self
    }

    /// Override the child's stack size
    #[must_use]
    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = bytes;
        self
    }

    /// Convert to clone flags for clone(2)
    #[must_use]
    pub fn to_clone_flags(&self) -> CloneFlags {
        let mut flags = CloneFlags::empty();

        if self.uts {
            flags |= CloneFlags::CLONE_NEWUTS;
        }
        if self.pid {
            flags |= CloneFlags::CLONE_NEWPID;
        }
        if self.mount {
            flags |= CloneFlags::CLONE_NEWNS;
        }
        if self.network {
            flags |= CloneFlags::CLONE_NEWNET;
        }
        if self.ipc {
            flags |= CloneFlags::CLONE_NEWIPC;
        }
        if self.user {
            flags |= CloneFlags::CLONE_NEWUSER;
        }
        if self.cgroup {
            flags |= CloneFlags::CLONE_NEWCGROUP;
        }

        flags
    }

    /// Check if any namespaces are enabled
    #[must_use]
    pub const fn has_any(&self) -> bool {
        self.uts || self.pid || self.mount || self.network || self.ipc || self.user || self.cgroup
    }

    /// Get list of enabled namespace names
    #[must_use]
    pub fn enabled_namespaces(&self) -> Vec<&'static str> {
        let mut namespaces = Vec::new();

        if self.uts {
            namespaces.push("uts");
        }
        if self.pid {
            namespaces.push("pid");
        }
        if self.mount {
            namespaces.push("mnt");
        }
        if self.network {
            namespaces.push("net");
        }
        if self.ipc {
            namespaces.push("ipc");
        }
        if self.user {
            namespaces.push("user");
        }
        if self.cgroup {
            namespaces.push("cgroup");
        }

        namespaces
    }

    /// Whether a hostname is set without UTS isolation
    ///
    /// Legal, but the change lands in the shared host UTS namespace.
    #[must_use]
    pub const fn hostname_leaks(&self) -> bool {
        self.hostname.is_some() && !self.uts
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` if the program is empty, any string
    /// contains a NUL byte, the hostname is out of range, or the stack is
    /// below the enforced minimum.
    pub fn validate(&self) -> Result<()> {
        if self.program.is_empty() {
            return Err(Error::InvalidConfig {
                message: "Program path cannot be empty".to_string(),
            });
        }

        if self.program.contains('\0') {
            return Err(Error::InvalidConfig {
                message: "Program path cannot contain NUL bytes".to_string(),
            });
        }

        if self.args.iter().any(|arg| arg.contains('\0')) {
            return Err(Error::InvalidConfig {
                message: "Arguments cannot contain NUL bytes".to_string(),
            });
        }

        if let Some(ref hostname) = self.hostname {
            if hostname.is_empty() {
                return Err(Error::InvalidConfig {
                    message: "Hostname cannot be empty".to_string(),
                });
            }

            if hostname.len() > MAX_HOSTNAME_LENGTH {
                return Err(Error::InvalidConfig {
                    message: format!("Hostname too long (max {MAX_HOSTNAME_LENGTH} chars)"),
                });
            }
        }

        if let Some(ref domainname) = self.domainname {
            if domainname.is_empty() {
                return Err(Error::InvalidConfig {
                    message: "Domain name cannot be empty".to_string(),
                });
            }

            if domainname.len() > MAX_HOSTNAME_LENGTH {
                return Err(Error::InvalidConfig {
                    message: format!("Domain name too long (max {MAX_HOSTNAME_LENGTH} chars)"),
                });
            }
        }

        if self.stack_size < MIN_STACK_SIZE {
            return Err(Error::InvalidConfig {
                message: format!(
                    "Stack size {} below minimum of {} bytes",
                    self.stack_size, MIN_STACK_SIZE
                ),
            });
        }

        Ok(())
    }
}
