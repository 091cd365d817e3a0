//! Core type definitions for the launcher

use serde::{Deserialize, Serialize};
use std::fmt;

/// Process identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct ProcessId(i32);

impl ProcessId {
    /// Create from raw PID
    #[must_use]
    pub const fn from_raw(pid: i32) -> Self {
        Self(pid)
    }

    /// Get the current process ID
    #[must_use]
    pub fn current() -> Self {
        #[allow(clippy::cast_possible_wrap)]
        Self(std::process::id() as i32)
    }

    /// Get raw PID value
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<nix::unistd::Pid> for ProcessId {
    fn from(pid: nix::unistd::Pid) -> Self {
        Self(pid.as_raw())
    }
}

impl From<ProcessId> for nix::unistd::Pid {
    fn from(pid: ProcessId) -> Self {
        nix::unistd::Pid::from_raw(pid.0)
    }
}

/// Terminal status of a reaped child process
///
/// Produced exactly once per launch, after the wait completes. Either the
/// child exited normally with a code, or it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitOutcome {
    /// The child exited normally
    Exited {
        /// The reaped child's PID
        pid: ProcessId,
        /// Exit code passed to `exit(2)`
        code: i32,
    },

    /// The child was terminated by a signal
    Signaled {
        /// The reaped child's PID
        pid: ProcessId,
        /// Signal number that killed the child
        signal: i32,
        /// Whether a core dump was produced
        core_dumped: bool,
    },
}

impl ExitOutcome {
    /// The PID of the child this outcome describes
    #[must_use]
    pub const fn pid(&self) -> ProcessId {
        match self {
            Self::Exited { pid, .. } | Self::Signaled { pid, .. } => *pid,
        }
    }

    /// Exit code for a normal exit, `None` for signal death
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        match self {
            Self::Exited { code, .. } => Some(*code),
            Self::Signaled { .. } => None,
        }
    }

    /// Whether the child exited cleanly with code 0
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self, Self::Exited { code: 0, .. })
    }

    /// Collapse into a shell-convention exit code
    ///
    /// Normal exits map to their code, signal deaths to `128 + signo`.
    #[must_use]
    pub const fn as_exit_code(&self) -> i32 {
        match self {
            Self::Exited { code, .. } => *code,
            Self::Signaled { signal, .. } => 128 + *signal,
        }
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited { pid, code } => {
                write!(f, "child {pid} exited with code {code}")
            }
            Self::Signaled {
                pid,
                signal,
                core_dumped,
            } => {
                write!(f, "child {pid} killed by signal {signal}")?;
                if *core_dumped {
                    write!(f, " (core dumped)")?;
                }
                Ok(())
            }
        }
    }
}
