//! Single-shot launch of a process into new namespaces
//!
//! This module uses `unsafe` for clone(2), which is inherently unsafe but
//! required so the child starts in a designated entry routine on its own
//! stack instead of duplicating the parent's instruction stream.

#![allow(unsafe_code)]

use nix::sched::clone;
use nix::sys::signal::Signal;
use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::{Pid, execv, sethostname};
use std::ffi::{CStr, CString};
use tracing::{debug, info, warn};

use burrow_core::{Error, ExitOutcome, Result};

use crate::config::LaunchConfig;
use crate::stack::ChildStack;

/// Exit code the child reports when exec fails
pub const EXIT_EXEC_FAILED: i32 = 127;

/// Reserved exit code for launcher-level failures (spawn, wait, config)
///
/// Kept below the `128 + signal` band so signal deaths stay unambiguous,
/// and distinct from 127 which exec-failure owns by shell convention.
pub const EXIT_LAUNCH_FAILED: i32 = 125;

/// A spawned child that has not been reaped yet
///
/// Owns the stack region backing the child; both are released together when
/// `wait` consumes the handle. Not exposed publicly: the launch contract is
/// spawn-then-wait, never fire and forget.
struct ChildHandle {
    pid: Pid,
    #[allow(dead_code)] // held so the region outlives the child
    stack: ChildStack,
}

impl ChildHandle {
    /// Block until this specific child terminates and decode its status
    fn wait(self) -> Result<ExitOutcome> {
        debug!(pid = %self.pid, "Waiting for child to exit");

        loop {
            match waitpid(self.pid, None) {
                Ok(WaitStatus::Exited(pid, code)) => {
                    info!(pid = %pid, code, "Child exited");
                    return Ok(ExitOutcome::Exited {
                        pid: pid.into(),
                        code,
                    });
                }
                Ok(WaitStatus::Signaled(pid, signal, core_dumped)) => {
                    warn!(pid = %pid, signal = ?signal, "Child terminated by signal");
                    return Ok(ExitOutcome::Signaled {
                        pid: pid.into(),
                        signal: signal as i32,
                        core_dumped,
                    });
                }
                Ok(status) => {
                    // Stopped/continued are not terminal, keep waiting
                    debug!(status = ?status, "Child status change");
                }
                Err(nix::errno::Errno::EINTR) => {
                    debug!("Wait interrupted by signal, continuing");
                }
                Err(e) => {
                    return Err(Error::Wait {
                        message: format!("Could not retrieve child status: {e}"),
                    });
                }
            }
        }
    }
}

/// Launch a program in a child attached to the configured namespaces
///
/// Creates the child via clone(2) on a dedicated per-launch stack, applies
/// the configured identity inside the new namespaces, execs the program, and
/// blocks until that child is reaped.
///
/// # Errors
/// Returns `Error::InvalidConfig` before any spawn attempt, `Error::Spawn`
/// if clone(2) itself fails, and `Error::Wait` if the child's terminal
/// status cannot be retrieved. Failures inside the child (exec, hostname)
/// surface only through the returned `ExitOutcome`.
pub fn launch(config: &LaunchConfig) -> Result<ExitOutcome> {
    config.validate()?;

    if config.hostname_leaks() {
        warn!(
            hostname = config.hostname.as_deref().unwrap_or_default(),
            "Hostname set without UTS isolation; the change will be visible to the whole host"
        );
    }

    // Build the exec arguments up front. The freshly cloned child runs on a
    // borrowed stack and must not allocate before exec.
    let program = CString::new(config.program.as_str()).map_err(|e| Error::InvalidConfig {
        message: format!("Invalid program path: {e}"),
    })?;

    let mut argv = Vec::with_capacity(config.args.len() + 1);
    argv.push(program.clone());
    for arg in &config.args {
        argv.push(CString::new(arg.as_str()).map_err(|e| Error::InvalidConfig {
            message: format!("Invalid argument: {e}"),
        })?);
    }

    let flags = config.to_clone_flags();
    let enabled = config.enabled_namespaces();

    info!(
        program = %config.program,
        namespaces = ?enabled,
        "Launching child"
    );

    let mut stack = ChildStack::new(config.stack_size);

    let hostname = config.hostname.as_deref();
    let domainname = config.domainname.as_deref();

    // SAFETY: the entry routine only touches data prepared above, the stack
    // region stays alive until the child is reaped, and the child never
    // returns to the parent's instruction stream (it execs or exits).
    let pid = unsafe {
        clone(
            Box::new(|| child_entry(hostname, domainname, &program, &argv)),
            stack.as_mut_slice(),
            flags,
            Some(Signal::SIGCHLD as i32),
        )
    }
    .map_err(|e| Error::Spawn {
        message: format!("clone failed for namespaces {enabled:?}: {e}"),
    })?;

    debug!(pid = %pid, "Child spawned");

    ChildHandle { pid, stack }.wait()
}

/// Entry routine executed inside the child's namespace context
///
/// Runs on the child's dedicated stack. Applies the UTS identity, then hands
/// the process over to the configured program. On success exec never
/// returns; the return value is only reached on failure and becomes the
/// child's exit code.
fn child_entry(
    hostname: Option<&str>,
    domainname: Option<&str>,
    program: &CStr,
    argv: &[CString],
) -> isize {
    if let Some(hostname) = hostname {
        // Non-fatal: the parent only sees the exit status, so report on the
        // child's own channel and still attempt the exec.
        if let Err(e) = sethostname(hostname) {
            warn!(hostname, error = %e, "Failed to set hostname in child");
        }
    }

    if let Some(domainname) = domainname {
        if let Err(e) = set_domainname(domainname) {
            warn!(domainname, error = %e, "Failed to set domain name in child");
        }
    }

    // Irrevocable handoff: never returns on success
    let result = execv(program, argv);

    eprintln!(
        "burrow: failed to execute {}: {:?}",
        program.to_string_lossy(),
        result
    );

    EXIT_EXEC_FAILED as isize
}

/// Set the NIS domain name of the calling process
///
/// nix does not expose setdomainname, so go through libc directly.
fn set_domainname(domainname: &str) -> std::io::Result<()> {
    let bytes = domainname.as_bytes();

    // SAFETY: the pointer and length describe a valid, live byte buffer.
    let rc = unsafe { libc::setdomainname(bytes.as_ptr().cast(), bytes.len()) };

    if rc == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LaunchConfig;

    #[test]
    fn test_launch_rejects_invalid_config() {
        let config = LaunchConfig::new("");
        let result = launch(&config);

        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_exit_code_constants_are_distinct() {
        assert_ne!(EXIT_EXEC_FAILED, EXIT_LAUNCH_FAILED);
        assert!(EXIT_LAUNCH_FAILED < 128);
    }
}
