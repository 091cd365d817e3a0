use burrow_core::{Error, ExitOutcome};
use burrow_launch::{LaunchConfig, launch};

/// Check if running as root
fn is_root() -> bool {
    unsafe { libc::getuid() == 0 }
}

#[test]
fn test_launch_true_returns_clean_exit() {
    let config = LaunchConfig::new("/bin/true");
    let outcome = launch(&config).unwrap();

    assert!(outcome.success());
    assert_eq!(outcome.code(), Some(0));
}

#[test]
fn test_launch_false_propagates_exit_code() {
    let config = LaunchConfig::new("/bin/false");
    let outcome = launch(&config).unwrap();

    assert!(!outcome.success());
    assert_eq!(outcome.code(), Some(1));
}

#[test]
fn test_launch_passes_arguments() {
    let config = LaunchConfig::new("/bin/sh").with_args(["-c", "exit 7"]);
    let outcome = launch(&config).unwrap();

    assert_eq!(outcome.code(), Some(7));
    assert_eq!(outcome.as_exit_code(), 7);
}

#[test]
fn test_launch_nonexistent_program_exits_127() {
    // Exec failure happens inside the child; the parent must survive and
    // observe the reserved exec-failure code, never crash.
    let config = LaunchConfig::new("/no/such/binary");
    let outcome = launch(&config).unwrap();

    assert_eq!(outcome.code(), Some(burrow_launch::EXIT_EXEC_FAILED));
}

#[test]
fn test_launch_decodes_signal_death() {
    let config = LaunchConfig::new("/bin/sh").with_args(["-c", "kill -TERM $$"]);
    let outcome = launch(&config).unwrap();

    match outcome {
        ExitOutcome::Signaled { signal, .. } => {
            assert_eq!(signal, libc::SIGTERM);
            assert_eq!(outcome.as_exit_code(), 128 + libc::SIGTERM);
        }
        ExitOutcome::Exited { .. } => panic!("expected signal death, got {outcome}"),
    }
}

#[test]
fn test_sequential_launches_are_independent() {
    let config = LaunchConfig::new("/bin/true");

    let first = launch(&config).unwrap();
    let second = launch(&config).unwrap();

    assert!(first.success());
    assert!(second.success());
    assert_ne!(first.pid(), second.pid());
}

#[test]
fn test_launch_rejects_empty_program() {
    let config = LaunchConfig::new("");
    let result = launch(&config);

    assert!(matches!(result, Err(Error::InvalidConfig { .. })));
}

#[test]
fn test_launch_rejects_undersized_stack() {
    let config = LaunchConfig::new("/bin/true").with_stack_size(1);
    let result = launch(&config);

    assert!(matches!(result, Err(Error::InvalidConfig { .. })));
}

#[test]
#[ignore] // Requires root
fn test_uts_isolation_hides_hostname_from_parent() {
    if !is_root() {
        return;
    }

    let before = nix::unistd::gethostname().unwrap();

    // The child checks its own view of the hostname from inside the new
    // UTS namespace.
    let config = LaunchConfig::new("/bin/sh")
        .with_args([
            "-c",
            "test \"$(cat /proc/sys/kernel/hostname)\" = burrow-child",
        ])
        .with_uts(true)
        .with_hostname("burrow-child");

    let outcome = launch(&config).unwrap();
    assert!(outcome.success(), "child saw the wrong hostname: {outcome}");

    // Parent's view is untouched
    let after = nix::unistd::gethostname().unwrap();
    assert_eq!(before, after);
}

#[test]
#[ignore] // Requires root
fn test_hostname_without_uts_changes_shared_host() {
    if !is_root() {
        return;
    }

    let original = nix::unistd::gethostname().unwrap();

    // Without UTS isolation the hostname lands in the shared namespace, so
    // the parent's own view changes. Documented configuration pitfall.
    let config = LaunchConfig::new("/bin/true").with_hostname("burrow-leak");
    let outcome = launch(&config).unwrap();
    assert!(outcome.success());

    let leaked = nix::unistd::gethostname().unwrap();
    assert_eq!(leaked.to_string_lossy(), "burrow-leak");

    // Put the host back the way we found it
    nix::unistd::sethostname(&original).unwrap();
}

#[test]
#[ignore] // Requires root
fn test_pid_namespace_child_is_pid_1() {
    if !is_root() {
        return;
    }

    let config = LaunchConfig::new("/bin/sh")
        .with_args(["-c", "test \"$$\" = 1"])
        .with_pid(true);

    let outcome = launch(&config).unwrap();
    assert!(outcome.success(), "child was not PID 1: {outcome}");
}

#[test]
#[ignore] // Requires root
fn test_uts_launch_exits_cleanly() {
    if !is_root() {
        return;
    }

    let config = LaunchConfig::new("/bin/true")
        .with_uts(true)
        .with_hostname("burrow-child");

    let outcome = launch(&config).unwrap();
    assert_eq!(outcome.code(), Some(0));
}
