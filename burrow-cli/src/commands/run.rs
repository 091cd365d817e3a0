//! `burrow run` - launch a program in new namespaces

use anyhow::{Context, Result};
use tracing::{info, warn};

use burrow_core::ExitOutcome;
use burrow_launch::{LaunchConfig, launch};

use crate::cli::RunArgs;

pub fn execute(args: RunArgs) -> Result<i32> {
    let config = build_config(&args);

    if config.has_any() && !nix::unistd::geteuid().is_root() {
        warn!("⚠️  Namespace creation usually requires root; try: sudo burrow run ...");
    }

    info!("🚀 Launching: {}", args.command.join(" "));
    if config.has_any() {
        info!("   Namespaces: {:?}", config.enabled_namespaces());
    } else {
        info!("   Namespaces: none (shared with host)");
    }

    let outcome = launch(&config).context("Launch failed")?;

    match outcome {
        ExitOutcome::Exited { code: 0, .. } => info!("✅ {outcome}"),
        _ => warn!("⚠️  {outcome}"),
    }

    Ok(outcome.as_exit_code())
}

/// Map CLI flags onto a `LaunchConfig`
fn build_config(args: &RunArgs) -> LaunchConfig {
    let mut config = LaunchConfig::new(args.command[0].clone())
        .with_args(args.command[1..].iter().cloned())
        .with_uts(args.uts)
        .with_pid(args.pid)
        .with_mount(args.mount)
        .with_network(args.net)
        .with_ipc(args.ipc)
        .with_user(args.user);

    if let Some(ref hostname) = args.hostname {
        config = config.with_hostname(hostname);
    }

    if let Some(ref domainname) = args.domainname {
        config = config.with_domainname(domainname);
    }

    if let Some(stack_size) = args.stack_size {
        config = config.with_stack_size(stack_size);
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::RunArgs;

    fn args_for(command: &[&str]) -> RunArgs {
        RunArgs {
            uts: false,
            pid: false,
            mount: false,
            net: false,
            ipc: false,
            user: false,
            hostname: None,
            domainname: None,
            stack_size: None,
            command: command.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_build_config_splits_program_and_args() {
        let args = args_for(&["/bin/echo", "hello", "world"]);
        let config = build_config(&args);

        assert_eq!(config.program, "/bin/echo");
        assert_eq!(config.args, vec!["hello", "world"]);
        assert!(!config.has_any());
    }

    #[test]
    fn test_build_config_applies_flags() {
        let mut args = args_for(&["/bin/sh"]);
        args.uts = true;
        args.hostname = Some("child".to_string());
        args.stack_size = Some(64 * 1024);

        let config = build_config(&args);
        assert!(config.uts);
        assert_eq!(config.hostname.as_deref(), Some("child"));
        assert_eq!(config.stack_size, 64 * 1024);
    }
}
