//! CLI argument definitions

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "burrow")]
#[command(about = "Namespace-isolated process launcher", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch a program in new namespaces and wait for it
    Run(RunArgs),

    /// Show namespace information
    Namespaces {
        /// Process ID (default: current process)
        #[arg(short, long)]
        pid: Option<u32>,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// New UTS namespace (hostname isolation)
    #[arg(long)]
    pub uts: bool,

    /// New PID namespace
    #[arg(long)]
    pub pid: bool,

    /// New mount namespace
    #[arg(long)]
    pub mount: bool,

    /// New network namespace
    #[arg(long)]
    pub net: bool,

    /// New IPC namespace
    #[arg(long)]
    pub ipc: bool,

    /// New user namespace
    #[arg(long)]
    pub user: bool,

    /// Hostname applied inside the child
    #[arg(long)]
    pub hostname: Option<String>,

    /// Domain name applied inside the child
    #[arg(long)]
    pub domainname: Option<String>,

    /// Child stack size in bytes
    #[arg(long)]
    pub stack_size: Option<usize>,

    /// Program to run
    #[arg(last = true, required = true)]
    pub command: Vec<String>,
}
