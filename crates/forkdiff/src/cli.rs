use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use forkdiff_discovery::ModPolicy;

#[derive(Clone, Debug, Parser)]
#[command(name = "forkdiff", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Args)]
pub struct GlobalArgs {
    /// TOML file with resolver options
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Fall back to plain http when https cannot connect
    #[arg(long, global = true)]
    pub insecure: bool,

    /// as-published, prefer-mod or ignore-mod
    #[arg(long, global = true)]
    pub mod_policy: Option<ModPolicy>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "r", name = "resolve", about = "Resolve module paths to repository roots")]
    Resolve(ResolveArg),
    #[command(alias = "p", name = "pair", about = "Resolve both sides of a replacement")]
    Pair(PairArg),
}

#[derive(Clone, Debug, Args)]
pub struct ResolveArg {
    #[arg(required = true)]
    pub identifiers: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct PairArg {
    /// Module path being replaced
    pub old: String,
    /// Module path it is replaced with
    pub new: String,
}
