// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines the run subcommand and its arguments.

use clap::{Parser, Subcommand, ValueEnum};
use localdev::types::ContainerKind;

#[derive(Parser)]
#[command(name = "localdev")]
#[command(about = "Container lifecycle supervisor for local development environments")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Supervise one container until interrupted
    Run {
        /// Environment namespace
        #[arg(short = 'n', long, default_value = "dev")]
        namespace: String,

        /// Friendly name of the container
        #[arg(long)]
        name: String,

        /// Role of the container
        #[arg(short, long, value_enum, default_value_t = KindArg::Service)]
        kind: KindArg,

        /// Image reference (name[:tag])
        #[arg(short, long)]
        image: String,

        /// Shared network to attach to
        #[arg(long, default_value = "localdev")]
        network: String,

        /// Public port bound to the router (router kind only)
        #[arg(short, long, default_value_t = 443)]
        port: u16,

        /// Environment variables (KEY=VALUE, repeatable)
        #[arg(short, long = "env")]
        env: Vec<String>,

        /// Path to the runtime daemon socket
        #[arg(long, default_value = localdev::runtime::DEFAULT_SOCKET)]
        socket: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Router,
    Service,
    Resource,
}

impl From<KindArg> for ContainerKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Router => ContainerKind::Router,
            KindArg::Service => ContainerKind::Service,
            KindArg::Resource => ContainerKind::Resource,
        }
    }
}
