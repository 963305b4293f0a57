// ABOUTME: Entry point for the localdev CLI application.
// ABOUTME: Parses arguments and supervises a container until interrupted.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use localdev::config::StaticEnv;
use localdev::error::Result;
use localdev::lifecycle::Container;
use localdev::network::DockerNetwork;
use localdev::runtime::BollardRuntime;
use localdev::types::{ContainerIdentity, ImageRef};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            namespace,
            name,
            kind,
            image,
            network,
            port,
            env,
            socket,
        } => {
            let image = ImageRef::parse(&image)?;
            let env = StaticEnv::from_pairs(env.iter().map(String::as_str))?;
            let identity = ContainerIdentity::new(&namespace, &name, kind.into());

            let runtime = BollardRuntime::connect(&socket)?;
            let network = DockerNetwork::ensure(runtime.client(), &network).await?;

            let container = Container::new(
                identity,
                image,
                port,
                Arc::new(runtime),
                Arc::new(network),
                Arc::new(env),
            );

            container.start().await?;

            // Supervise until interrupted; crash recovery runs in the
            // background in the meantime.
            tokio::signal::ctrl_c().await?;

            container.stop().await?;
            Ok(())
        }
    }
}
