// ABOUTME: Entry point for the dockbridge CLI application.
// ABOUTME: Parses arguments and dispatches to the serve, check, and init commands.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use dockbridge::config::{self, Config};
use dockbridge::engine::{BollardEngine, ContainerOps, EngineInfo};
use dockbridge::error::Result;
use dockbridge::http;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise the verbose flag picks the level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
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
        Commands::Init { force } => {
            let cwd = env::current_dir()?;
            let path = config::init_config(&cwd, force)?;
            println!("Created {}", path.display());
            Ok(())
        }
        Commands::Serve { config, host, port } => {
            let config = load_config(config)?.with_listener(host, port)?;
            let state = http::connect_state(&config.engine).await;
            http::serve(&config.server, state).await
        }
        Commands::Check { config } => {
            let config = load_config(config)?;
            check(&config).await
        }
    }
}

/// Explicit path must exist; otherwise discover from the working directory.
fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load(&path),
        None => Config::discover(&env::current_dir()?),
    }
}

/// Connect to the engine and print what was found.
async fn check(config: &Config) -> Result<()> {
    let engine = BollardEngine::connect(&config.engine).await?;
    let endpoint = engine.runtime_info();
    println!(
        "Engine: {} at {}",
        endpoint.runtime_type, endpoint.socket_path
    );

    let meta = engine.info().await?;
    println!(
        "Version: {} {} (API {}, {}/{})",
        meta.name, meta.version, meta.api_version, meta.os, meta.arch
    );

    let all = engine.list_containers(true).await?;
    let running = all.iter().filter(|c| c.is_running()).count();
    println!("Containers: {} running, {} total", running, all.len());

    Ok(())
}
