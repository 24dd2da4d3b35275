// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines the serve, check, and init subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dockbridge")]
#[command(about = "REST gateway for local Docker and Podman container operations")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP gateway
    Serve {
        /// Path to the configuration file (default: discovered in the current directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Address to bind, overriding the configuration file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overriding the configuration file
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Connect to the container engine and report what was found
    Check {
        /// Path to the configuration file (default: discovered in the current directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize a new dockbridge.yml configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}
