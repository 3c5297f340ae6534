//! CLI entry point for voyager-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "voyager-rs")]
#[command(version = "0.1.0")]
#[command(about = "A blog server backed by a headless CMS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the blog server
    #[command(alias = "s")]
    Server {
        /// Port to listen on (overrides _config.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (overrides _config.yml)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List posts in the repository
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "voyager_rs=debug,info"
    } else {
        "voyager_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Server { port, ip } => {
            let voyager = voyager_rs::Voyager::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| voyager.config.server.ip.clone());
            let port = port.unwrap_or(voyager.config.server.port);

            let bind_ip = if ip == "localhost" { "127.0.0.1" } else { &ip };
            let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            voyager.serve(addr).await?;
        }

        Commands::List => {
            let voyager = voyager_rs::Voyager::new(&base_dir)?;
            voyager.list().await?;
        }

        Commands::Version => {
            println!("voyager-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
