//! Health/hello HTTP service entry point.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use healthcheck_service::config::Config;
use healthcheck_service::server;

/// Keeps `server::run`'s port announcement enabled.
const ANNOUNCE_DIRECTIVE: &str = "healthcheck_service::server=info";

/// Minimal health/hello HTTP service.
#[derive(Parser, Debug)]
#[command(name = "healthcheck-service")]
#[command(about = "Serves GET /health and GET /hello as JSON")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Port to listen on (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service (default).
    Serve,

    /// Print the resolved configuration and exit.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load()?;
    if let Some(port) = args.port {
        config.port = port;
    }

    // Initialize logging. The startup announcement stays visible whatever
    // RUST_LOG says.
    let filter = if args.verbose {
        EnvFilter::new("healthcheck_service=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let filter = filter.add_directive(ANNOUNCE_DIRECTIVE.parse()?);

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve) | None => cmd_serve(&config).await,
    }
}

/// Print the resolved configuration.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("HEALTHCHECK SERVICE - CONFIGURATION");
    println!("======================================================================");
    println!("  Listen Address: {}", config.socket_addr());
    println!("  Health Author:  {}", config.health_author);
    println!("  Hello Author:   {}", config.hello_author);
    println!("  Log Filter:     {}", config.rust_log);
    println!("======================================================================");

    Ok(())
}

/// Run the service until the process is killed.
async fn cmd_serve(config: &Config) -> anyhow::Result<()> {
    server::run(config).await?;
    Ok(())
}
