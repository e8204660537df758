//! `outlook-mcp`: send mail through Microsoft Graph as an MCP tool.
//!
//! ```text
//! outlook-mcp serve                      # MCP server on stdin/stdout
//! outlook-mcp send --to a@example.com --subject Hi --body Hello
//! outlook-mcp status                     # show resolved configuration
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "outlook-mcp", about = "Outlook send_email MCP server", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON config file; environment variables still take precedence.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the send_email tool over stdio (launched by the MCP host).
    Serve,

    /// Send one email from the terminal.
    Send(commands::send::SendArgs),

    /// Show the resolved configuration and any missing values.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the MCP stream, so logs always go to stderr.
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => commands::serve::run(config).await?,
        Commands::Send(args) => commands::send::run(args, config).await?,
        Commands::Status => commands::status::run(&config),
    }

    Ok(())
}
