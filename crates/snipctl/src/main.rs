use anyhow::Result;
use clap::Parser;
use snipctl_core::Config;
use tracing::{debug, info, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod output;
mod progress;

use cli::{Cli, Commands};
use connection::ConnectionManager;
use error::SnipCtlError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load configuration from specified path or default location
    let loaded = if let Some(config_file) = &cli.config_file {
        let path = std::path::PathBuf::from(config_file);
        debug!("Loading config from explicit path: {:?}", path);
        Config::load_from_path(&path).map(|config| (config, Some(path)))
    } else {
        debug!("Loading config from default location");
        Config::load().map(|config| (config, None))
    };

    let (config, config_path) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            SnipCtlError::from(e).print_diagnostic();
            std::process::exit(1);
        }
    };
    let conn_mgr = ConnectionManager::with_config_path(config, config_path);

    if let Err(e) = execute_command(&cli, &conn_mgr).await {
        e.print_diagnostic();
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    // Check for RUST_LOG env var first, then fall back to verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "snipctl=warn,snipctl_core=warn",
            1 => "snipctl=info,snipctl_core=info",
            2 => "snipctl=debug,snipctl_core=debug",
            _ => "snipctl=trace,snipctl_core=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

async fn execute_command(cli: &Cli, conn_mgr: &ConnectionManager) -> Result<(), SnipCtlError> {
    trace!("Executing command: {:?}", cli.command);
    info!("Command: {}", format_command(&cli.command));

    let start = std::time::Instant::now();
    let result = match &cli.command {
        Commands::Version => {
            debug!("Showing version information");
            match cli.output {
                cli::OutputFormat::Json | cli::OutputFormat::Yaml => {
                    let output_data = serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "name": env!("CARGO_PKG_NAME"),
                    });
                    output::print_output(&output_data, cli.output, None)
                }
                _ => {
                    println!("snipctl {}", env!("CARGO_PKG_VERSION"));
                    Ok(())
                }
            }
        }
        Commands::Profile(profile_cmd) => {
            commands::profile::handle_profile_command(profile_cmd, conn_mgr, cli).await
        }
        Commands::Disk(cmd) => commands::disk::handle_disk_command(cmd, conn_mgr, cli).await,
        Commands::EntryType(cmd) => {
            commands::entry_type::handle_entry_type_command(cmd, conn_mgr, cli).await
        }
        Commands::Secret(cmd) => commands::secret::handle_secret_command(cmd, conn_mgr, cli).await,
        Commands::Prompt(cmd) => commands::prompt::handle_prompt_command(cmd, conn_mgr, cli).await,
        Commands::Tts(cmd) => commands::tts::handle_tts_command(cmd, conn_mgr, cli).await,
    };

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!("Command completed successfully in {:?}", duration),
        Err(e) => debug!("Command failed after {:?}: {}", duration, e),
    }

    result
}

/// Format command for human-readable logging, without credentials
fn format_command(command: &Commands) -> String {
    match command {
        Commands::Version => "version".to_string(),
        Commands::Profile(cmd) => {
            use cli::ProfileCommands::*;
            match cmd {
                List => "profile list".to_string(),
                Path => "profile path".to_string(),
                Show { name } => format!("profile show {}", name.as_deref().unwrap_or("")),
                Set { name, .. } => format!("profile set {} [credentials redacted]", name),
                Remove { name } => format!("profile remove {}", name),
                Default { name } => format!("profile default {}", name),
            }
        }
        Commands::Disk(cmd) => format!("disk {:?}", cmd),
        Commands::EntryType(cmd) => format!("entry-type {:?}", cmd),
        Commands::Secret(cmd) => format!("secret {:?}", cmd),
        Commands::Prompt(cmd) => format!("prompt {:?}", cmd),
        Commands::Tts(cmd) => format!("tts {:?}", cmd),
    }
}
