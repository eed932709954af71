use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

// Core modules
mod cli;
mod commands;
mod config;

// Cloud + transport layers
mod cloud;
mod deploy;
mod naming;
mod publish_profile;
mod warmup;

// Shared plumbing
mod error;
mod tools;
mod ui;

use cli::{Cli, Commands};
use commands::run::RunOptions;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with LOGGING env var support
    // LOGGING=debug,info,warn,error or just LOGGING=debug
    let log_level = std::env::var("LOGGING")
        .or_else(|_| std::env::var("LOG_LEVEL"))
        .unwrap_or_else(|_| {
            if cli.verbose {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false) // Disable ANSI escape codes for cleaner output
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            region,
            asset,
            git_source,
            public_repo,
            public_branch,
            github_repo,
            github_branch,
            github_token,
            package_uri,
            warmup_delay,
            skip_warmup,
            keep,
        } => {
            commands::run::execute(RunOptions {
                region,
                asset: PathBuf::from(asset),
                git_source: PathBuf::from(git_source),
                public_repo,
                public_branch,
                github_repo,
                github_branch,
                github_token,
                package_uri,
                warmup_delay,
                skip_warmup,
                keep,
            })
            .await
        }
        Commands::Teardown { name } => commands::teardown::execute(&name).await,
    };

    // Failures are logged, never turned into a non-zero exit: the walkthrough
    // has already cleaned up after itself by the time an error reaches here.
    if let Err(e) = result {
        ui::print_error(&e.to_string());
    }

    Ok(())
}
