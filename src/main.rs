// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! GreenLoop - waste collection rewards client
//!
//! Entry point for the GreenLoop CLI application.

use clap::Parser;

use greenloop::cli::{Cli, Commands};
use greenloop::config::Settings;
use greenloop::error::Result;

#[path = "main/cli_commands.rs"]
mod cli_commands;

use cli_commands::{run_chat, run_classify, run_login, run_logout, run_register, run_whoami};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` turns on crate diagnostics without knowing target names. `RUST_LOG` still applies.
    if cli.verbose > 0 {
        for directive in [
            "greenloop.session=debug",
            "greenloop.auth=debug",
            "greenloop.assistant=debug",
            "greenloop.llm=debug",
        ] {
            if let Ok(parsed) = directive.parse() {
                env_filter = env_filter.add_directive(parsed);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Load settings
    let settings = match cli.config {
        Some(ref path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    let format = cli.format;
    match cli.command {
        Commands::Chat(args) => run_chat(args, &settings).await,
        Commands::Classify(args) => run_classify(args, &settings, format).await,
        Commands::Login(args) => run_login(args, &settings).await,
        Commands::Register(args) => run_register(args, &settings).await,
        Commands::Logout => run_logout(&settings).await,
        Commands::Whoami => run_whoami(&settings, format).await,
    }
}
