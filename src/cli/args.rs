// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for GreenLoop.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// GreenLoop - waste collection and rewards from your terminal
#[derive(Parser, Debug)]
#[command(name = "greenloop")]
#[command(version, about = "GreenLoop client: account session and AI waste assistant")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the GreenLoop assistant a question
    Chat(ChatArgs),

    /// Classify a photo of waste
    Classify(ClassifyArgs),

    /// Log in to your GreenLoop account
    Login(LoginArgs),

    /// Create a GreenLoop account
    Register(RegisterArgs),

    /// Log out and forget stored credentials
    Logout,

    /// Show the logged-in account
    Whoami,
}

/// Arguments for the chat subcommand
#[derive(clap::Args, Debug)]
pub struct ChatArgs {
    /// Message to send
    pub message: String,
}

/// Arguments for the classify subcommand
#[derive(clap::Args, Debug)]
pub struct ClassifyArgs {
    /// Path to a JPEG, PNG or WebP image
    pub image: PathBuf,
}

/// Arguments for the login subcommand
#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Account password
    #[arg(short, long)]
    pub password: String,
}

/// Arguments for the register subcommand
#[derive(clap::Args, Debug)]
pub struct RegisterArgs {
    /// Given name
    #[arg(long)]
    pub first_name: String,

    /// Family name
    #[arg(long)]
    pub last_name: String,

    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Account password
    #[arg(short, long)]
    pub password: String,
}

/// Output formats
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,

    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_chat() {
        let cli = Cli::parse_from(["greenloop", "chat", "Pin cũ bỏ ở đâu?"]);
        assert_eq!(cli.verbose, 0);
        assert!(matches!(cli.format, OutputFormat::Text));
        match cli.command {
            Commands::Chat(args) => assert_eq!(args.message, "Pin cũ bỏ ở đâu?"),
            other => panic!("Expected Chat, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_classify_with_json_format() {
        let cli = Cli::parse_from(["greenloop", "--format", "json", "classify", "photo.jpg"]);
        assert!(matches!(cli.format, OutputFormat::Json));
        match cli.command {
            Commands::Classify(args) => assert_eq!(args.image, PathBuf::from("photo.jpg")),
            other => panic!("Expected Classify, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_login() {
        let cli = Cli::parse_from(["greenloop", "login", "-e", "a@b.com", "-p", "x"]);
        match cli.command {
            Commands::Login(args) => {
                assert_eq!(args.email, "a@b.com");
                assert_eq!(args.password, "x");
            }
            other => panic!("Expected Login, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_register() {
        let cli = Cli::parse_from([
            "greenloop",
            "register",
            "--first-name",
            "Lan",
            "--last-name",
            "Nguyen",
            "--email",
            "lan@example.com",
            "--password",
            "secret",
        ]);
        match cli.command {
            Commands::Register(args) => {
                assert_eq!(args.first_name, "Lan");
                assert_eq!(args.last_name, "Nguyen");
            }
            other => panic!("Expected Register, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["greenloop", "whoami", "-vv", "--config", "/tmp/s.json"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.json")));
        assert!(matches!(cli.command, Commands::Whoami));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["greenloop"]).is_err());
    }
}
