// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0

//! # medgate CLI
//!
//! Operator front end for the research-data access approval service.
//!
//! ## Commands
//!
//! - `medgate decide <user>` - Evaluate access eligibility
//! - `medgate agreement status|sign` - System access agreement
//! - `medgate sponsor add|list` - Sponsorship entry and review
//! - `medgate provision <user>` - Provision a qualified user downstream
//! - `medgate directory lookup|search` - Enterprise directory queries
//! - `medgate disclaimer current|status|ack` - Disclaimer acknowledgements

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod commands;

use app::App;
use commands::{AgreementCommand, DirectoryCommand, DisclaimerCommand, SponsorCommand};
use medgate_core::infrastructure::Config;

/// medgate - research-data access approval
#[derive(Parser)]
#[command(name = "medgate")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "MEDGATE_CONFIG_PATH",
        value_name = "FILE",
        default_value = "medgate.yaml"
    )]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "MEDGATE_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate access eligibility for a user
    Decide {
        /// Directory user id
        #[arg(value_name = "USER_ID")]
        user: String,
    },

    /// System access agreement operations
    Agreement {
        #[command(subcommand)]
        command: AgreementCommand,
    },

    /// Sponsorship entry and review
    Sponsor {
        #[command(subcommand)]
        command: SponsorCommand,
    },

    /// Provision a qualified user into the downstream project
    Provision {
        /// Directory user id
        #[arg(value_name = "USER_ID")]
        user: String,

        /// Project id (defaults to the configured project)
        #[arg(long)]
        project: Option<String>,
    },

    /// Enterprise directory queries
    Directory {
        #[command(subcommand)]
        command: DirectoryCommand,
    },

    /// Disclaimer acknowledgements
    Disclaimer {
        #[command(subcommand)]
        command: DisclaimerCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load(&cli.config)?;
    tracing::debug!(path = %cli.config.display(), "configuration loaded");
    let app = App::connect(config).await?;

    match cli.command {
        Commands::Decide { user } => commands::access::decide(&app, &user).await,
        Commands::Agreement { command } => commands::agreement::handle_command(command, &app).await,
        Commands::Sponsor { command } => commands::sponsor::handle_command(command, &app).await,
        Commands::Provision { user, project } => {
            commands::access::provision(&app, &user, project.as_deref()).await
        }
        Commands::Directory { command } => commands::directory::handle_command(command, &app).await,
        Commands::Disclaimer { command } => {
            commands::disclaimer::handle_command(command, &app).await
        }
    }
}
