// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use futures::TryStreamExt;

use medgate_core::domain::directory::SearchFilter;
use medgate_core::domain::identity::{Identity, UserId};

use crate::app::App;

#[derive(Subcommand)]
pub enum DirectoryCommand {
    /// Resolve a user id to its directory attributes
    Lookup {
        /// Directory user id
        #[arg(value_name = "USER_ID")]
        user: String,

        /// Print the identity as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search by name fragment
    Search {
        /// cn/surname fragment
        #[arg(value_name = "FRAGMENT")]
        fragment: String,

        /// Restrict to faculty
        #[arg(long)]
        faculty: bool,

        /// Restrict by title substring
        #[arg(long)]
        title: Option<String>,
    },
}

pub async fn handle_command(command: DirectoryCommand, app: &App) -> Result<()> {
    match command {
        DirectoryCommand::Lookup { user, json } => {
            let identity = app.directory.resolve(&UserId::new(&user)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&identity)?);
            } else {
                print_identity(&identity);
            }
            Ok(())
        }
        DirectoryCommand::Search {
            fragment,
            faculty,
            title,
        } => {
            let filter = SearchFilter {
                faculty: faculty.then_some(true),
                title,
            };
            let mut stream = app.directory.search(&fragment, &filter);
            let mut count = 0usize;
            while let Some(identity) = stream.try_next().await? {
                print_identity(&identity);
                count += 1;
            }
            println!("{count} match(es)");
            Ok(())
        }
    }
}

fn print_identity(identity: &Identity) {
    println!(
        "{}  {} <{}>  training through: {}  {}",
        identity.user_id,
        identity.full_name.bold(),
        identity.mail,
        identity
            .training_expiration
            .map(|d| d.to_string())
            .unwrap_or_else(|| "none".to_string()),
        if identity.employee {
            "employee".green()
        } else {
            "affiliate".yellow()
        },
    );
}
