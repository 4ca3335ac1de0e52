// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use colored::Colorize;

use medgate_core::domain::identity::UserId;

use crate::app::App;

#[derive(Subcommand)]
pub enum DisclaimerCommand {
    /// Show the current disclaimer
    Current,

    /// Check whether a user has acknowledged the current disclaimer
    Status {
        /// Directory user id
        #[arg(value_name = "USER_ID")]
        user: String,
    },

    /// Record a user's acknowledgement of the current disclaimer
    Ack {
        /// Directory user id
        #[arg(value_name = "USER_ID")]
        user: String,
    },
}

pub async fn handle_command(command: DisclaimerCommand, app: &App) -> Result<()> {
    match command {
        DisclaimerCommand::Current => {
            match app.disclaimers.current().await? {
                Some(disclaimer) => println!("{}", disclaimer.url),
                None => println!("{}", "no current disclaimer".yellow()),
            }
            Ok(())
        }
        DisclaimerCommand::Status { user } => {
            let acked = app.disclaimers.is_acknowledged(&UserId::new(&user)).await?;
            if acked {
                println!("{user}: {}", "acknowledged".green());
            } else {
                println!("{user}: {}", "not acknowledged".yellow());
            }
            Ok(())
        }
        DisclaimerCommand::Ack { user } => {
            let ack = app
                .disclaimers
                .acknowledge(&UserId::new(&user), Utc::now())
                .await?;
            println!("{user} acknowledged {}", ack.disclaimer_url);
            Ok(())
        }
    }
}
