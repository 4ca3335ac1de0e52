// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use colored::Colorize;

use medgate_core::domain::identity::UserId;

use crate::app::App;

#[derive(Subcommand)]
pub enum AgreementCommand {
    /// Check whether a user has signed the system access agreement
    Status {
        /// Directory user id
        #[arg(value_name = "USER_ID")]
        user: String,
    },

    /// Record a signed system access agreement
    Sign {
        /// Directory user id
        #[arg(value_name = "USER_ID")]
        user: String,

        /// Signature text as typed by the signer
        #[arg(long)]
        signature: String,
    },
}

pub async fn handle_command(command: AgreementCommand, app: &App) -> Result<()> {
    match command {
        AgreementCommand::Status { user } => {
            let signed = app.enrollment.is_signed(&UserId::new(&user)).await?;
            if signed {
                println!("{user}: {}", "signed".green());
            } else {
                println!("{user}: {}", "not signed".yellow());
            }
            Ok(())
        }
        AgreementCommand::Sign { user, signature } => {
            // Full name comes from the directory, not the operator.
            let identity = app.directory.resolve(&UserId::new(&user)).await?;
            let inserted = app
                .enrollment
                .sign_agreement(&identity, &signature, Utc::now())
                .await?;
            if inserted {
                println!("agreement recorded for {}", identity.full_name.bold());
            } else {
                println!("{user} had already signed; nothing recorded");
            }
            Ok(())
        }
    }
}
