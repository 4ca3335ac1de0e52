// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use colored::Colorize;

use medgate_core::application::SponsorshipRequest;
use medgate_core::domain::identity::UserId;
use medgate_core::domain::sponsorship::AccessType;

use crate::app::App;

#[derive(Subcommand)]
pub enum SponsorCommand {
    /// Record sponsorships for a list of users
    Add {
        /// Sponsoring employee's user id
        #[arg(long)]
        sponsor: String,

        /// Comma-separated employee user ids
        #[arg(long, value_delimiter = ',')]
        employees: Vec<String>,

        /// Comma-separated non-employee user ids
        #[arg(long, value_delimiter = ',')]
        non_employees: Vec<String>,

        /// Research title
        #[arg(long)]
        title: String,

        /// Research description
        #[arg(long, default_value = "")]
        description: String,

        /// Expiration date, MM/DD/YYYY; omit for no expiration
        #[arg(long, default_value = "")]
        expires: String,

        /// Grant data access rather than view-only
        #[arg(long)]
        data_access: bool,
    },

    /// List a sponsor's unexpired sponsorships
    List {
        /// Sponsoring employee's user id
        #[arg(value_name = "SPONSOR_ID")]
        sponsor: String,
    },
}

pub async fn handle_command(command: SponsorCommand, app: &App) -> Result<()> {
    match command {
        SponsorCommand::Add {
            sponsor,
            employees,
            non_employees,
            title,
            description,
            expires,
            data_access,
        } => {
            let access_type = if data_access {
                AccessType::DataAccess
            } else {
                AccessType::ViewOnly
            };
            let outcome = app
                .enrollment
                .sponsor(SponsorshipRequest {
                    sponsor_id: UserId::new(&sponsor),
                    employee_ids: employees,
                    non_employee_ids: non_employees,
                    access_type,
                    research_title: title,
                    research_desc: description,
                    expire_date: expires,
                })
                .await?;
            println!(
                "{} {} sponsorship(s) for {}",
                "recorded".green().bold(),
                outcome.inserted,
                sponsor
            );
            if outcome.skipped_blank > 0 {
                println!(
                    "{}",
                    format!("skipped {} blank id(s)", outcome.skipped_blank).yellow()
                );
            }
            Ok(())
        }
        SponsorCommand::List { sponsor } => {
            let today = Utc::now().date_naive();
            let records = app
                .enrollment
                .sponsored_by(&UserId::new(&sponsor), today)
                .await?;
            if records.is_empty() {
                println!("no unexpired sponsorships for {sponsor}");
                return Ok(());
            }
            for record in records {
                println!(
                    "{}  {}  {}  expires: {}",
                    record.user_id,
                    record.access_type.as_code(),
                    record.research_title,
                    record
                        .expire_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "never".to_string()),
                );
            }
            Ok(())
        }
    }
}
