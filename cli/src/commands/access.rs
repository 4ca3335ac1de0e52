// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! `decide` and `provision` commands.

use anyhow::Result;
use colored::Colorize;

use medgate_core::domain::decision::AccessDecision;
use medgate_core::domain::error::AccessError;
use medgate_core::domain::identity::UserId;

use crate::app::App;

pub async fn decide(app: &App, user: &str) -> Result<()> {
    let user_id = UserId::new(user);
    let (identity, decision) = app.decisions.evaluate(&user_id).await?;
    println!(
        "{} <{}>  training through: {}",
        identity.full_name.bold(),
        identity.mail,
        identity
            .training_expiration
            .map(|d| d.to_string())
            .unwrap_or_else(|| "none".to_string()),
    );
    match decision {
        AccessDecision::Qualified { role } => {
            println!("{} role {}", "qualified".green().bold(), role.as_code());
        }
        AccessDecision::NotQualified { reason } => {
            println!("{}: {}", "not qualified".red().bold(), reason);
        }
    }
    Ok(())
}

pub async fn provision(app: &App, user: &str, project: Option<&str>) -> Result<()> {
    let user_id = UserId::new(user);
    let project = project.unwrap_or(&app.config.project_id);

    if app.provisioner.is_provisioned(&user_id).await? {
        println!("{user_id} already holds an active account; existing roles in {project} are kept");
    }

    match app.provisioner.provision(project, &user_id).await {
        Ok(role) => {
            println!(
                "{} {} into {} with role {}",
                "provisioned".green().bold(),
                user_id,
                project,
                role.as_code()
            );
            Ok(())
        }
        Err(AccessError::NotQualified { reason, .. }) => {
            println!("{}: {}", "refused".red().bold(), reason);
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}
