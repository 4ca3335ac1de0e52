// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Service wiring: configuration to connection pool and directory client,
//! handed into the application services.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPool;

use medgate_core::application::{
    AccessDecisionService, DisclaimerService, EnrollmentService, ProvisioningService,
};
use medgate_core::domain::directory::Directory;
use medgate_core::infrastructure::directory::LdapDirectory;
use medgate_core::infrastructure::repositories::{
    PostgresAgreementRepository, PostgresDisclaimerRepository, PostgresProvisioningRepository,
    PostgresSponsorshipRepository,
};
use medgate_core::infrastructure::Config;

pub struct App {
    pub config: Config,
    pub directory: Arc<dyn Directory>,
    pub decisions: Arc<AccessDecisionService>,
    pub enrollment: EnrollmentService,
    pub provisioner: ProvisioningService,
    pub disclaimers: DisclaimerService,
}

impl App {
    pub async fn connect(config: Config) -> Result<Self> {
        let pool = PgPool::connect(&config.database.url)
            .await
            .context("connecting to the approval database")?;
        let directory: Arc<dyn Directory> = Arc::new(
            LdapDirectory::connect(&config.directory)
                .await
                .context("connecting to the enterprise directory")?,
        );

        let agreements = Arc::new(PostgresAgreementRepository::new(pool.clone()));
        let sponsorships = Arc::new(PostgresSponsorshipRepository::new(pool.clone()));
        let provisioning = Arc::new(PostgresProvisioningRepository::new(pool.clone()));
        let disclaimer_repo = Arc::new(PostgresDisclaimerRepository::new(pool));

        let decisions = Arc::new(AccessDecisionService::new(
            directory.clone(),
            agreements.clone(),
            sponsorships.clone(),
        ));
        let enrollment = EnrollmentService::new(agreements, sponsorships);
        let provisioner = ProvisioningService::new(decisions.clone(), provisioning);
        let disclaimers = DisclaimerService::new(disclaimer_repo);

        Ok(Self {
            config,
            directory,
            decisions,
            enrollment,
            provisioner,
            disclaimers,
        })
    }
}
