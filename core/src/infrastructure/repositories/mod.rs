// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Store implementations.
//!
//! Postgres repositories for production, in-memory repositories for tests
//! and development. Both sides implement the contracts defined in
//! `crate::domain::repository`.

pub mod postgres_agreement;
pub mod postgres_disclaimer;
pub mod postgres_provisioning;
pub mod postgres_sponsorship;

pub use postgres_agreement::PostgresAgreementRepository;
pub use postgres_disclaimer::PostgresDisclaimerRepository;
pub use postgres_provisioning::PostgresProvisioningRepository;
pub use postgres_sponsorship::PostgresSponsorshipRepository;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::agreement::AgreementRecord;
use crate::domain::disclaimer::{Acknowledgement, Disclaimer};
use crate::domain::grant::{GrantRecord, PROVISION_ROLES};
use crate::domain::identity::UserId;
use crate::domain::repository::{
    AgreementRepository, DisclaimerRepository, ProvisioningRepository, SponsorshipRepository,
    StoreError,
};
use crate::domain::sponsorship::{BatchOutcome, SponsorshipBatch, SponsorshipRecord};

fn poisoned() -> StoreError {
    StoreError::Database("mutex poisoned".to_string())
}

#[derive(Clone, Default)]
pub struct InMemoryAgreementRepository {
    records: Arc<Mutex<Vec<AgreementRecord>>>,
}

impl InMemoryAgreementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AgreementRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl AgreementRepository for InMemoryAgreementRepository {
    async fn is_signed(&self, user_id: &UserId) -> Result<bool, StoreError> {
        let records = self.records.lock().map_err(|_| poisoned())?;
        Ok(records.iter().any(|r| r.user_id == *user_id))
    }

    async fn record(&self, agreement: &AgreementRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().map_err(|_| poisoned())?;
        records.push(agreement.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemorySponsorshipRepository {
    records: Arc<Mutex<Vec<SponsorshipRecord>>>,
}

impl InMemorySponsorshipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<SponsorshipRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Seed a record directly, bypassing batch validation.
    pub fn insert(&self, record: SponsorshipRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }
}

#[async_trait]
impl SponsorshipRepository for InMemorySponsorshipRepository {
    async fn record_batch(&self, batch: &SponsorshipBatch) -> Result<BatchOutcome, StoreError> {
        let (rows, skipped_blank) = batch.rows();
        let mut records = self.records.lock().map_err(|_| poisoned())?;
        let inserted = rows.len();
        records.extend(rows);
        Ok(BatchOutcome {
            inserted,
            skipped_blank,
        })
    }

    async fn active_for(
        &self,
        user_id: &UserId,
        as_of: NaiveDate,
    ) -> Result<Vec<SponsorshipRecord>, StoreError> {
        let records = self.records.lock().map_err(|_| poisoned())?;
        Ok(records
            .iter()
            .filter(|r| r.user_id == *user_id && r.is_active(as_of))
            .cloned()
            .collect())
    }

    async fn sponsored_by(
        &self,
        sponsor_id: &UserId,
        as_of: NaiveDate,
    ) -> Result<Vec<SponsorshipRecord>, StoreError> {
        let records = self.records.lock().map_err(|_| poisoned())?;
        Ok(records
            .iter()
            .filter(|r| r.sponsor_id == *sponsor_id && r.is_active(as_of))
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryProvisioningRepository {
    users: Arc<Mutex<HashMap<UserId, String>>>,
    grants: Arc<Mutex<Vec<GrantRecord>>>,
    /// When set, `grant` fails without writing anything, modeling a rolled
    /// back transaction.
    fail_roles: Arc<Mutex<bool>>,
}

impl InMemoryProvisioningRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grants(&self) -> Vec<GrantRecord> {
        self.grants.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().map(|u| u.len()).unwrap_or(0)
    }

    pub fn fail_role_inserts(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_roles.lock() {
            *flag = fail;
        }
    }
}

#[async_trait]
impl ProvisioningRepository for InMemoryProvisioningRepository {
    async fn is_provisioned(&self, user_id: &UserId) -> Result<bool, StoreError> {
        let users = self.users.lock().map_err(|_| poisoned())?;
        Ok(users.contains_key(user_id))
    }

    async fn grant(
        &self,
        project_id: &str,
        user_id: &UserId,
        full_name: &str,
    ) -> Result<(), StoreError> {
        if *self.fail_roles.lock().map_err(|_| poisoned())? {
            return Err(StoreError::Database("injected role insert failure".to_string()));
        }
        let mut users = self.users.lock().map_err(|_| poisoned())?;
        let mut grants = self.grants.lock().map_err(|_| poisoned())?;
        users
            .entry(user_id.clone())
            .or_insert_with(|| full_name.to_string());
        for role in PROVISION_ROLES {
            let already_granted = grants.iter().any(|g| {
                g.project_id == project_id && g.user_id == *user_id && g.role == role
            });
            if !already_granted {
                grants.push(GrantRecord::active(project_id, user_id.clone(), role));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryDisclaimerRepository {
    current: Arc<Mutex<Option<Disclaimer>>>,
    acks: Arc<Mutex<Vec<Acknowledgement>>>,
}

impl InMemoryDisclaimerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_current(&self, url: impl Into<String>) {
        if let Ok(mut current) = self.current.lock() {
            *current = Some(Disclaimer {
                url: url.into(),
                current: true,
            });
        }
    }
}

#[async_trait]
impl DisclaimerRepository for InMemoryDisclaimerRepository {
    async fn current_disclaimer(&self) -> Result<Option<Disclaimer>, StoreError> {
        let current = self.current.lock().map_err(|_| poisoned())?;
        Ok(current.clone())
    }

    async fn is_acknowledged(&self, user_id: &UserId) -> Result<bool, StoreError> {
        let current = self.current.lock().map_err(|_| poisoned())?;
        let Some(disclaimer) = current.as_ref() else {
            return Ok(false);
        };
        let acks = self.acks.lock().map_err(|_| poisoned())?;
        Ok(acks
            .iter()
            .any(|a| a.user_id == *user_id && a.disclaimer_url == disclaimer.url))
    }

    async fn acknowledge(
        &self,
        user_id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<Acknowledgement, StoreError> {
        let current = {
            let current = self.current.lock().map_err(|_| poisoned())?;
            current
                .clone()
                .ok_or_else(|| StoreError::NotFound("no current disclaimer".to_string()))?
        };
        let mut acks = self.acks.lock().map_err(|_| poisoned())?;
        if let Some(existing) = acks
            .iter()
            .find(|a| a.user_id == *user_id && a.disclaimer_url == current.url)
        {
            return Ok(existing.clone());
        }
        let ack = Acknowledgement {
            user_id: user_id.clone(),
            disclaimer_url: current.url,
            acknowledged_at: at,
        };
        acks.push(ack.clone());
        Ok(ack)
    }
}
