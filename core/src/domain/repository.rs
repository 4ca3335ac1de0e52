// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Persistence contracts for the approval store and the downstream
//! project-management database.
//!
//! One trait per aggregate, defined here and implemented in
//! `crate::infrastructure::repositories`: Postgres implementations for
//! production, in-memory implementations for tests and development.
//!
//! | Trait | Table(s) | Implementations |
//! |-------|----------|----------------|
//! | `AgreementRepository` | `system_access_users` | `InMemoryAgreementRepository`, `PostgresAgreementRepository` |
//! | `SponsorshipRepository` | `SPONSORSHIP` | `InMemorySponsorshipRepository`, `PostgresSponsorshipRepository` |
//! | `ProvisioningRepository` | `PM_USER_DATA`, `PM_PROJECT_USER_ROLES` | `InMemoryProvisioningRepository`, `PostgresProvisioningRepository` |
//! | `DisclaimerRepository` | `disclaimers`, `disclaimer_acknowledgements` | `InMemoryDisclaimerRepository`, `PostgresDisclaimerRepository` |

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::agreement::AgreementRecord;
use crate::domain::disclaimer::{Acknowledgement, Disclaimer};
use crate::domain::identity::UserId;
use crate::domain::sponsorship::{BatchOutcome, SponsorshipBatch, SponsorshipRecord};

/// Signed system-access agreements.
#[async_trait]
pub trait AgreementRepository: Send + Sync {
    /// True iff at least one agreement record exists for the user.
    async fn is_signed(&self, user_id: &UserId) -> Result<bool, StoreError>;

    /// Insert an agreement record. Callers check-then-insert; the store does
    /// not enforce uniqueness.
    async fn record(&self, agreement: &AgreementRecord) -> Result<(), StoreError>;
}

/// Sponsorship records tying sponsored users to vouching employees.
#[async_trait]
pub trait SponsorshipRepository: Send + Sync {
    /// Insert all rows of the batch in one transaction, reporting the
    /// inserted count and how many blank ids were skipped.
    async fn record_batch(&self, batch: &SponsorshipBatch) -> Result<BatchOutcome, StoreError>;

    /// Unexpired sponsorships naming `user_id` as the sponsored person.
    async fn active_for(
        &self,
        user_id: &UserId,
        as_of: NaiveDate,
    ) -> Result<Vec<SponsorshipRecord>, StoreError>;

    /// Unexpired sponsorships `sponsor_id` has created.
    async fn sponsored_by(
        &self,
        sponsor_id: &UserId,
        as_of: NaiveDate,
    ) -> Result<Vec<SponsorshipRecord>, StoreError>;
}

/// Account and role rows in the downstream project-management database.
#[async_trait]
pub trait ProvisioningRepository: Send + Sync {
    /// True iff the user already holds an active account row.
    async fn is_provisioned(&self, user_id: &UserId) -> Result<bool, StoreError>;

    /// Insert the user-data row (if absent) and one role row per role in the
    /// fixed provisioning set, atomically. A failure leaves no partial user.
    async fn grant(
        &self,
        project_id: &str,
        user_id: &UserId,
        full_name: &str,
    ) -> Result<(), StoreError>;
}

/// Release disclaimers and per-user acknowledgements.
#[async_trait]
pub trait DisclaimerRepository: Send + Sync {
    async fn current_disclaimer(&self) -> Result<Option<Disclaimer>, StoreError>;

    /// True iff the user has acknowledged the current disclaimer.
    async fn is_acknowledged(&self, user_id: &UserId) -> Result<bool, StoreError>;

    /// Record acknowledgement of the current disclaimer. Errors with
    /// `StoreError::NotFound` when no disclaimer is current.
    async fn acknowledge(
        &self,
        user_id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<Acknowledgement, StoreError>;
}

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound("row not found".to_string()),
            _ => StoreError::Database(err.to_string()),
        }
    }
}
