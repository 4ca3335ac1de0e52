// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Access-decision application service.
//!
//! Gathers the inputs the pure decision rule needs (directory attributes,
//! agreement flag, sponsorship records) and evaluates it. Store and directory
//! failures propagate as errors, never as a grant.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::domain::decision::{self, AccessDecision};
use crate::domain::directory::Directory;
use crate::domain::error::AccessError;
use crate::domain::identity::{Identity, UserId};
use crate::domain::repository::{AgreementRepository, SponsorshipRepository};

pub struct AccessDecisionService {
    directory: Arc<dyn Directory>,
    agreements: Arc<dyn AgreementRepository>,
    sponsorships: Arc<dyn SponsorshipRepository>,
}

impl AccessDecisionService {
    pub fn new(
        directory: Arc<dyn Directory>,
        agreements: Arc<dyn AgreementRepository>,
        sponsorships: Arc<dyn SponsorshipRepository>,
    ) -> Self {
        Self {
            directory,
            agreements,
            sponsorships,
        }
    }

    /// Evaluate eligibility as of today.
    pub async fn evaluate(
        &self,
        user_id: &UserId,
    ) -> Result<(Identity, AccessDecision), AccessError> {
        self.evaluate_as_of(user_id, Utc::now().date_naive()).await
    }

    /// Evaluate eligibility as of an explicit date. A directory miss is a
    /// `NotFound` error, distinct from a denial.
    pub async fn evaluate_as_of(
        &self,
        user_id: &UserId,
        as_of: NaiveDate,
    ) -> Result<(Identity, AccessDecision), AccessError> {
        let identity = self.directory.resolve(user_id).await.map_err(|e| {
            tracing::warn!(user = %user_id, error = %e, "directory lookup failed");
            AccessError::from(e)
        })?;

        let signed = self.agreements.is_signed(user_id).await.map_err(|e| {
            tracing::error!(user = %user_id, error = %e, "agreement check failed");
            e
        })?;

        // Employees qualify without sponsorship; skip the query for them.
        let sponsorships = if identity.employee {
            Vec::new()
        } else {
            self.sponsorships
                .active_for(user_id, as_of)
                .await
                .map_err(|e| {
                    tracing::error!(user = %user_id, error = %e, "sponsorship lookup failed");
                    e
                })?
        };

        let outcome = decision::evaluate(&identity, signed, &sponsorships, as_of);
        tracing::info!(user = %user_id, qualified = outcome.is_qualified(), "access evaluated");
        Ok((identity, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::DenialReason;
    use crate::domain::directory::{DirectoryError, SearchFilter};
    use crate::domain::repository::StoreError;
    use crate::domain::sponsorship::{BatchOutcome, SponsorshipBatch, SponsorshipRecord};
    use async_trait::async_trait;
    use futures::stream::{self, BoxStream};

    struct UnreachableDirectory;

    #[async_trait]
    impl Directory for UnreachableDirectory {
        async fn resolve(&self, _user_id: &UserId) -> Result<Identity, DirectoryError> {
            Err(DirectoryError::Unreachable("connection refused".to_string()))
        }

        fn search<'a>(
            &'a self,
            _fragment: &'a str,
            _filter: &'a SearchFilter,
        ) -> BoxStream<'a, Result<Identity, DirectoryError>> {
            Box::pin(stream::empty())
        }
    }

    struct FailingAgreements;

    #[async_trait]
    impl AgreementRepository for FailingAgreements {
        async fn is_signed(&self, _user_id: &UserId) -> Result<bool, StoreError> {
            Err(StoreError::Database("pool exhausted".to_string()))
        }

        async fn record(
            &self,
            _agreement: &crate::domain::agreement::AgreementRecord,
        ) -> Result<(), StoreError> {
            Ok(())
        }
    }

    struct EmptySponsorships;

    #[async_trait]
    impl SponsorshipRepository for EmptySponsorships {
        async fn record_batch(
            &self,
            _batch: &SponsorshipBatch,
        ) -> Result<BatchOutcome, StoreError> {
            Ok(BatchOutcome {
                inserted: 0,
                skipped_blank: 0,
            })
        }

        async fn active_for(
            &self,
            _user_id: &UserId,
            _as_of: NaiveDate,
        ) -> Result<Vec<SponsorshipRecord>, StoreError> {
            Ok(vec![])
        }

        async fn sponsored_by(
            &self,
            _sponsor_id: &UserId,
            _as_of: NaiveDate,
        ) -> Result<Vec<SponsorshipRecord>, StoreError> {
            Ok(vec![])
        }
    }

    struct StaticDirectory(Identity);

    #[async_trait]
    impl Directory for StaticDirectory {
        async fn resolve(&self, user_id: &UserId) -> Result<Identity, DirectoryError> {
            if *user_id == self.0.user_id {
                Ok(self.0.clone())
            } else {
                Err(DirectoryError::NotFound(user_id.clone()))
            }
        }

        fn search<'a>(
            &'a self,
            _fragment: &'a str,
            _filter: &'a SearchFilter,
        ) -> BoxStream<'a, Result<Identity, DirectoryError>> {
            Box::pin(stream::iter(vec![Ok(self.0.clone())]))
        }
    }

    fn jdoe() -> Identity {
        Identity {
            user_id: UserId::new("jdoe"),
            full_name: "Jane Doe".to_string(),
            mail: "jdoe@example.edu".to_string(),
            training_expiration: NaiveDate::from_ymd_opt(2099, 1, 1),
            employee: true,
            title: None,
        }
    }

    #[tokio::test]
    async fn directory_failure_is_an_error_not_a_denial() {
        let svc = AccessDecisionService::new(
            Arc::new(UnreachableDirectory),
            Arc::new(FailingAgreements),
            Arc::new(EmptySponsorships),
        );
        let err = svc.evaluate(&UserId::new("jdoe")).await.unwrap_err();
        assert!(matches!(err, AccessError::Directory(_)));
    }

    #[tokio::test]
    async fn store_failure_propagates_instead_of_granting() {
        let svc = AccessDecisionService::new(
            Arc::new(StaticDirectory(jdoe())),
            Arc::new(FailingAgreements),
            Arc::new(EmptySponsorships),
        );
        let err = svc.evaluate(&UserId::new("jdoe")).await.unwrap_err();
        assert!(matches!(err, AccessError::Store(_)));
    }

    #[tokio::test]
    async fn unknown_identity_is_not_found() {
        let svc = AccessDecisionService::new(
            Arc::new(StaticDirectory(jdoe())),
            Arc::new(FailingAgreements),
            Arc::new(EmptySponsorships),
        );
        let err = svc.evaluate(&UserId::new("nobody")).await.unwrap_err();
        assert!(matches!(err, AccessError::NotFound(id) if id.as_str() == "nobody"));
    }

    #[tokio::test]
    async fn unsigned_employee_is_denied_not_errored() {
        struct NeverSigned;

        #[async_trait]
        impl AgreementRepository for NeverSigned {
            async fn is_signed(&self, _user_id: &UserId) -> Result<bool, StoreError> {
                Ok(false)
            }

            async fn record(
                &self,
                _agreement: &crate::domain::agreement::AgreementRecord,
            ) -> Result<(), StoreError> {
                Ok(())
            }
        }

        let svc = AccessDecisionService::new(
            Arc::new(StaticDirectory(jdoe())),
            Arc::new(NeverSigned),
            Arc::new(EmptySponsorships),
        );
        let (_, decision) = svc.evaluate(&UserId::new("jdoe")).await.unwrap();
        assert_eq!(
            decision,
            AccessDecision::NotQualified {
                reason: DenialReason::AgreementNotSigned
            }
        );
    }
}
