// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Enrollment application service: agreement signing and sponsorship entry.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::agreement::AgreementRecord;
use crate::domain::error::AccessError;
use crate::domain::identity::{Identity, UserId};
use crate::domain::repository::{AgreementRepository, SponsorshipRepository};
use crate::domain::sponsorship::{AccessType, BatchOutcome, SponsorshipBatch, SponsorshipRecord};

/// Wire format for sponsorship expiration dates, as entered on the form.
pub const EXPIRE_DATE_FORMAT: &str = "%m/%d/%Y";

/// Raw sponsorship submission: identifier lists as entered, expiration date
/// still a string. Validated into a `SponsorshipBatch` before any insert.
#[derive(Debug, Clone)]
pub struct SponsorshipRequest {
    pub sponsor_id: UserId,
    pub employee_ids: Vec<String>,
    pub non_employee_ids: Vec<String>,
    pub access_type: AccessType,
    pub research_title: String,
    pub research_desc: String,
    /// MM/DD/YYYY; blank means the sponsorship does not expire.
    pub expire_date: String,
}

pub struct EnrollmentService {
    agreements: Arc<dyn AgreementRepository>,
    sponsorships: Arc<dyn SponsorshipRepository>,
}

impl EnrollmentService {
    pub fn new(
        agreements: Arc<dyn AgreementRepository>,
        sponsorships: Arc<dyn SponsorshipRepository>,
    ) -> Self {
        Self {
            agreements,
            sponsorships,
        }
    }

    /// Record the system-access agreement for `identity` unless one already
    /// exists. Returns whether a record was inserted.
    pub async fn sign_agreement(
        &self,
        identity: &Identity,
        signature: &str,
        signed_at: DateTime<Utc>,
    ) -> Result<bool, AccessError> {
        if self.agreements.is_signed(&identity.user_id).await? {
            tracing::debug!(user = %identity.user_id, "agreement already on record");
            return Ok(false);
        }
        let record = AgreementRecord::new(
            identity.user_id.clone(),
            identity.full_name.clone(),
            signature,
            signed_at,
        );
        self.agreements.record(&record).await?;
        tracing::info!(user = %identity.user_id, "system access agreement recorded");
        Ok(true)
    }

    /// True iff the user has a signed agreement on record.
    pub async fn is_signed(&self, user_id: &UserId) -> Result<bool, AccessError> {
        Ok(self.agreements.is_signed(user_id).await?)
    }

    /// Record a sponsorship batch. A malformed expiration date fails the
    /// whole batch before anything is inserted; blank identifiers are skipped
    /// and counted in the outcome.
    pub async fn sponsor(&self, request: SponsorshipRequest) -> Result<BatchOutcome, AccessError> {
        let expire_date = parse_expire_date(&request.expire_date)?;
        let batch = SponsorshipBatch {
            sponsor_id: request.sponsor_id.clone(),
            employee_ids: request.employee_ids.iter().map(|id| UserId::new(id.as_str())).collect(),
            non_employee_ids: request
                .non_employee_ids
                .iter()
                .map(|id| UserId::new(id.as_str()))
                .collect(),
            access_type: request.access_type,
            research_title: request.research_title,
            research_desc: request.research_desc,
            expire_date,
        };
        let outcome = self.sponsorships.record_batch(&batch).await.map_err(|e| {
            tracing::error!(sponsor = %request.sponsor_id, error = %e, "sponsorship insert failed");
            e
        })?;
        tracing::info!(
            sponsor = %request.sponsor_id,
            inserted = outcome.inserted,
            skipped_blank = outcome.skipped_blank,
            "sponsorships recorded"
        );
        Ok(outcome)
    }

    /// Unexpired sponsorships a sponsor has created, for review.
    pub async fn sponsored_by(
        &self,
        sponsor_id: &UserId,
        as_of: NaiveDate,
    ) -> Result<Vec<SponsorshipRecord>, AccessError> {
        Ok(self.sponsorships.sponsored_by(sponsor_id, as_of).await?)
    }
}

/// Parse an MM/DD/YYYY expiration date. Blank input means no expiration.
pub fn parse_expire_date(input: &str) -> Result<Option<NaiveDate>, AccessError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, EXPIRE_DATE_FORMAT)
        .map(Some)
        .map_err(|_| AccessError::Parse {
            input: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_expiration_means_no_expiry() {
        assert_eq!(parse_expire_date("").unwrap(), None);
        assert_eq!(parse_expire_date("   ").unwrap(), None);
    }

    #[test]
    fn expiration_parses_month_day_year() {
        let parsed = parse_expire_date("06/30/2027").unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2027, 6, 30));
    }

    #[test]
    fn malformed_expiration_is_a_parse_error() {
        for bad in ["2027-06-30", "30/06/2027", "junk", "13/45/20"] {
            assert!(
                matches!(parse_expire_date(bad), Err(AccessError::Parse { .. })),
                "expected parse failure for {bad:?}"
            );
        }
    }
}
