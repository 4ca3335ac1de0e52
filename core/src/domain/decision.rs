// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Pure access-decision rule.
//!
//! Given resolved identity attributes and the stored agreement/sponsorship
//! state, decide eligibility and the role to grant. No side effects here;
//! the application layer gathers inputs and acts on the outcome.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::identity::Identity;
use crate::domain::sponsorship::{AccessType, SponsorshipRecord};

/// Why an identity did not qualify. Ordered by the checks: training first,
/// then agreement, then sponsorship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialReason {
    TrainingMissing,
    TrainingExpired,
    AgreementNotSigned,
    NotSponsored,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DenialReason::TrainingMissing => "no human-subjects training on record",
            DenialReason::TrainingExpired => "human-subjects training has expired",
            DenialReason::AgreementNotSigned => "system access agreement not signed",
            DenialReason::NotSponsored => "no unexpired sponsorship on record",
        };
        f.write_str(msg)
    }
}

/// Outcome of evaluating an identity for access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessDecision {
    Qualified { role: AccessType },
    NotQualified { reason: DenialReason },
}

impl AccessDecision {
    pub fn is_qualified(&self) -> bool {
        matches!(self, AccessDecision::Qualified { .. })
    }
}

/// Evaluate the decision rule as of `as_of`.
///
/// Training must be current and the agreement signed; a non-employee must
/// additionally hold at least one unexpired sponsorship, which also supplies
/// the role. Employees default to DATA_ACCESS. Missing training dates fail
/// closed; a grant must never follow from an undecidable input.
pub fn evaluate(
    identity: &Identity,
    agreement_signed: bool,
    sponsorships: &[SponsorshipRecord],
    as_of: NaiveDate,
) -> AccessDecision {
    if identity.training_expiration.is_none() {
        return AccessDecision::NotQualified {
            reason: DenialReason::TrainingMissing,
        };
    }
    if !identity.trained_through(as_of) {
        return AccessDecision::NotQualified {
            reason: DenialReason::TrainingExpired,
        };
    }
    if !agreement_signed {
        return AccessDecision::NotQualified {
            reason: DenialReason::AgreementNotSigned,
        };
    }
    if identity.employee {
        return AccessDecision::Qualified {
            role: AccessType::DataAccess,
        };
    }
    match sponsorships.iter().find(|s| s.is_active(as_of)) {
        Some(sponsorship) => AccessDecision::Qualified {
            role: sponsorship.access_type,
        },
        None => AccessDecision::NotQualified {
            reason: DenialReason::NotSponsored,
        },
    }
}
