// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0

pub mod agreement;
pub mod decision;
pub mod directory;
pub mod disclaimer;
pub mod error;
pub mod grant;
pub mod identity;
pub mod repository;
pub mod sponsorship;

pub use agreement::AgreementRecord;
pub use decision::{AccessDecision, DenialReason};
pub use directory::{Directory, DirectoryError, SearchFilter};
pub use disclaimer::{Acknowledgement, Disclaimer};
pub use error::AccessError;
pub use grant::{GrantRecord, UserRole, PROVISION_ROLES};
pub use identity::{Identity, UserId};
pub use repository::{
    AgreementRepository, DisclaimerRepository, ProvisioningRepository, SponsorshipRepository,
    StoreError,
};
pub use sponsorship::{
    AccessType, BatchOutcome, EmploymentFlag, SponsorshipBatch, SponsorshipRecord,
};
