// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0

pub mod decision;
pub mod disclaimer;
pub mod enrollment;
pub mod provisioning;

pub use decision::AccessDecisionService;
pub use disclaimer::DisclaimerService;
pub use enrollment::{EnrollmentService, SponsorshipRequest, EXPIRE_DATE_FORMAT};
pub use provisioning::ProvisioningService;
