// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::identity::UserId;

/// A signed system-access agreement (`system_access_users` row).
///
/// Created once per identity and never updated. Uniqueness is enforced by a
/// check-then-insert at the service layer, not by the store; a duplicate row
/// under a racing pair of requests is an accepted limitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementRecord {
    pub user_id: UserId,
    pub full_name: String,
    /// Free-text signature as typed by the signer.
    pub signature: String,
    pub signed_date: DateTime<Utc>,
}

impl AgreementRecord {
    pub fn new(
        user_id: UserId,
        full_name: impl Into<String>,
        signature: impl Into<String>,
        signed_date: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            full_name: full_name.into(),
            signature: signature.into(),
            signed_date,
        }
    }
}
