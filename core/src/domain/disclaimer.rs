// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::identity::UserId;

/// A release-notes disclaimer users are asked to acknowledge. At most one is
/// current at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disclaimer {
    pub url: String,
    pub current: bool,
}

/// One user's acknowledgement of a disclaimer. Kept for audit; the access
/// decision does not gate on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub user_id: UserId,
    pub disclaimer_url: String,
    pub acknowledged_at: DateTime<Utc>,
}
