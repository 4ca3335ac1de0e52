// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Directory user identifier (the `cn` attribute in the enterprise directory).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank identifiers carry no information and are skipped by batch
    /// operations rather than inserted.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identity attributes resolved from the enterprise directory.
///
/// Read-only from this system's perspective; the directory is the source of
/// truth for names, mail, employment, and human-subjects training status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub full_name: String,
    pub mail: String,
    /// Last day the identity's human-subjects training is valid. `None` when
    /// the directory has no training record; treated as not trained.
    pub training_expiration: Option<NaiveDate>,
    /// Medical-center employee (faculty/staff) vs. outside affiliate.
    pub employee: bool,
    pub title: Option<String>,
}

impl Identity {
    /// Training is current iff the expiration date parses and lies strictly
    /// after `as_of`. Missing dates fail closed.
    pub fn trained_through(&self, as_of: NaiveDate) -> bool {
        match self.training_expiration {
            Some(expires) => expires > as_of,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(expiration: Option<NaiveDate>) -> Identity {
        Identity {
            user_id: UserId::new("john.smith"),
            full_name: "John Smith".to_string(),
            mail: "john.smith@example.edu".to_string(),
            training_expiration: expiration,
            employee: true,
            title: Some("Chair of Department of Neurology".to_string()),
        }
    }

    #[test]
    fn training_in_future_is_current() {
        let id = identity(NaiveDate::from_ymd_opt(2099, 1, 1));
        assert!(id.trained_through(NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()));
    }

    #[test]
    fn training_in_past_is_expired() {
        let id = identity(NaiveDate::from_ymd_opt(2010, 1, 1));
        assert!(!id.trained_through(NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()));
    }

    #[test]
    fn training_on_boundary_day_is_expired() {
        let day = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let id = identity(Some(day));
        assert!(!id.trained_through(day));
    }

    #[test]
    fn missing_training_fails_closed() {
        let id = identity(None);
        assert!(!id.trained_through(NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()));
    }

    #[test]
    fn blank_user_ids_detected() {
        assert!(UserId::new("").is_blank());
        assert!(UserId::new("   ").is_blank());
        assert!(!UserId::new("big.wig").is_blank());
    }
}
