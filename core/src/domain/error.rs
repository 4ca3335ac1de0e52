// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::decision::DenialReason;
use crate::domain::directory::DirectoryError;
use crate::domain::identity::UserId;
use crate::domain::repository::StoreError;

/// Error taxonomy surfaced by the application services.
///
/// Store and directory failures are logged and reported as an inability to
/// decide; they are never converted into a grant.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("identity {0} not found in the enterprise directory")]
    NotFound(UserId),

    #[error("{user_id} is not qualified: {reason}")]
    NotQualified { user_id: UserId, reason: DenialReason },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Directory(DirectoryError),

    #[error("malformed expiration date {input:?}: expected MM/DD/YYYY")]
    Parse { input: String },
}

impl From<DirectoryError> for AccessError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(user_id) => AccessError::NotFound(user_id),
            other => AccessError::Directory(other),
        }
    }
}
