// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Enterprise-directory capability interface.
//!
//! Implemented by `infrastructure::directory::LdapDirectory` against the
//! live directory and by `infrastructure::directory::InMemoryDirectory` for
//! tests. An identity absent from the directory is a lookup error, not an
//! access denial; callers must keep the two apart.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::identity::{Identity, UserId};

/// Optional constraints for a name-fragment search.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Restrict to faculty (`Some(true)`) or non-faculty (`Some(false)`).
    pub faculty: Option<bool>,
    /// Substring match against the directory title attribute.
    pub title: Option<String>,
}

#[async_trait]
pub trait Directory: Send + Sync {
    /// Resolve a user identifier to its identity attributes.
    async fn resolve(&self, user_id: &UserId) -> Result<Identity, DirectoryError>;

    /// Search by surname/cn fragment. The stream is lazy and finite; each
    /// call starts a fresh search.
    fn search<'a>(
        &'a self,
        fragment: &'a str,
        filter: &'a SearchFilter,
    ) -> BoxStream<'a, Result<Identity, DirectoryError>>;
}

/// Directory errors
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// No directory entry for the identifier. Distinct from transport and
    /// data failures so callers can report it as such.
    #[error("no directory entry for {0}")]
    NotFound(UserId),

    #[error("directory unreachable: {0}")]
    Unreachable(String),

    #[error("malformed directory entry for {cn}: {detail}")]
    Malformed { cn: String, detail: String },
}
