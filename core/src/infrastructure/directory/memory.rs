// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! In-memory `Directory` fake for tests and development, seeded with a
//! handful of identities the way the live directory would expose them.

use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::directory::{Directory, DirectoryError, SearchFilter};
use crate::domain::identity::{Identity, UserId};

#[derive(Clone, Default)]
pub struct InMemoryDirectory {
    records: Arc<Mutex<HashMap<UserId, Identity>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = Identity>) -> Self {
        let directory = Self::new();
        for identity in records {
            directory.add(identity);
        }
        directory
    }

    pub fn add(&self, identity: Identity) {
        if let Ok(mut records) = self.records.lock() {
            records.insert(identity.user_id.clone(), identity);
        }
    }

    fn matches(identity: &Identity, fragment: &str, filter: &SearchFilter) -> bool {
        let fragment = fragment.to_lowercase();
        let hit = identity.user_id.as_str().to_lowercase().starts_with(&fragment)
            || identity.full_name.to_lowercase().contains(&fragment);
        if !hit {
            return false;
        }
        if let Some(faculty) = filter.faculty {
            if identity.employee != faculty {
                return false;
            }
        }
        if let Some(title) = &filter.title {
            match &identity.title {
                Some(t) if t.to_lowercase().contains(&title.to_lowercase()) => {}
                _ => return false,
            }
        }
        true
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn resolve(&self, user_id: &UserId) -> Result<Identity, DirectoryError> {
        let records = self
            .records
            .lock()
            .map_err(|_| DirectoryError::Unreachable("mutex poisoned".to_string()))?;
        records
            .get(user_id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(user_id.clone()))
    }

    fn search<'a>(
        &'a self,
        fragment: &'a str,
        filter: &'a SearchFilter,
    ) -> BoxStream<'a, Result<Identity, DirectoryError>> {
        let matches: Vec<_> = self
            .records
            .lock()
            .map(|records| {
                let mut hits: Vec<_> = records
                    .values()
                    .filter(|identity| Self::matches(identity, fragment, filter))
                    .cloned()
                    .collect();
                hits.sort_by(|a, b| a.user_id.as_str().cmp(b.user_id.as_str()));
                hits
            })
            .unwrap_or_default();
        Box::pin(stream::iter(matches.into_iter().map(Ok)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use futures::TryStreamExt;

    fn person(cn: &str, name: &str, employee: bool) -> Identity {
        Identity {
            user_id: UserId::new(cn),
            full_name: name.to_string(),
            mail: format!("{cn}@example.edu"),
            training_expiration: NaiveDate::from_ymd_opt(2027, 1, 1),
            employee,
            title: None,
        }
    }

    #[tokio::test]
    async fn resolve_finds_seeded_identity() {
        let directory = InMemoryDirectory::with_records([person("john.smith", "John Smith", true)]);
        let identity = directory.resolve(&UserId::new("john.smith")).await.unwrap();
        assert_eq!(identity.full_name, "John Smith");
    }

    #[tokio::test]
    async fn resolve_miss_is_not_found() {
        let directory = InMemoryDirectory::new();
        let err = directory.resolve(&UserId::new("nobody")).await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn search_filters_by_fragment_and_faculty() {
        let directory = InMemoryDirectory::with_records([
            person("john.smith", "John Smith", true),
            person("jane.smith", "Jane Smith", false),
            person("big.wig", "Big Wig", true),
        ]);
        let filter = SearchFilter {
            faculty: Some(true),
            title: None,
        };
        let hits: Vec<_> = directory.search("smith", &filter).try_collect().await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].user_id.as_str(), "john.smith");
    }

    #[tokio::test]
    async fn search_is_restartable() {
        let directory = InMemoryDirectory::with_records([person("big.wig", "Big Wig", true)]);
        let filter = SearchFilter::default();
        for _ in 0..2 {
            let hits: Vec<_> = directory.search("big", &filter).try_collect().await.unwrap();
            assert_eq!(hits.len(), 1);
        }
    }
}
