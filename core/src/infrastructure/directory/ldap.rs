// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Live `Directory` adapter over the enterprise LDAP directory.

use async_stream::try_stream;
use async_trait::async_trait;
use chrono::NaiveDate;
use futures::stream::BoxStream;
use ldap3::{ldap_escape, Ldap, LdapConnAsync, Scope, SearchEntry};

use crate::domain::directory::{Directory, DirectoryError, SearchFilter};
use crate::domain::identity::{Identity, UserId};
use crate::infrastructure::config::DirectoryConfig;

/// Attributes requested on every lookup.
const ATTRS: [&str; 7] = [
    "cn",
    "givenname",
    "sn",
    "mail",
    "trainedThru",
    "kumcPersonFaculty",
    "title",
];

/// Format of the `trainedThru` attribute value.
const TRAINED_THRU_FORMAT: &str = "%Y-%m-%d";

pub struct LdapDirectory {
    ldap: Ldap,
    base_dn: String,
}

impl LdapDirectory {
    /// Connect and (optionally) bind. The returned handle is shared; each
    /// call clones it for its own operation.
    pub async fn connect(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        let (conn, mut ldap) = LdapConnAsync::new(&config.url)
            .await
            .map_err(|e| DirectoryError::Unreachable(e.to_string()))?;
        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                tracing::warn!(error = %e, "directory connection terminated");
            }
        });
        if let Some(bind_dn) = &config.bind_dn {
            let password = config.bind_password.as_deref().unwrap_or_default();
            ldap.simple_bind(bind_dn, password)
                .await
                .map_err(|e| DirectoryError::Unreachable(e.to_string()))?
                .success()
                .map_err(|e| DirectoryError::Unreachable(format!("bind failed: {e}")))?;
        }
        Ok(Self {
            ldap,
            base_dn: config.base_dn.clone(),
        })
    }
}

#[async_trait]
impl Directory for LdapDirectory {
    async fn resolve(&self, user_id: &UserId) -> Result<Identity, DirectoryError> {
        let filter = format!("(cn={})", ldap_escape(user_id.as_str()));
        let mut ldap = self.ldap.clone();
        let (entries, _result) = ldap
            .search(&self.base_dn, Scope::Subtree, &filter, ATTRS)
            .await
            .map_err(|e| DirectoryError::Unreachable(e.to_string()))?
            .success()
            .map_err(|e| DirectoryError::Unreachable(e.to_string()))?;
        let entry = entries
            .into_iter()
            .next()
            .ok_or_else(|| DirectoryError::NotFound(user_id.clone()))?;
        identity_from_entry(SearchEntry::construct(entry))
    }

    fn search<'a>(
        &'a self,
        fragment: &'a str,
        filter: &'a SearchFilter,
    ) -> BoxStream<'a, Result<Identity, DirectoryError>> {
        let ldap_filter = build_search_filter(fragment, filter);
        Box::pin(try_stream! {
            let mut ldap = self.ldap.clone();
            let mut search = ldap
                .streaming_search(&self.base_dn, Scope::Subtree, &ldap_filter, ATTRS)
                .await
                .map_err(|e| DirectoryError::Unreachable(e.to_string()))?;
            while let Some(entry) = search
                .next()
                .await
                .map_err(|e| DirectoryError::Unreachable(e.to_string()))?
            {
                yield identity_from_entry(SearchEntry::construct(entry))?;
            }
            // The server reports the search's terminal result code only at
            // finish(); a non-success code here means the entry stream above
            // was truncated.
            search
                .finish()
                .await
                .success()
                .map_err(|e| DirectoryError::Unreachable(e.to_string()))?;
        })
    }
}

/// Name-fragment search over cn and surname, with optional faculty and
/// title constraints.
fn build_search_filter(fragment: &str, filter: &SearchFilter) -> String {
    let fragment = ldap_escape(fragment);
    let mut clauses = format!("(|(cn={fragment}*)(sn={fragment}*))");
    if let Some(faculty) = filter.faculty {
        let flag = if faculty { "Y" } else { "N" };
        clauses.push_str(&format!("(kumcPersonFaculty={flag})"));
    }
    if let Some(title) = &filter.title {
        clauses.push_str(&format!("(title=*{}*)", ldap_escape(title)));
    }
    format!("(&{clauses})")
}

fn identity_from_entry(entry: SearchEntry) -> Result<Identity, DirectoryError> {
    let first = |attr: &str| -> Option<&str> {
        entry
            .attrs
            .get(attr)
            .and_then(|values| values.first())
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    };

    let cn = first("cn").ok_or_else(|| DirectoryError::Malformed {
        cn: entry.dn.clone(),
        detail: "missing cn".to_string(),
    })?;
    let full_name = match (first("givenname"), first("sn")) {
        (Some(given), Some(sur)) => format!("{given} {sur}"),
        (Some(given), None) => given.to_string(),
        (None, Some(sur)) => sur.to_string(),
        (None, None) => {
            return Err(DirectoryError::Malformed {
                cn: cn.to_string(),
                detail: "missing givenname and sn".to_string(),
            })
        }
    };
    let mail = first("mail").ok_or_else(|| DirectoryError::Malformed {
        cn: cn.to_string(),
        detail: "missing mail".to_string(),
    })?;

    // An unparseable training date degrades to "no training on record",
    // which the decision rule then fails closed on.
    let training_expiration = match first("trainedThru") {
        Some(raw) => match NaiveDate::parse_from_str(raw, TRAINED_THRU_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                tracing::warn!(cn, trained_thru = raw, "unparseable trainedThru attribute");
                None
            }
        },
        None => None,
    };

    Ok(Identity {
        user_id: UserId::new(cn),
        full_name,
        mail: mail.to_string(),
        training_expiration,
        employee: first("kumcPersonFaculty") == Some("Y"),
        title: first("title").map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn entry(attrs: &[(&str, &str)]) -> SearchEntry {
        SearchEntry {
            dn: "cn=test,ou=people,dc=example,dc=edu".to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), vec![v.to_string()]))
                .collect(),
            bin_attrs: HashMap::new(),
        }
    }

    #[test]
    fn entry_maps_to_identity() {
        let identity = identity_from_entry(entry(&[
            ("cn", "john.smith"),
            ("givenname", "John"),
            ("sn", "Smith"),
            ("mail", "john.smith@example.edu"),
            ("trainedThru", "2027-01-01"),
            ("kumcPersonFaculty", "Y"),
            ("title", "Chair of Department of Neurology"),
        ]))
        .unwrap();
        assert_eq!(identity.user_id.as_str(), "john.smith");
        assert_eq!(identity.full_name, "John Smith");
        assert!(identity.employee);
        assert_eq!(
            identity.training_expiration,
            NaiveDate::from_ymd_opt(2027, 1, 1)
        );
    }

    #[test]
    fn missing_cn_is_malformed() {
        let err = identity_from_entry(entry(&[("mail", "x@example.edu"), ("sn", "X")]))
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Malformed { .. }));
    }

    #[test]
    fn unparseable_training_date_degrades_to_none() {
        let identity = identity_from_entry(entry(&[
            ("cn", "koam.rin"),
            ("sn", "Rin"),
            ("mail", "koam.rin@example.edu"),
            ("trainedThru", "sometime"),
        ]))
        .unwrap();
        assert_eq!(identity.training_expiration, None);
        assert!(!identity.employee);
    }

    #[test]
    fn search_filter_includes_constraints() {
        let filter = build_search_filter(
            "smith",
            &SearchFilter {
                faculty: Some(true),
                title: Some("Neurology".to_string()),
            },
        );
        assert_eq!(
            filter,
            "(&(|(cn=smith*)(sn=smith*))(kumcPersonFaculty=Y)(title=*Neurology*))"
        );
    }

    #[test]
    fn search_filter_escapes_metacharacters() {
        let filter = build_search_filter("smi(th", &SearchFilter::default());
        assert!(!filter.contains("smi(th"));
    }
}
