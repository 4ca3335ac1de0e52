// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Service configuration, loaded from a YAML file with environment
//! overrides for the connection secrets.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub directory: DirectoryConfig,
    /// Downstream project users are provisioned into by default.
    #[serde(default = "default_project_id")]
    pub project_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection string for the approval and project-management
    /// schemas.
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// LDAP URL of the enterprise directory (ldap:// or ldaps://).
    pub url: String,
    /// Search base for people entries.
    pub base_dn: String,
    #[serde(default)]
    pub bind_dn: Option<String>,
    #[serde(default)]
    pub bind_password: Option<String>,
}

fn default_project_id() -> String {
    "RESEARCH_DATA".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let mut config: Config = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Secrets are supplied via the environment in deployment; file values
    /// act as development defaults.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("MEDGATE_DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(url) = std::env::var("MEDGATE_DIRECTORY_URL") {
            self.directory.url = url;
        }
        if let Ok(password) = std::env::var("MEDGATE_DIRECTORY_PASSWORD") {
            self.directory.bind_password = Some(password);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_yaml_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "database:\n  url: postgres://localhost/medgate\ndirectory:\n  url: ldap://directory.example.edu\n  base_dn: ou=people,dc=example,dc=edu\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.database.url, "postgres://localhost/medgate");
        assert_eq!(config.directory.base_dn, "ou=people,dc=example,dc=edu");
        assert!(config.directory.bind_dn.is_none());
        assert_eq!(config.project_id, "RESEARCH_DATA");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::load(Path::new("/nonexistent/medgate.yaml")).is_err());
    }
}
