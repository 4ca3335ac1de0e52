// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0

pub mod config;
pub mod directory;
pub mod repositories;

pub use config::{Config, DatabaseConfig, DirectoryConfig};
