// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! medgate-core: research-data access approval.
//!
//! Verifies researcher training/agreement status against the enterprise
//! directory and approval store, records sponsorships, and provisions
//! qualified users into the downstream project-management database.
//!
//! # Architecture
//!
//! - `domain`: entities, the pure decision rule, store/directory contracts
//! - `application`: services orchestrating directory, store, and provisioning
//! - `infrastructure`: Postgres repositories, LDAP adapter, in-memory fakes

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use domain::*;
