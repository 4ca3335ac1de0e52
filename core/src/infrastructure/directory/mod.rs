// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Directory adapters: the live LDAP client and an in-memory fake.

pub mod ldap;
pub mod memory;

pub use ldap::LdapDirectory;
pub use memory::InMemoryDirectory;
