// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};

use crate::domain::identity::UserId;

/// Role codes recorded in the downstream project-management database
/// (`USER_ROLE_CD` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    User,
    DataLds,
    DataObfsc,
    DataAgg,
}

impl UserRole {
    pub fn as_code(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::DataLds => "DATA_LDS",
            UserRole::DataObfsc => "DATA_OBFSC",
            UserRole::DataAgg => "DATA_AGG",
        }
    }
}

/// Every provisioned user receives exactly this role set.
pub const PROVISION_ROLES: [UserRole; 4] = [
    UserRole::User,
    UserRole::DataLds,
    UserRole::DataObfsc,
    UserRole::DataAgg,
];

/// A role assignment in the downstream database (`PM_PROJECT_USER_ROLES`
/// row). One row per (project, user, role); status deactivation happens
/// outside this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantRecord {
    pub project_id: String,
    pub user_id: UserId,
    pub role: UserRole,
    pub status: String,
}

impl GrantRecord {
    pub fn active(project_id: impl Into<String>, user_id: UserId, role: UserRole) -> Self {
        Self {
            project_id: project_id.into(),
            user_id,
            role,
            status: "A".to_string(),
        }
    }
}
