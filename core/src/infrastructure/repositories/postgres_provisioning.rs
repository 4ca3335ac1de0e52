// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! `ProvisioningRepository` backed by the downstream `PM_USER_DATA` and
//! `PM_PROJECT_USER_ROLES` tables.
//!
//! The user-data row and all role rows are written in one transaction so a
//! failure never leaves a half-provisioned user behind.

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;

use crate::domain::grant::PROVISION_ROLES;
use crate::domain::identity::UserId;
use crate::domain::repository::{ProvisioningRepository, StoreError};

pub struct PostgresProvisioningRepository {
    pool: PgPool,
}

impl PostgresProvisioningRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProvisioningRepository for PostgresProvisioningRepository {
    async fn is_provisioned(&self, user_id: &UserId) -> Result<bool, StoreError> {
        let row = sqlx::query(
            "SELECT count(1) FROM pm_user_data WHERE user_id = $1 AND status_cd = 'A'",
        )
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await?;
        let count: i64 = row.get(0);
        Ok(count > 0)
    }

    async fn grant(
        &self,
        project_id: &str,
        user_id: &UserId,
        full_name: &str,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "SELECT count(1) FROM pm_user_data WHERE user_id = $1 AND status_cd = 'A'",
        )
        .bind(user_id.as_str())
        .fetch_one(&mut *tx)
        .await?;
        let exists: i64 = row.get(0);
        if exists == 0 {
            // Authentication is delegated upstream; the password column is a
            // fixed sentinel.
            sqlx::query(
                r#"
                INSERT INTO pm_user_data (user_id, full_name, password, status_cd)
                VALUES ($1, $2, 'CAS', 'A')
                "#,
            )
            .bind(user_id.as_str())
            .bind(full_name)
            .execute(&mut *tx)
            .await?;
        }

        // (project_id, user_id, user_role_cd) is the table's natural key, so
        // re-provisioning an already-provisioned user is a no-op per role.
        for role in PROVISION_ROLES {
            sqlx::query(
                r#"
                INSERT INTO pm_project_user_roles (project_id, user_id, user_role_cd, status_cd)
                VALUES ($1, $2, $3, 'A')
                ON CONFLICT (project_id, user_id, user_role_cd) DO NOTHING
                "#,
            )
            .bind(project_id)
            .bind(user_id.as_str())
            .bind(role.as_code())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
