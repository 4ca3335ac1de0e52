// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! `AgreementRepository` backed by the `system_access_users` table.

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;

use crate::domain::agreement::AgreementRecord;
use crate::domain::identity::UserId;
use crate::domain::repository::{AgreementRepository, StoreError};

pub struct PostgresAgreementRepository {
    pool: PgPool,
}

impl PostgresAgreementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgreementRepository for PostgresAgreementRepository {
    async fn is_signed(&self, user_id: &UserId) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT count(1) FROM system_access_users WHERE user_id = $1")
            .bind(user_id.as_str())
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.get(0);
        Ok(count > 0)
    }

    async fn record(&self, agreement: &AgreementRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO system_access_users
                (user_id, user_full_name, signature, signed_date, last_updt_tmst)
            VALUES ($1, $2, $3, $4, now())
            "#,
        )
        .bind(agreement.user_id.as_str())
        .bind(&agreement.full_name)
        .bind(&agreement.signature)
        .bind(agreement.signed_date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
