// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! `DisclaimerRepository` backed by the `disclaimers` and
//! `disclaimer_acknowledgements` tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::Row;

use crate::domain::disclaimer::{Acknowledgement, Disclaimer};
use crate::domain::identity::UserId;
use crate::domain::repository::{DisclaimerRepository, StoreError};

pub struct PostgresDisclaimerRepository {
    pool: PgPool,
}

impl PostgresDisclaimerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DisclaimerRepository for PostgresDisclaimerRepository {
    async fn current_disclaimer(&self) -> Result<Option<Disclaimer>, StoreError> {
        let row = sqlx::query("SELECT url FROM disclaimers WHERE current_flag LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| Disclaimer {
            url: r.get("url"),
            current: true,
        }))
    }

    async fn is_acknowledged(&self, user_id: &UserId) -> Result<bool, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT count(1)
            FROM disclaimer_acknowledgements a
            JOIN disclaimers d ON d.url = a.disclaimer_url
            WHERE a.user_id = $1 AND d.current_flag
            "#,
        )
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await?;
        let count: i64 = row.get(0);
        Ok(count > 0)
    }

    async fn acknowledge(
        &self,
        user_id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<Acknowledgement, StoreError> {
        let current = self
            .current_disclaimer()
            .await?
            .ok_or_else(|| StoreError::NotFound("no current disclaimer".to_string()))?;

        if self.is_acknowledged(user_id).await? {
            let row = sqlx::query(
                r#"
                SELECT ack_tmst
                FROM disclaimer_acknowledgements
                WHERE user_id = $1 AND disclaimer_url = $2
                "#,
            )
            .bind(user_id.as_str())
            .bind(&current.url)
            .fetch_one(&self.pool)
            .await?;
            return Ok(Acknowledgement {
                user_id: user_id.clone(),
                disclaimer_url: current.url,
                acknowledged_at: row.get("ack_tmst"),
            });
        }

        sqlx::query(
            r#"
            INSERT INTO disclaimer_acknowledgements (user_id, disclaimer_url, ack_tmst)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id.as_str())
        .bind(&current.url)
        .bind(at)
        .execute(&self.pool)
        .await?;
        Ok(Acknowledgement {
            user_id: user_id.clone(),
            disclaimer_url: current.url,
            acknowledged_at: at,
        })
    }
}
