// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! `SponsorshipRepository` backed by the `SPONSORSHIP` table.
//!
//! Batch inserts run inside a single transaction: either every row of the
//! batch lands or none does.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::identity::UserId;
use crate::domain::repository::{SponsorshipRepository, StoreError};
use crate::domain::sponsorship::{
    AccessType, BatchOutcome, EmploymentFlag, SponsorshipBatch, SponsorshipRecord,
};

pub struct PostgresSponsorshipRepository {
    pool: PgPool,
}

impl PostgresSponsorshipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "user_id, sponsor_id, access_type, research_title, \
                              research_desc, expire_date, kumc_empl_flag";

fn record_from_row(row: &PgRow) -> Result<SponsorshipRecord, StoreError> {
    let access_code: String = row.get("access_type");
    let access_type = AccessType::from_code(&access_code)
        .ok_or_else(|| StoreError::Database(format!("unknown access type code {access_code:?}")))?;
    let empl_code: String = row.get("kumc_empl_flag");
    let employment = EmploymentFlag::from_code(&empl_code).ok_or_else(|| {
        StoreError::Database(format!("unknown employment flag {empl_code:?}"))
    })?;
    Ok(SponsorshipRecord {
        user_id: UserId::new(row.get::<String, _>("user_id")),
        sponsor_id: UserId::new(row.get::<String, _>("sponsor_id")),
        access_type,
        research_title: row.get("research_title"),
        research_desc: row.get("research_desc"),
        expire_date: row.get("expire_date"),
        employment,
    })
}

#[async_trait]
impl SponsorshipRepository for PostgresSponsorshipRepository {
    async fn record_batch(&self, batch: &SponsorshipBatch) -> Result<BatchOutcome, StoreError> {
        let (rows, skipped_blank) = batch.rows();
        let mut tx = self.pool.begin().await?;
        for row in &rows {
            sqlx::query(
                r#"
                INSERT INTO sponsorship
                    (user_id, sponsor_id, last_updt_tmst, access_type,
                     research_title, research_desc, expire_date, kumc_empl_flag)
                VALUES ($1, $2, now(), $3, $4, $5, $6, $7)
                "#,
            )
            .bind(row.user_id.as_str())
            .bind(row.sponsor_id.as_str())
            .bind(row.access_type.as_code())
            .bind(&row.research_title)
            .bind(&row.research_desc)
            .bind(row.expire_date)
            .bind(row.employment.as_code())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(BatchOutcome {
            inserted: rows.len(),
            skipped_blank,
        })
    }

    async fn active_for(
        &self,
        user_id: &UserId,
        as_of: NaiveDate,
    ) -> Result<Vec<SponsorshipRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM sponsorship \
             WHERE user_id = $1 AND (expire_date IS NULL OR expire_date > $2)"
        ))
        .bind(user_id.as_str())
        .bind(as_of)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(record_from_row).collect()
    }

    async fn sponsored_by(
        &self,
        sponsor_id: &UserId,
        as_of: NaiveDate,
    ) -> Result<Vec<SponsorshipRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM sponsorship \
             WHERE sponsor_id = $1 AND (expire_date IS NULL OR expire_date > $2)"
        ))
        .bind(sponsor_id.as_str())
        .bind(as_of)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(record_from_row).collect()
    }
}
