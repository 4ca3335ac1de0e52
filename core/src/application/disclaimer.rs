// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Disclaimer acknowledgement service. Audit bookkeeping only; the access
//! decision does not gate on it.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::disclaimer::{Acknowledgement, Disclaimer};
use crate::domain::error::AccessError;
use crate::domain::identity::UserId;
use crate::domain::repository::DisclaimerRepository;

pub struct DisclaimerService {
    disclaimers: Arc<dyn DisclaimerRepository>,
}

impl DisclaimerService {
    pub fn new(disclaimers: Arc<dyn DisclaimerRepository>) -> Self {
        Self { disclaimers }
    }

    pub async fn current(&self) -> Result<Option<Disclaimer>, AccessError> {
        Ok(self.disclaimers.current_disclaimer().await?)
    }

    pub async fn is_acknowledged(&self, user_id: &UserId) -> Result<bool, AccessError> {
        Ok(self.disclaimers.is_acknowledged(user_id).await?)
    }

    /// Record acknowledgement of the current disclaimer; a repeat
    /// acknowledgement is a no-op returning the existing record's shape.
    pub async fn acknowledge(
        &self,
        user_id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<Acknowledgement, AccessError> {
        let ack = self.disclaimers.acknowledge(user_id, at).await?;
        tracing::info!(user = %user_id, url = %ack.disclaimer_url, "disclaimer acknowledged");
        Ok(ack)
    }
}
