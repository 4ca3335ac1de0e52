// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Provisioning application service.
//!
//! The gate between a positive access decision and account rows in the
//! downstream project-management database. A grant is only ever written for
//! an identity the decision service just qualified.

use std::sync::Arc;

use crate::domain::decision::AccessDecision;
use crate::domain::error::AccessError;
use crate::domain::identity::UserId;
use crate::domain::repository::ProvisioningRepository;
use crate::domain::sponsorship::AccessType;

use super::decision::AccessDecisionService;

pub struct ProvisioningService {
    decisions: Arc<AccessDecisionService>,
    provisioning: Arc<dyn ProvisioningRepository>,
}

impl ProvisioningService {
    pub fn new(
        decisions: Arc<AccessDecisionService>,
        provisioning: Arc<dyn ProvisioningRepository>,
    ) -> Self {
        Self {
            decisions,
            provisioning,
        }
    }

    /// Evaluate the identity and, if qualified, provision it into the
    /// project: the user-data row plus one role row per role in the fixed
    /// set, in a single transaction. Denials surface as `NotQualified`.
    pub async fn provision(
        &self,
        project_id: &str,
        user_id: &UserId,
    ) -> Result<AccessType, AccessError> {
        let (identity, decision) = self.decisions.evaluate(user_id).await?;
        match decision {
            AccessDecision::Qualified { role } => {
                self.provisioning
                    .grant(project_id, user_id, &identity.full_name)
                    .await
                    .map_err(|e| {
                        tracing::error!(
                            user = %user_id,
                            project = project_id,
                            error = %e,
                            "provisioning failed"
                        );
                        e
                    })?;
                tracing::info!(user = %user_id, project = project_id, role = role.as_code(), "user provisioned");
                Ok(role)
            }
            AccessDecision::NotQualified { reason } => {
                tracing::info!(user = %user_id, %reason, "provisioning refused");
                Err(AccessError::NotQualified {
                    user_id: user_id.clone(),
                    reason,
                })
            }
        }
    }

    /// True iff the user already holds an active downstream account.
    pub async fn is_provisioned(&self, user_id: &UserId) -> Result<bool, AccessError> {
        Ok(self.provisioning.is_provisioned(user_id).await?)
    }
}
