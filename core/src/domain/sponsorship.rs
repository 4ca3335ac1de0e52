// Copyright (c) 2026 medgate maintainers
// SPDX-License-Identifier: AGPL-3.0

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::identity::UserId;

/// Kind of access a sponsorship vouches for (`ACCESS_TYPE` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessType {
    ViewOnly,
    DataAccess,
}

impl AccessType {
    pub fn as_code(&self) -> &'static str {
        match self {
            AccessType::ViewOnly => "VIEW_ONLY",
            AccessType::DataAccess => "DATA_ACCESS",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "VIEW_ONLY" => Some(AccessType::ViewOnly),
            "DATA_ACCESS" => Some(AccessType::DataAccess),
            _ => None,
        }
    }
}

/// Employment flag recorded with each sponsorship (`KUMC_EMPL_FLAG`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentFlag {
    Employee,
    NonEmployee,
}

impl EmploymentFlag {
    pub fn as_code(&self) -> &'static str {
        match self {
            EmploymentFlag::Employee => "Y",
            EmploymentFlag::NonEmployee => "N",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Y" => Some(EmploymentFlag::Employee),
            "N" => Some(EmploymentFlag::NonEmployee),
            _ => None,
        }
    }
}

/// A sponsorship tying a sponsored user to the employee vouching for them
/// (`SPONSORSHIP` row). No deletion is modeled; expiry is by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SponsorshipRecord {
    pub user_id: UserId,
    pub sponsor_id: UserId,
    pub access_type: AccessType,
    pub research_title: String,
    pub research_desc: String,
    /// `None` means the sponsorship does not expire.
    pub expire_date: Option<NaiveDate>,
    pub employment: EmploymentFlag,
}

impl SponsorshipRecord {
    /// Expired sponsorships confer no eligibility. An absent date never
    /// expires; a date on or before `as_of` is expired.
    pub fn is_active(&self, as_of: NaiveDate) -> bool {
        match self.expire_date {
            Some(expires) => expires > as_of,
            None => true,
        }
    }
}

/// Validated input for one batched sponsorship insert: a sponsor vouching for
/// a mixed list of employees and non-employees under one research title.
#[derive(Debug, Clone)]
pub struct SponsorshipBatch {
    pub sponsor_id: UserId,
    pub employee_ids: Vec<UserId>,
    pub non_employee_ids: Vec<UserId>,
    pub access_type: AccessType,
    pub research_title: String,
    pub research_desc: String,
    pub expire_date: Option<NaiveDate>,
}

impl SponsorshipBatch {
    /// Expand the batch into insertable rows, partitioned by employment flag
    /// in input order, skipping blank identifiers.
    pub fn rows(&self) -> (Vec<SponsorshipRecord>, usize) {
        let mut skipped_blank = 0;
        let mut rows = Vec::with_capacity(self.employee_ids.len() + self.non_employee_ids.len());
        let partitions = [
            (&self.employee_ids, EmploymentFlag::Employee),
            (&self.non_employee_ids, EmploymentFlag::NonEmployee),
        ];
        for (ids, employment) in partitions {
            for id in ids {
                if id.is_blank() {
                    skipped_blank += 1;
                    continue;
                }
                rows.push(SponsorshipRecord {
                    user_id: id.clone(),
                    sponsor_id: self.sponsor_id.clone(),
                    access_type: self.access_type,
                    research_title: self.research_title.clone(),
                    research_desc: self.research_desc.clone(),
                    expire_date: self.expire_date,
                    employment,
                });
            }
        }
        (rows, skipped_blank)
    }
}

/// Result of a batched sponsorship insert, reported back to the caller
/// instead of silently dropping rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub inserted: usize,
    pub skipped_blank: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(employees: &[&str], non_employees: &[&str]) -> SponsorshipBatch {
        SponsorshipBatch {
            sponsor_id: UserId::new("john.smith"),
            employee_ids: employees.iter().map(|s| UserId::new(*s)).collect(),
            non_employee_ids: non_employees.iter().map(|s| UserId::new(*s)).collect(),
            access_type: AccessType::ViewOnly,
            research_title: "Cure Warts".to_string(),
            research_desc: "wart cohort review".to_string(),
            expire_date: NaiveDate::from_ymd_opt(2027, 6, 30),
        }
    }

    #[test]
    fn rows_partition_by_employment_flag() {
        let (rows, skipped) = batch(&["a.one", "b.two"], &["c.three"]).rows();
        assert_eq!(skipped, 0);
        assert_eq!(rows.len(), 3);
        assert!(rows[..2]
            .iter()
            .all(|r| r.employment == EmploymentFlag::Employee));
        assert_eq!(rows[2].employment, EmploymentFlag::NonEmployee);
        assert!(rows.iter().all(|r| r.sponsor_id.as_str() == "john.smith"));
    }

    #[test]
    fn blank_ids_are_skipped_and_counted() {
        let (rows, skipped) = batch(&["a.one", " ", ""], &["", "c.three"]).rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(skipped, 3);
    }

    #[test]
    fn sponsorship_without_expiry_stays_active() {
        let mut record = batch(&["a.one"], &[]).rows().0.remove(0);
        record.expire_date = None;
        assert!(record.is_active(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap()));
    }

    #[test]
    fn sponsorship_expires_on_its_expiry_day() {
        let record = batch(&["a.one"], &[]).rows().0.remove(0);
        let expiry = record.expire_date.unwrap();
        assert!(record.is_active(expiry.pred_opt().unwrap()));
        assert!(!record.is_active(expiry));
    }

    #[test]
    fn access_type_codes_round_trip() {
        assert_eq!(AccessType::from_code("VIEW_ONLY"), Some(AccessType::ViewOnly));
        assert_eq!(AccessType::DataAccess.as_code(), "DATA_ACCESS");
        assert_eq!(AccessType::from_code("WRITE"), None);
    }
}
