use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::domain::{AssignmentRow, EmployeeId};
use crate::config::EngineConfig;

/// Active-assignment counts for one scoring pass.
///
/// Derived, never stored: assignments change between calls, so stale counts
/// are a correctness bug. Every scoring pass and every negotiation
/// iteration computes a fresh snapshot from current directory rows.
#[derive(Debug, Clone)]
pub struct WorkloadSnapshot {
    counts: BTreeMap<EmployeeId, u32>,
    cap: u32,
}

impl WorkloadSnapshot {
    pub fn compute(rows: &[AssignmentRow], today: NaiveDate, config: &EngineConfig) -> Self {
        let mut counts: BTreeMap<EmployeeId, u32> = BTreeMap::new();
        for row in rows {
            if row.is_active(&config.active_statuses, today) {
                *counts.entry(row.employee_id).or_insert(0) += 1;
            }
        }
        Self {
            counts,
            cap: config.max_active_assignments,
        }
    }

    pub fn active_count(&self, id: EmployeeId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// At or beyond the hard cap.
    pub fn at_capacity(&self, id: EmployeeId) -> bool {
        self.active_count(id) >= self.cap
    }

    /// Members of `ids` that are at or over the cap, in input order.
    pub fn overallocated(&self, ids: &[EmployeeId]) -> Vec<EmployeeId> {
        ids.iter()
            .copied()
            .filter(|id| self.at_capacity(*id))
            .collect()
    }
}
