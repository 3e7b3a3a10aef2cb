use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog skills.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SkillId(pub i64);

/// Identifier wrapper for roster members.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EmployeeId(pub i64);

/// Identifier wrapper for projects receiving a team.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ProjectId(pub i64);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Explicit scope passed into every directory query; there is no ambient
/// session state restricting the catalog or roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentScope {
    pub department_id: i64,
}

/// Catalog entry. Immutable once referenced by a scoring pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub category: Option<String>,
}

/// Roster member with recorded skill proficiencies.
///
/// Display metadata is opaque to the engine and only surfaces in candidate
/// views. Proficiency levels are bounded by the configured scale maximum,
/// higher is better.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub id: EmployeeId,
    pub name: String,
    pub title: Option<String>,
    pub team: Option<String>,
    pub department: Option<String>,
    pub proficiencies: BTreeMap<SkillId, u8>,
}

impl EmployeeProfile {
    pub fn proficiency(&self, skill: SkillId) -> Option<u8> {
        self.proficiencies.get(&skill).copied()
    }
}

/// Maximum number of core requirements active in one scoring pass.
pub const MAX_REQUIRED_SKILLS: usize = 5;

/// A catalog skill with its criticality rank, 1 = most critical.
///
/// Ranks are unique and contiguous from 1 within one scoring pass; the
/// resolver is the only producer and upholds that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredSkill {
    pub skill_id: SkillId,
    pub name: String,
    pub rank: u8,
    pub reason: Option<String>,
}

impl RequiredSkill {
    /// Descending scoring weight derived from rank: 5, 4, 3, 2, 1.
    pub fn weight(&self) -> u32 {
        6u32.saturating_sub(u32::from(self.rank))
    }
}

/// One person-project link as reported by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    pub employee_id: EmployeeId,
    pub project_id: ProjectId,
    pub project_status: String,
    pub ends_on: Option<NaiveDate>,
}

impl AssignmentRow {
    /// Active = status in the configured active set and not yet ended.
    pub fn is_active(&self, active_statuses: &BTreeSet<String>, today: NaiveDate) -> bool {
        active_statuses.contains(&self.project_status)
            && self.ends_on.map(|ends| ends >= today).unwrap_or(true)
    }
}

/// Policy controlling the ratio of top-ranked to deliberately weaker picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityTier {
    Critical,
    High,
    Medium,
    Low,
}

impl PriorityTier {
    pub const fn label(self) -> &'static str {
        match self {
            PriorityTier::Critical => "critical",
            PriorityTier::High => "high",
            PriorityTier::Medium => "medium",
            PriorityTier::Low => "low",
        }
    }
}

/// Ordered selection produced by one composer invocation, tagged with the
/// exclusion set that produced it. Members never repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamProposal {
    pub members: Vec<EmployeeId>,
    pub excluded: BTreeSet<EmployeeId>,
}

impl TeamProposal {
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Role attached to a committed assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentRole {
    Lead,
    Contributor,
}

impl AssignmentRole {
    pub const fn label(self) -> &'static str {
        match self {
            AssignmentRole::Lead => "Lead",
            AssignmentRole::Contributor => "Contributor",
        }
    }
}

/// One assignment row of a pending commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAssignment {
    pub employee_id: EmployeeId,
    pub role: AssignmentRole,
}

/// Project-skill row derived from a requirement at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSkillRow {
    pub skill_id: SkillId,
    pub people_needed: u32,
    pub complexity: String,
}

/// The atomic unit handed to the directory on acceptance: either every row
/// is written or none are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCommit {
    pub project_id: ProjectId,
    pub assignments: Vec<TeamAssignment>,
    pub skills: Vec<ProjectSkillRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_skill_weights_strictly_decrease_by_rank() {
        let weights: Vec<u32> = (1..=5u8)
            .map(|rank| {
                RequiredSkill {
                    skill_id: SkillId(i64::from(rank)),
                    name: format!("skill-{rank}"),
                    rank,
                    reason: None,
                }
                .weight()
            })
            .collect();
        assert_eq!(weights, vec![5, 4, 3, 2, 1]);
        assert!(weights.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn assignment_activity_follows_status_and_end_date() {
        let active_statuses: BTreeSet<String> = ["Not Started", "In Progress"]
            .into_iter()
            .map(str::to_string)
            .collect();
        let today = NaiveDate::from_ymd_opt(2026, 8, 25).expect("valid date");

        let mut row = AssignmentRow {
            employee_id: EmployeeId(1),
            project_id: ProjectId(7),
            project_status: "In Progress".to_string(),
            ends_on: None,
        };
        assert!(row.is_active(&active_statuses, today));

        row.ends_on = Some(today);
        assert!(row.is_active(&active_statuses, today), "ends today is still active");

        row.ends_on = Some(today.pred_opt().expect("valid date"));
        assert!(!row.is_active(&active_statuses, today), "ended yesterday");

        row.ends_on = None;
        row.project_status = "Completed".to_string();
        assert!(!row.is_active(&active_statuses, today));
    }
}
