use super::domain::{
    AssignmentRole, EmployeeId, ProjectId, ProjectSkillRow, RequiredSkill, TeamAssignment,
    TeamCommit,
};
use super::repository::CommitError;
use super::workload::WorkloadSnapshot;

/// Final synchronous check before assignments are persisted.
///
/// Workload can change between proposal and acceptance, so the guard runs
/// against a snapshot taken at commit time, never one carried over from an
/// earlier scoring pass. Any breach fails the whole operation; partial
/// writes are disallowed by the directory's commit contract.
pub struct AllocationGuard;

impl AllocationGuard {
    /// Re-checks every member against the hard cap, reporting all
    /// offenders at once so the caller can retry with a different roster.
    pub fn validate(
        workload: &WorkloadSnapshot,
        members: &[EmployeeId],
    ) -> Result<(), CommitError> {
        let over = workload.overallocated(members);
        if over.is_empty() {
            Ok(())
        } else {
            Err(CommitError::Overallocated(over))
        }
    }

    /// Builds the atomic commit payload for an accepted proposal: the first
    /// member leads, the rest contribute, and each requirement becomes a
    /// project-skill row with a complexity label derived from its rank.
    pub fn build_commit(
        project_id: ProjectId,
        members: &[EmployeeId],
        requirements: &[RequiredSkill],
    ) -> TeamCommit {
        let assignments = members
            .iter()
            .enumerate()
            .map(|(position, employee_id)| TeamAssignment {
                employee_id: *employee_id,
                role: if position == 0 {
                    AssignmentRole::Lead
                } else {
                    AssignmentRole::Contributor
                },
            })
            .collect();

        let skills = requirements
            .iter()
            .map(|required| ProjectSkillRow {
                skill_id: required.skill_id,
                people_needed: 1,
                complexity: complexity_for_rank(required.rank).to_string(),
            })
            .collect();

        TeamCommit {
            project_id,
            assignments,
            skills,
        }
    }
}

fn complexity_for_rank(rank: u8) -> &'static str {
    match rank {
        1 => "Critical",
        2 => "High",
        3 | 4 => "Medium",
        _ => "Low",
    }
}
