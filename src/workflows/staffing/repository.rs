use super::domain::{
    AssignmentRow, DepartmentScope, EmployeeId, EmployeeProfile, Skill, TeamCommit,
};

/// Storage abstraction so the engine can be exercised without a database.
///
/// Reads return current committed state at call time; the engine never
/// caches them across requests. `commit_team` is the single write path and
/// must be atomic: all rows of the commit land or none do.
pub trait StaffingDirectory: Send + Sync {
    fn skills_in_scope(&self, scope: &DepartmentScope) -> Result<Vec<Skill>, DirectoryError>;
    fn employees_in_scope(
        &self,
        scope: &DepartmentScope,
    ) -> Result<Vec<EmployeeProfile>, DirectoryError>;
    fn assignments_in_scope(
        &self,
        scope: &DepartmentScope,
    ) -> Result<Vec<AssignmentRow>, DirectoryError>;
    fn commit_team(&self, commit: &TeamCommit) -> Result<(), CommitError>;
}

/// Error enumeration for directory read failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("record not found")]
    NotFound,
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Error enumeration for the write path.
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    /// The allocation guard (or the store itself, on a late race) found
    /// members already at the active-assignment cap. Nothing was written.
    #[error("employees at the active-assignment cap: {}", format_ids(.0))]
    Overallocated(Vec<EmployeeId>),
    #[error("assignment storage failure: {0}")]
    Storage(String),
}

fn format_ids(ids: &[EmployeeId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
