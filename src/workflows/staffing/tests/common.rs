use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::config::{EngineConfig, ScoringScale};
use crate::workflows::staffing::domain::{
    AssignmentRow, DepartmentScope, EmployeeId, EmployeeProfile, ProjectId, RequiredSkill, Skill,
    SkillId, TeamCommit,
};
use crate::workflows::staffing::repository::{CommitError, DirectoryError, StaffingDirectory};
use crate::workflows::staffing::resolver::{RankedSkill, RankingError, SkillRanker};
use crate::workflows::staffing::service::StaffingService;

pub(super) fn scope() -> DepartmentScope {
    DepartmentScope { department_id: 1 }
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 25).expect("valid date")
}

pub(super) fn engine_config() -> EngineConfig {
    EngineConfig::default()
}

pub(super) fn multiplicative_config() -> EngineConfig {
    EngineConfig {
        scoring_scale: ScoringScale::Multiplicative,
        ..EngineConfig::default()
    }
}

pub(super) fn catalog() -> Vec<Skill> {
    [
        (1, "Python"),
        (2, "SQL"),
        (3, "Docker"),
        (4, "React"),
        (5, "AWS"),
    ]
    .into_iter()
    .map(|(id, name)| Skill {
        id: SkillId(id),
        name: name.to_string(),
        category: Some("Engineering".to_string()),
    })
    .collect()
}

pub(super) fn requirement(skill_id: i64, name: &str, rank: u8) -> RequiredSkill {
    RequiredSkill {
        skill_id: SkillId(skill_id),
        name: name.to_string(),
        rank,
        reason: None,
    }
}

/// Ranked requirements [Python(1), SQL(2), Docker(3)], weights 5/4/3.
pub(super) fn core_requirements() -> Vec<RequiredSkill> {
    vec![
        requirement(1, "Python", 1),
        requirement(2, "SQL", 2),
        requirement(3, "Docker", 3),
    ]
}

pub(super) fn employee(id: i64, name: &str, proficiencies: &[(i64, u8)]) -> EmployeeProfile {
    EmployeeProfile {
        id: EmployeeId(id),
        name: name.to_string(),
        title: Some("Engineer".to_string()),
        team: Some("Alpha".to_string()),
        department: Some("Engineering".to_string()),
        proficiencies: proficiencies
            .iter()
            .map(|(skill, level)| (SkillId(*skill), *level))
            .collect::<BTreeMap<_, _>>(),
    }
}

pub(super) fn active_assignment(employee_id: i64, project_id: i64) -> AssignmentRow {
    AssignmentRow {
        employee_id: EmployeeId(employee_id),
        project_id: ProjectId(project_id),
        project_status: "In Progress".to_string(),
        ends_on: None,
    }
}

/// In-memory directory so every pipeline stage can run without storage.
#[derive(Default)]
pub(super) struct MemoryDirectory {
    pub(super) skills: Vec<Skill>,
    pub(super) employees: Vec<EmployeeProfile>,
    pub(super) assignments: Mutex<Vec<AssignmentRow>>,
    pub(super) commits: Mutex<Vec<TeamCommit>>,
    pub(super) fail_commit: bool,
}

impl MemoryDirectory {
    pub(super) fn with_roster(
        skills: Vec<Skill>,
        employees: Vec<EmployeeProfile>,
        assignments: Vec<AssignmentRow>,
    ) -> Self {
        Self {
            skills,
            employees,
            assignments: Mutex::new(assignments),
            commits: Mutex::new(Vec::new()),
            fail_commit: false,
        }
    }

    /// Simulates another process assigning work between iterations.
    pub(super) fn add_assignment(&self, row: AssignmentRow) {
        self.assignments
            .lock()
            .expect("assignment mutex poisoned")
            .push(row);
    }

    pub(super) fn committed(&self) -> Vec<TeamCommit> {
        self.commits.lock().expect("commit mutex poisoned").clone()
    }
}

impl StaffingDirectory for MemoryDirectory {
    fn skills_in_scope(&self, _scope: &DepartmentScope) -> Result<Vec<Skill>, DirectoryError> {
        Ok(self.skills.clone())
    }

    fn employees_in_scope(
        &self,
        _scope: &DepartmentScope,
    ) -> Result<Vec<EmployeeProfile>, DirectoryError> {
        Ok(self.employees.clone())
    }

    fn assignments_in_scope(
        &self,
        _scope: &DepartmentScope,
    ) -> Result<Vec<AssignmentRow>, DirectoryError> {
        Ok(self
            .assignments
            .lock()
            .expect("assignment mutex poisoned")
            .clone())
    }

    fn commit_team(&self, commit: &TeamCommit) -> Result<(), CommitError> {
        if self.fail_commit {
            return Err(CommitError::Storage("database offline".to_string()));
        }
        self.commits
            .lock()
            .expect("commit mutex poisoned")
            .push(commit.clone());
        Ok(())
    }
}

/// Scripted ranking collaborator.
pub(super) enum ScriptedRanker {
    Returns(Vec<RankedSkill>),
    FailsUpstream,
}

impl SkillRanker for ScriptedRanker {
    fn rank(&self, _area: &str, _catalog: &[Skill]) -> Result<Vec<RankedSkill>, RankingError> {
        match self {
            ScriptedRanker::Returns(picks) => Ok(picks.clone()),
            ScriptedRanker::FailsUpstream => {
                Err(RankingError::Upstream("provider timeout".to_string()))
            }
        }
    }
}

pub(super) fn ranked(skill_id: i64, name: &str, reason: &str) -> RankedSkill {
    RankedSkill {
        skill_id: SkillId(skill_id),
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

pub(super) fn build_service(
    directory: MemoryDirectory,
    ranker: ScriptedRanker,
    config: EngineConfig,
) -> (
    StaffingService<MemoryDirectory, ScriptedRanker>,
    Arc<MemoryDirectory>,
) {
    let directory = Arc::new(directory);
    let service = StaffingService::new(directory.clone(), Arc::new(ranker), config);
    (service, directory)
}
