use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::composer::TeamComposer;
use super::domain::{
    DepartmentScope, EmployeeId, EmployeeProfile, PriorityTier, ProjectId, RequiredSkill,
    TeamCommit,
};
use super::guard::AllocationGuard;
use super::negotiation::{NegotiationError, NegotiationSession, NegotiationState};
use super::repository::{CommitError, DirectoryError, StaffingDirectory};
use super::resolver::{
    RankingError, RequirementResolution, RequirementResolver, SkillRanker, SkillRequest,
};
use super::scoring::{CandidateScore, CandidateScorer};
use super::workload::WorkloadSnapshot;
use crate::config::EngineConfig;

/// Presentation row for one recommended or proposed candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateView {
    pub employee_id: EmployeeId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub match_score: f64,
    pub coverage_percent: f64,
    pub avg_proficiency: f64,
    pub skills_matched: Vec<String>,
    pub active_assignments: u32,
}

/// Service composing the resolver, scorer, composer, negotiation loop, and
/// allocation guard over a directory and a ranking collaborator.
///
/// Each call is a stateless computation over current directory state; the
/// only state carried between calls is the caller-held negotiation session.
pub struct StaffingService<D, R> {
    directory: Arc<D>,
    ranker: Arc<R>,
    scorer: CandidateScorer,
    config: EngineConfig,
}

impl<D, R> StaffingService<D, R>
where
    D: StaffingDirectory + 'static,
    R: SkillRanker + 'static,
{
    pub fn new(directory: Arc<D>, ranker: Arc<R>, config: EngineConfig) -> Self {
        let scorer = CandidateScorer::new(config.clone());
        Self {
            directory,
            ranker,
            scorer,
            config,
        }
    }

    /// Resolves caller-supplied ids/names against the scoped catalog.
    pub fn resolve_direct(
        &self,
        scope: &DepartmentScope,
        requested: &[SkillRequest],
    ) -> Result<RequirementResolution, StaffingError> {
        let catalog = self.directory.skills_in_scope(scope)?;
        let resolution = RequirementResolver::resolve_direct(&catalog, requested);
        debug!(
            department = scope.department_id,
            resolved = resolution.requirements().len(),
            "direct requirement resolution"
        );
        Ok(resolution)
    }

    /// Asks the ranking collaborator for the most critical catalog skills
    /// for a textual skill area, then validates its picks.
    pub fn resolve_from_area(
        &self,
        scope: &DepartmentScope,
        area: &str,
    ) -> Result<RequirementResolution, StaffingError> {
        let catalog = self.directory.skills_in_scope(scope)?;
        if catalog.is_empty() {
            return Ok(RequirementResolution::NoMatchableSkills);
        }

        let proposals = self.ranker.rank(area, &catalog)?;
        let resolution = RequirementResolver::resolve_ranked(&catalog, &proposals);
        info!(
            department = scope.department_id,
            proposed = proposals.len(),
            resolved = resolution.requirements().len(),
            "ranked requirement resolution"
        );
        Ok(resolution)
    }

    /// One-shot ranked recommendation: the top `limit` candidates for the
    /// requirement list, with display detail per candidate.
    pub fn recommend(
        &self,
        scope: &DepartmentScope,
        requirements: &[RequiredSkill],
        limit: usize,
    ) -> Result<Vec<CandidateView>, StaffingError> {
        if requirements.is_empty() {
            return Ok(Vec::new());
        }

        let (employees, ranked, workload) = self.ranked_candidates(scope, requirements)?;
        let views = ranked
            .iter()
            .take(limit)
            .filter_map(|score| {
                employees
                    .iter()
                    .find(|employee| employee.id == score.employee_id)
                    .map(|employee| candidate_view(employee, score, requirements, &workload))
            })
            .collect();
        Ok(views)
    }

    /// Opens a negotiation session for a resolved requirement list.
    pub fn open_negotiation(
        &self,
        requirements: Vec<RequiredSkill>,
        team_size: usize,
        tier: PriorityTier,
    ) -> NegotiationSession {
        NegotiationSession::new(requirements, team_size, tier)
    }

    /// Generates the session's next proposal from fresh directory state.
    ///
    /// A no-op when a proposal is already on the table; an empty
    /// regeneration moves the session to `Exhausted`.
    pub fn propose(
        &self,
        session: &mut NegotiationSession,
        scope: &DepartmentScope,
    ) -> Result<NegotiationState, StaffingError> {
        if session.state().is_terminal() {
            return Err(NegotiationError::Concluded.into());
        }
        if !session.needs_proposal() {
            return Ok(session.state());
        }

        let (_, ranked, workload) = self.ranked_candidates(scope, session.requirements())?;
        let proposal = TeamComposer::compose(
            &ranked,
            session.team_size(),
            session.tier(),
            session.excluded(),
            &workload,
        );

        let state = session.record_proposal(proposal)?;
        match state {
            NegotiationState::Exhausted => {
                info!(
                    tier = session.tier().label(),
                    excluded = session.excluded().len(),
                    "no eligible candidates remain, negotiation exhausted"
                );
            }
            _ => {
                info!(
                    tier = session.tier().label(),
                    members = session
                        .current_proposal()
                        .map(|proposal| proposal.members.len())
                        .unwrap_or(0),
                    "team proposal generated"
                );
            }
        }
        Ok(state)
    }

    /// Candidate detail for the proposal currently on the table.
    pub fn proposal_preview(
        &self,
        session: &NegotiationSession,
        scope: &DepartmentScope,
    ) -> Result<Vec<CandidateView>, StaffingError> {
        let proposal = match session.current_proposal() {
            Some(proposal) => proposal.clone(),
            None => return Ok(Vec::new()),
        };

        let (employees, ranked, workload) =
            self.ranked_candidates(scope, session.requirements())?;
        let views = proposal
            .members
            .iter()
            .filter_map(|member| {
                let employee = employees.iter().find(|employee| employee.id == *member)?;
                let score = ranked.iter().find(|score| score.employee_id == *member)?;
                Some(candidate_view(
                    employee,
                    score,
                    session.requirements(),
                    &workload,
                ))
            })
            .collect();
        Ok(views)
    }

    /// Rejects the proposal on the table and immediately regenerates,
    /// excluding every member just turned down.
    pub fn reject(
        &self,
        session: &mut NegotiationSession,
        scope: &DepartmentScope,
    ) -> Result<NegotiationState, StaffingError> {
        session.reject()?;
        self.propose(session, scope)
    }

    /// Accepts the proposal on the table, re-validates workload at commit
    /// time, and writes the team as one atomic unit.
    ///
    /// On a capacity breach or storage failure nothing is written and the
    /// proposal is put back on the table so the caller can reject it and
    /// continue negotiating.
    pub fn accept(
        &self,
        session: &mut NegotiationSession,
        scope: &DepartmentScope,
        project_id: ProjectId,
    ) -> Result<TeamCommit, StaffingError> {
        let proposal = session.accept()?;

        let assignments = match self.directory.assignments_in_scope(scope) {
            Ok(rows) => rows,
            Err(err) => {
                session.reopen(proposal);
                return Err(err.into());
            }
        };
        let workload = WorkloadSnapshot::compute(&assignments, self.today(), &self.config);

        if let Err(err) = AllocationGuard::validate(&workload, &proposal.members) {
            warn!(project = %project_id, "allocation guard rejected accepted team: {err}");
            session.reopen(proposal);
            return Err(err.into());
        }

        let commit =
            AllocationGuard::build_commit(project_id, &proposal.members, session.requirements());
        if let Err(err) = self.directory.commit_team(&commit) {
            session.reopen(proposal);
            return Err(err.into());
        }

        info!(
            project = %project_id,
            members = commit.assignments.len(),
            "team committed"
        );
        Ok(commit)
    }

    fn ranked_candidates(
        &self,
        scope: &DepartmentScope,
        requirements: &[RequiredSkill],
    ) -> Result<(Vec<EmployeeProfile>, Vec<CandidateScore>, WorkloadSnapshot), StaffingError> {
        let employees = self.directory.employees_in_scope(scope)?;
        let assignments = self.directory.assignments_in_scope(scope)?;
        let workload = WorkloadSnapshot::compute(&assignments, self.today(), &self.config);
        let ranked = self.scorer.rank(&employees, requirements, &workload);
        Ok((employees, ranked, workload))
    }

    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

fn candidate_view(
    employee: &EmployeeProfile,
    score: &CandidateScore,
    requirements: &[RequiredSkill],
    workload: &WorkloadSnapshot,
) -> CandidateView {
    let skills_matched = score
        .matched_skills
        .iter()
        .filter_map(|skill| {
            requirements
                .iter()
                .find(|required| required.skill_id == *skill)
                .map(|required| required.name.clone())
        })
        .collect();

    CandidateView {
        employee_id: employee.id,
        name: employee.name.clone(),
        title: employee.title.clone(),
        team: employee.team.clone(),
        department: employee.department.clone(),
        match_score: round_to(score.final_score, 1),
        coverage_percent: round_to(score.coverage * 100.0, 1),
        avg_proficiency: round_to(score.avg_matched_proficiency, 2),
        skills_matched,
        active_assignments: workload.active_count(employee.id),
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Error raised by the staffing service.
#[derive(Debug, thiserror::Error)]
pub enum StaffingError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Ranking(#[from] RankingError),
    #[error(transparent)]
    Commit(#[from] CommitError),
    #[error(transparent)]
    Negotiation(#[from] NegotiationError),
}
