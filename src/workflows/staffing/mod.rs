//! Team staffing: requirement resolution, candidate scoring, priority-tier
//! composition, the accept/reject negotiation loop, and the commit-time
//! allocation guard.
//!
//! Storage and the skill-ranking collaborator stay behind the traits in
//! [`repository`] and [`resolver`], so the whole pipeline can be exercised
//! against in-memory fakes.

pub(crate) mod composer;
pub mod domain;
pub(crate) mod guard;
pub mod negotiation;
pub mod repository;
pub mod resolver;
pub(crate) mod scoring;
pub mod service;
pub(crate) mod workload;

#[cfg(test)]
mod tests;

pub use domain::{
    AssignmentRole, AssignmentRow, DepartmentScope, EmployeeId, EmployeeProfile, PriorityTier,
    ProjectId, ProjectSkillRow, RequiredSkill, Skill, SkillId, TeamAssignment, TeamCommit,
    TeamProposal, MAX_REQUIRED_SKILLS,
};
pub use negotiation::{NegotiationError, NegotiationSession, NegotiationState};
pub use repository::{CommitError, DirectoryError, StaffingDirectory};
pub use resolver::{
    parse_ranking_payload, RankedSkill, RankingError, RequirementResolution, RequirementResolver,
    SkillRanker, SkillRequest,
};
pub use scoring::{CandidateScore, CandidateScorer};
pub use service::{CandidateView, StaffingError, StaffingService};
pub use workload::WorkloadSnapshot;
