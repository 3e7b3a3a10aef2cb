use serde::Serialize;

use super::domain::{EmployeeProfile, RequiredSkill, SkillId};
use super::workload::WorkloadSnapshot;
use crate::config::{EngineConfig, ScoringScale};

/// Derived score for one person in one scoring pass. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateScore {
    pub employee_id: super::domain::EmployeeId,
    /// Skill-fit score before any workload adjustment.
    pub base_score: f64,
    /// Amount removed from the base by the workload adjustment: the linear
    /// subtraction on the subtractive scale, `base * (1 - multiplier)` on
    /// the multiplicative one.
    pub penalty: f64,
    /// Clamped to be non-negative.
    pub final_score: f64,
    /// Fraction of required skills with any proficiency record, in [0, 1].
    pub coverage: f64,
    /// Average proficiency across only the matched skills.
    pub avg_matched_proficiency: f64,
    pub matched_skills: Vec<SkillId>,
}

/// Stateless scorer applying the configured scale to a candidate pool.
pub struct CandidateScorer {
    config: EngineConfig,
}

impl CandidateScorer {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Scores every person in scope and returns the pool sorted descending
    /// by final score, ties broken by lower employee id. That ordering is
    /// the sole contract the composer relies on.
    pub fn rank(
        &self,
        employees: &[EmployeeProfile],
        requirements: &[RequiredSkill],
        workload: &WorkloadSnapshot,
    ) -> Vec<CandidateScore> {
        let mut scores: Vec<CandidateScore> = employees
            .iter()
            .map(|employee| self.score(employee, requirements, workload.active_count(employee.id)))
            .collect();

        scores.sort_by(|a, b| {
            b.final_score
                .total_cmp(&a.final_score)
                .then(a.employee_id.cmp(&b.employee_id))
        });
        scores
    }

    /// Scores one person against the requirement list at a given workload.
    pub fn score(
        &self,
        employee: &EmployeeProfile,
        requirements: &[RequiredSkill],
        active_count: u32,
    ) -> CandidateScore {
        let matched_skills: Vec<SkillId> = requirements
            .iter()
            .filter(|required| employee.proficiency(required.skill_id).is_some())
            .map(|required| required.skill_id)
            .collect();

        let coverage = if requirements.is_empty() {
            0.0
        } else {
            matched_skills.len() as f64 / requirements.len() as f64
        };

        let avg_matched_proficiency = if matched_skills.is_empty() {
            0.0
        } else {
            let total: u32 = matched_skills
                .iter()
                .filter_map(|skill| employee.proficiency(*skill))
                .map(u32::from)
                .sum();
            f64::from(total) / matched_skills.len() as f64
        };

        let (base_score, penalty) = match self.config.scoring_scale {
            ScoringScale::Subtractive => {
                let base: f64 = requirements
                    .iter()
                    .map(|required| {
                        let proficiency = employee.proficiency(required.skill_id).unwrap_or(0);
                        f64::from(required.weight()) * f64::from(proficiency)
                    })
                    .sum();
                let penalty = self.config.penalty_per_active * f64::from(active_count);
                (base, penalty)
            }
            ScoringScale::Multiplicative => {
                let normalized =
                    avg_matched_proficiency / f64::from(self.config.proficiency_max);
                let base = (coverage * 60.0 + normalized * 40.0).min(100.0);
                let penalty = base * (1.0 - workload_multiplier(active_count));
                (base, penalty)
            }
        };

        let final_score = (base_score - penalty).max(0.0);

        CandidateScore {
            employee_id: employee.id,
            base_score,
            penalty,
            final_score,
            coverage,
            avg_matched_proficiency,
            matched_skills,
        }
    }
}

/// Workload multiplier for the normalized scale: full credit with an empty
/// plate, half credit at or beyond three active assignments.
fn workload_multiplier(active_count: u32) -> f64 {
    match active_count {
        0 => 1.0,
        1 => 0.9,
        2 => 0.75,
        _ => 0.5,
    }
}
