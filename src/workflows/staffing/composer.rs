use std::collections::BTreeSet;

use super::domain::{EmployeeId, PriorityTier, TeamProposal};
use super::scoring::CandidateScore;
use super::workload::WorkloadSnapshot;

/// Selects the final roster from a ranked candidate pool, mixing top-ranked
/// and deliberately weaker picks according to the priority tier.
pub struct TeamComposer;

impl TeamComposer {
    /// Composes a proposal of up to `team_size` members.
    ///
    /// Excluded people are filtered out of the ranked pool before selection
    /// (they were still scored, for pool consistency, but are never
    /// selectable). Critical projects take the top of the ranking outright,
    /// regardless of workload fairness; every other tier draws only from
    /// people under the hard cap, so the "weaker" slots are not filled with
    /// candidates who merely scored low for being overloaded. A short pool
    /// yields a short (possibly empty) proposal, never padding.
    pub fn compose(
        ranked: &[CandidateScore],
        team_size: usize,
        tier: PriorityTier,
        excluded: &BTreeSet<EmployeeId>,
        workload: &WorkloadSnapshot,
    ) -> TeamProposal {
        let pool: Vec<&CandidateScore> = ranked
            .iter()
            .filter(|candidate| !excluded.contains(&candidate.employee_id))
            .collect();

        let members = if team_size == 0 {
            Vec::new()
        } else if tier == PriorityTier::Critical {
            pool.iter()
                .take(team_size)
                .map(|candidate| candidate.employee_id)
                .collect()
        } else {
            Self::compose_mixed(&pool, team_size, tier, workload)
        };

        TeamProposal {
            members,
            excluded: excluded.clone(),
        }
    }

    fn compose_mixed(
        pool: &[&CandidateScore],
        team_size: usize,
        tier: PriorityTier,
        workload: &WorkloadSnapshot,
    ) -> Vec<EmployeeId> {
        let eligible: Vec<&CandidateScore> = pool
            .iter()
            .copied()
            .filter(|candidate| !workload.at_capacity(candidate.employee_id))
            .collect();

        let high_target = high_selected_target(tier, team_size);
        let mut members: Vec<EmployeeId> = eligible
            .iter()
            .take(high_target)
            .map(|candidate| candidate.employee_id)
            .collect();

        // Weak slots come from the bottom of the remaining ranking; when the
        // bottom cannot supply enough, the window widens upward through the
        // rest of the eligible pool (still lowest-scoring first by virtue of
        // the slice), which is the backfill rule.
        let remaining = &eligible[members.len()..];
        let needed = team_size - members.len();
        let start = remaining.len().saturating_sub(needed);
        members.extend(remaining[start..].iter().map(|candidate| candidate.employee_id));

        members
    }
}

/// How many members come from the top of the ranking for a tier, with the
/// remainder drawn from the bottom. Round-to-nearest, and at least one
/// high-selected member whenever a team is requested at all.
fn high_selected_target(tier: PriorityTier, team_size: usize) -> usize {
    match tier {
        PriorityTier::Critical => team_size,
        PriorityTier::High => ((team_size as f64 * 0.75).round() as usize).clamp(1, team_size),
        PriorityTier::Medium => ((team_size as f64 * 0.5).round() as usize).clamp(1, team_size),
        PriorityTier::Low => team_size.min(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_targets_follow_the_mix_table() {
        assert_eq!(high_selected_target(PriorityTier::Critical, 8), 8);
        assert_eq!(high_selected_target(PriorityTier::High, 8), 6);
        assert_eq!(high_selected_target(PriorityTier::Medium, 8), 4);
        assert_eq!(high_selected_target(PriorityTier::Low, 8), 2);
        assert_eq!(high_selected_target(PriorityTier::Low, 1), 1);
        // minimum one high-selected whenever a team is requested
        assert_eq!(high_selected_target(PriorityTier::High, 1), 1);
        assert_eq!(high_selected_target(PriorityTier::Medium, 1), 1);
    }
}
