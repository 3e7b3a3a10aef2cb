use std::collections::BTreeSet;

use super::domain::{EmployeeId, PriorityTier, RequiredSkill, TeamProposal};

/// Where a negotiation session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    /// A proposal is on the table awaiting accept or reject.
    Proposed,
    /// The last proposal was rejected; a fresh one must be generated.
    Regenerating,
    /// Terminal: the caller accepted the current proposal.
    Accepted,
    /// Terminal: no further proposal can be generated.
    Exhausted,
}

impl NegotiationState {
    pub const fn label(self) -> &'static str {
        match self {
            NegotiationState::Proposed => "proposed",
            NegotiationState::Regenerating => "regenerating",
            NegotiationState::Accepted => "accepted",
            NegotiationState::Exhausted => "exhausted",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            NegotiationState::Accepted | NegotiationState::Exhausted
        )
    }
}

/// Error raised on out-of-order negotiation calls.
#[derive(Debug, thiserror::Error)]
pub enum NegotiationError {
    #[error("no proposal is awaiting a decision")]
    NoActiveProposal,
    #[error("negotiation already concluded")]
    Concluded,
}

/// One synchronous accept/reject cycle over a fixed requirement list.
///
/// The session only tracks decision state and the growing exclusion set;
/// the service regenerates proposals from fresh directory data on every
/// iteration, so workload changes between iterations are picked up.
#[derive(Debug, Clone)]
pub struct NegotiationSession {
    requirements: Vec<RequiredSkill>,
    team_size: usize,
    tier: PriorityTier,
    excluded: BTreeSet<EmployeeId>,
    state: NegotiationState,
    current: Option<TeamProposal>,
}

impl NegotiationSession {
    /// Opens a session awaiting its first proposal, with an empty
    /// exclusion set.
    pub fn new(requirements: Vec<RequiredSkill>, team_size: usize, tier: PriorityTier) -> Self {
        Self {
            requirements,
            team_size,
            tier,
            excluded: BTreeSet::new(),
            state: NegotiationState::Regenerating,
            current: None,
        }
    }

    pub fn requirements(&self) -> &[RequiredSkill] {
        &self.requirements
    }

    pub fn team_size(&self) -> usize {
        self.team_size
    }

    pub fn tier(&self) -> PriorityTier {
        self.tier
    }

    pub fn excluded(&self) -> &BTreeSet<EmployeeId> {
        &self.excluded
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn current_proposal(&self) -> Option<&TeamProposal> {
        self.current.as_ref()
    }

    /// Whether a new proposal needs to be generated.
    pub fn needs_proposal(&self) -> bool {
        self.state == NegotiationState::Regenerating
    }

    /// Records a freshly composed proposal. An empty proposal exhausts the
    /// session: no further regeneration is attempted after that.
    pub(crate) fn record_proposal(
        &mut self,
        proposal: TeamProposal,
    ) -> Result<NegotiationState, NegotiationError> {
        if self.state.is_terminal() {
            return Err(NegotiationError::Concluded);
        }
        if proposal.is_empty() {
            self.current = None;
            self.state = NegotiationState::Exhausted;
        } else {
            self.current = Some(proposal);
            self.state = NegotiationState::Proposed;
        }
        Ok(self.state)
    }

    /// Accepts the proposal on the table and concludes the session.
    pub(crate) fn accept(&mut self) -> Result<TeamProposal, NegotiationError> {
        match self.state {
            NegotiationState::Proposed => {
                let proposal = self
                    .current
                    .take()
                    .ok_or(NegotiationError::NoActiveProposal)?;
                self.state = NegotiationState::Accepted;
                Ok(proposal)
            }
            NegotiationState::Regenerating => Err(NegotiationError::NoActiveProposal),
            _ => Err(NegotiationError::Concluded),
        }
    }

    /// Rejects the proposal on the table: every proposed member joins the
    /// exclusion set, which therefore grows strictly on each rejection.
    pub(crate) fn reject(&mut self) -> Result<(), NegotiationError> {
        match self.state {
            NegotiationState::Proposed => {
                let proposal = self
                    .current
                    .take()
                    .ok_or(NegotiationError::NoActiveProposal)?;
                self.excluded.extend(proposal.members);
                self.state = NegotiationState::Regenerating;
                Ok(())
            }
            NegotiationState::Regenerating => Err(NegotiationError::NoActiveProposal),
            _ => Err(NegotiationError::Concluded),
        }
    }

    /// Reverts an accept whose allocation check failed, putting the
    /// proposal back on the table so the caller can reject and retry.
    pub(crate) fn reopen(&mut self, proposal: TeamProposal) {
        self.current = Some(proposal);
        self.state = NegotiationState::Proposed;
    }
}
