//! Candidate scoring and team composition engine for project staffing.
//!
//! The crate turns a ranked skill requirement list, per-person proficiency
//! profiles, and per-person active workload counts into an ordered team
//! proposal, then drives an accept/reject negotiation loop and a commit-time
//! allocation guard. Storage and the skill-ranking collaborator (an LLM or a
//! rules engine) stay behind traits; see [`workflows::staffing`].

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
