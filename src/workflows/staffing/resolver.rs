use serde::Deserialize;

use super::domain::{RequiredSkill, Skill, SkillId, MAX_REQUIRED_SKILLS};

/// A caller-supplied skill reference, either a catalog id or a free name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillRequest {
    ById(SkillId),
    ByName(String),
}

/// A collaborator's ranked pick with its short justification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedSkill {
    pub skill_id: SkillId,
    pub name: String,
    pub reason: String,
}

/// External ranking collaborator, typically an LLM or a rules engine.
///
/// Implementations must only return ids from the catalog they were handed;
/// the resolver still validates and discards anything foreign.
pub trait SkillRanker: Send + Sync {
    fn rank(&self, area: &str, catalog: &[Skill]) -> Result<Vec<RankedSkill>, RankingError>;
}

/// Upstream ranking failure, surfaced to the caller as retriable. The
/// resolver never fabricates a requirement list in its place.
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("ranking collaborator unavailable: {0}")]
    Upstream(String),
    #[error("malformed ranking payload: {0}")]
    MalformedPayload(String),
}

/// Outcome of requirement resolution.
///
/// An empty match is an explicit result, not an error: the caller answers
/// with an empty recommendation set instead of failing the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementResolution {
    Resolved(Vec<RequiredSkill>),
    NoMatchableSkills,
}

impl RequirementResolution {
    pub fn requirements(&self) -> &[RequiredSkill] {
        match self {
            RequirementResolution::Resolved(list) => list,
            RequirementResolution::NoMatchableSkills => &[],
        }
    }

    pub fn into_requirements(self) -> Vec<RequiredSkill> {
        match self {
            RequirementResolution::Resolved(list) => list,
            RequirementResolution::NoMatchableSkills => Vec::new(),
        }
    }
}

/// Normalizes free-form skill references into at most five ranked core
/// requirements, resolving only against the allowed catalog.
pub struct RequirementResolver;

impl RequirementResolver {
    /// Direct pass-through mode: case-insensitive exact match on catalog
    /// names (or exact id match). Unmatched entries are silently dropped;
    /// duplicates keep their first occurrence.
    pub fn resolve_direct(catalog: &[Skill], requested: &[SkillRequest]) -> RequirementResolution {
        let matched = requested.iter().filter_map(|request| match request {
            SkillRequest::ById(id) => catalog.iter().find(|skill| skill.id == *id),
            SkillRequest::ByName(name) => {
                let needle = name.trim();
                catalog
                    .iter()
                    .find(|skill| skill.name.eq_ignore_ascii_case(needle))
            }
        });

        Self::collect(matched.map(|skill| (skill, None)))
    }

    /// Collaborator-ranked mode: keeps only proposals whose id exists in
    /// the allowed catalog (hallucinated ids are rejected) and restores the
    /// catalog's canonical skill name.
    pub fn resolve_ranked(catalog: &[Skill], proposals: &[RankedSkill]) -> RequirementResolution {
        let matched = proposals.iter().filter_map(|proposal| {
            catalog
                .iter()
                .find(|skill| skill.id == proposal.skill_id)
                .map(|skill| (skill, Some(proposal.reason.clone())))
        });

        Self::collect(matched)
    }

    fn collect<'a>(
        matched: impl Iterator<Item = (&'a Skill, Option<String>)>,
    ) -> RequirementResolution {
        let mut seen = std::collections::BTreeSet::new();
        let mut requirements = Vec::new();

        for (skill, reason) in matched {
            if !seen.insert(skill.id) {
                continue;
            }
            let rank = requirements.len() as u8 + 1;
            requirements.push(RequiredSkill {
                skill_id: skill.id,
                name: skill.name.clone(),
                rank,
                reason: reason.filter(|text| !text.is_empty()),
            });
            if requirements.len() == MAX_REQUIRED_SKILLS {
                break;
            }
        }

        if requirements.is_empty() {
            RequirementResolution::NoMatchableSkills
        } else {
            RequirementResolution::Resolved(requirements)
        }
    }
}

#[derive(Debug, Deserialize)]
struct RankingPayload {
    top5: Vec<RankingPayloadEntry>,
}

#[derive(Debug, Deserialize)]
struct RankingPayloadEntry {
    #[serde(rename = "skillID")]
    skill_id: i64,
    #[serde(rename = "skillName")]
    name: String,
    #[serde(default)]
    reason: String,
}

/// Parses the strict-JSON ranking payload `{"top5": [{skillID, skillName,
/// reason}]}` that collaborators are instructed to return.
///
/// Providers occasionally wrap the object in code fences or commentary, so
/// the outermost brace pair is extracted before parsing. Anything that still
/// fails to parse is a malformed payload, not a partial result.
pub fn parse_ranking_payload(raw: &str) -> Result<Vec<RankedSkill>, RankingError> {
    let trimmed = raw.trim();
    let first = trimmed.find('{');
    let last = trimmed.rfind('}');
    let body = match (first, last) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => {
            return Err(RankingError::MalformedPayload(
                "no JSON object found in response".to_string(),
            ))
        }
    };

    let payload: RankingPayload = serde_json::from_str(body)
        .map_err(|err| RankingError::MalformedPayload(err.to_string()))?;

    Ok(payload
        .top5
        .into_iter()
        .take(MAX_REQUIRED_SKILLS)
        .map(|entry| RankedSkill {
            skill_id: SkillId(entry.skill_id),
            name: entry.name.trim().to_string(),
            reason: entry.reason.trim().to_string(),
        })
        .collect())
}
