//! Policy enricher: turns discovered skills into orchestration entries.
//!
//! The scanner only reads what discovery needs.  This module reads each
//! surviving file again for its whole header and derives the
//! [`InvocationPolicy`].

use crate::frontmatter::{Frontmatter, parse_frontmatter};
use crate::types::{InvocationPolicy, Skill, SkillEntry};

/// Enrich every skill, keeping input order.
pub fn enrich_skills(skills: &[Skill]) -> Vec<SkillEntry> {
    skills.iter().map(enrich_skill).collect()
}

/// Enrich a single skill.  An unreadable file yields an empty header.
pub fn enrich_skill(skill: &Skill) -> SkillEntry {
    let frontmatter = match std::fs::read_to_string(&skill.file_path) {
        Ok(content) => parse_frontmatter(&content),
        Err(e) => {
            tracing::debug!(
                skill = %skill.name,
                path = %skill.file_path.display(),
                error = %e,
                "failed to re-read skill file"
            );
            Frontmatter::new()
        }
    };

    let invocation = InvocationPolicy::from_frontmatter(&frontmatter);

    SkillEntry {
        skill: skill.clone(),
        frontmatter,
        invocation,
    }
}
