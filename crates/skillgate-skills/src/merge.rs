//! Skill merger: reduces several ranked sources to one skill per name.
//!
//! Sources are given lowest priority first.  Each source is scanned on its
//! own; precedence is applied only after every source's full result has been
//! collected, so the outcome never depends on which scan finishes first.

use std::collections::HashMap;
use std::path::PathBuf;

use futures::future::join_all;

use crate::scanner::scan_skills_dir;
use crate::types::{Skill, SkillSource};

/// One ranked skill directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDir {
    pub path: PathBuf,
    pub source: SkillSource,
}

impl SkillDir {
    pub fn new(path: impl Into<PathBuf>, source: SkillSource) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// Apply last-write-wins precedence over per-source scan results.
///
/// `batches` must be ordered lowest priority first.  A later record for a
/// name replaces the earlier one entirely but keeps its position, so the
/// output is ordered by first discovery.
pub fn merge_skills(batches: Vec<Vec<Skill>>) -> Vec<Skill> {
    let mut merged: Vec<Skill> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for skill in batches.into_iter().flatten() {
        let existing = index.get(&skill.name).copied();
        match existing {
            Some(slot) => {
                tracing::debug!(
                    name = %skill.name,
                    from = %merged[slot].source,
                    to = %skill.source,
                    "skill overridden"
                );
                merged[slot] = skill;
            }
            None => {
                index.insert(skill.name.clone(), merged.len());
                merged.push(skill);
            }
        }
    }

    merged
}

/// Scan every directory in order and merge, without a runtime.
pub fn merge_skill_dirs(dirs: &[SkillDir]) -> Vec<Skill> {
    let batches = dirs
        .iter()
        .map(|dir| scan_skills_dir(&dir.path, &dir.source))
        .collect();
    merge_skills(batches)
}

/// Scan every directory concurrently on the blocking pool, then merge.
///
/// Results are joined in input order before precedence is applied.  A scan
/// task that panics contributes nothing.
pub async fn load_skill_sources(dirs: &[SkillDir]) -> Vec<Skill> {
    let tasks = dirs.iter().cloned().map(|dir| {
        tokio::task::spawn_blocking(move || scan_skills_dir(&dir.path, &dir.source))
    });

    let batches = join_all(tasks)
        .await
        .into_iter()
        .zip(dirs)
        .map(|(result, dir)| match result {
            Ok(skills) => skills,
            Err(e) => {
                tracing::warn!(
                    path = %dir.path.display(),
                    error = %e,
                    "skill scan task failed"
                );
                Vec::new()
            }
        })
        .collect();

    merge_skills(batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn skill(name: &str, description: &str, source: SkillSource) -> Skill {
        Skill {
            name: name.into(),
            description: description.into(),
            file_path: PathBuf::from(format!("/skills/{name}/SKILL.md")),
            base_dir: PathBuf::from(format!("/skills/{name}")),
            source,
            disable_model_invocation: false,
        }
    }

    fn write_skill(root: &Path, dir: &str, name: &str, description: &str) {
        let path = root.join(dir);
        std::fs::create_dir_all(&path).unwrap();
        std::fs::write(
            path.join("SKILL.md"),
            format!("---\nname: {name}\ndescription: {description}\n---\n"),
        )
        .unwrap();
    }

    #[test]
    fn later_source_replaces_whole_record() {
        let mut low = skill("foo", "low", SkillSource::Bundled);
        low.disable_model_invocation = true;
        let high = skill("foo", "high", SkillSource::Workspace);

        let merged = merge_skills(vec![vec![low], vec![high.clone()]]);
        assert_eq!(merged, vec![high]);
    }

    #[test]
    fn order_follows_first_discovery() {
        let merged = merge_skills(vec![
            vec![
                skill("a", "1", SkillSource::Bundled),
                skill("b", "1", SkillSource::Bundled),
            ],
            vec![
                skill("c", "2", SkillSource::Workspace),
                skill("a", "2", SkillSource::Workspace),
            ],
        ]);
        let names: Vec<_> = merged.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(merged[0].description, "2");
    }

    #[test]
    fn names_are_case_sensitive_keys() {
        let merged = merge_skills(vec![
            vec![skill("Deploy", "upper", SkillSource::Managed)],
            vec![skill("deploy", "lower", SkillSource::Workspace)],
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn sync_merge_skips_missing_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        write_skill(tmp.path(), "foo", "foo", "present");

        let merged = merge_skill_dirs(&[
            SkillDir::new("/nonexistent/a", SkillSource::Bundled),
            SkillDir::new(tmp.path(), SkillSource::Workspace),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].description, "present");
    }

    #[tokio::test]
    async fn async_merge_is_last_write_wins() {
        let low = tempfile::tempdir().unwrap();
        let high = tempfile::tempdir().unwrap();
        write_skill(low.path(), "foo", "foo", "from low");
        write_skill(low.path(), "bar", "bar", "only low");
        write_skill(high.path(), "foo", "foo", "from high");

        let merged = load_skill_sources(&[
            SkillDir::new(low.path(), SkillSource::Managed),
            SkillDir::new(high.path(), SkillSource::Workspace),
        ])
        .await;

        assert_eq!(merged.len(), 2);
        let foo = merged.iter().find(|s| s.name == "foo").unwrap();
        assert_eq!(foo.description, "from high");
        assert_eq!(foo.source, SkillSource::Workspace);
    }
}
