//! Skill scanner: discovers skill definition files under one directory.
//!
//! Discovery rules:
//!
//! - `*.md` files directly inside the root are candidates.
//! - Every descendant directory contributes at most one candidate, its
//!   `SKILL.md` file.
//! - Hidden entries and `node_modules` are skipped at every depth.
//!
//! Scanning never fails.  Unreadable directories and files contribute
//! nothing, and candidates without a description are not skills.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::frontmatter::{extract_fields, parse_bool};
use crate::types::{Skill, SkillSource};

/// Reserved definition filename inside a skill directory.
pub const SKILL_FILENAME: &str = "SKILL.md";

/// Extension of loose skill files at the root.
const SKILL_EXTENSION: &str = "md";

/// Dependency directory never descended into.
const IGNORED_DIR: &str = "node_modules";

/// Header keys the scanner needs.
const DISCOVERY_KEYS: &[&str] = &["name", "description", "disable-model-invocation"];

/// Discover all skills under `root`.
///
/// Results are ordered: loose root files first, then nested `SKILL.md`
/// files depth-first, each level in file-name order.  Symbolic links to
/// directories are not followed.
pub fn scan_skills_dir(root: &Path, source: &SkillSource) -> Vec<Skill> {
    if !root.is_dir() {
        tracing::debug!(path = %root.display(), "skills directory does not exist");
        return Vec::new();
    }

    let root = absolute(root);
    let mut candidates = Vec::new();
    let mut nested = Vec::new();

    let walker = WalkDir::new(&root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry.path()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "cannot read directory entry");
                continue;
            }
        };
        let path = entry.path();

        if entry.file_type().is_dir() {
            let skill_md = path.join(SKILL_FILENAME);
            if skill_md.is_file() {
                nested.push(skill_md);
            }
        } else if entry.depth() == 1
            && path.is_file()
            && path.extension().is_some_and(|e| e == SKILL_EXTENSION)
        {
            candidates.push(path.to_path_buf());
        }
    }
    candidates.append(&mut nested);

    let skills: Vec<Skill> = candidates
        .iter()
        .filter_map(|path| load_skill_file(path, source))
        .collect();

    tracing::debug!(
        count = skills.len(),
        dir = %root.display(),
        source = %source,
        "skills scanned"
    );
    skills
}

fn is_ignored(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.') || n == IGNORED_DIR)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Read one candidate file.  Returns `None` when it is not a valid skill.
fn load_skill_file(path: &Path, source: &SkillSource) -> Option<Skill> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "failed to read skill file");
            return None;
        }
    };

    let fields = extract_fields(&content, DISCOVERY_KEYS);

    let description = fields
        .get("description")
        .map(|d| d.trim())
        .unwrap_or_default();
    if description.is_empty() {
        tracing::debug!(path = %path.display(), "no description, skipping");
        return None;
    }

    let name = resolve_name(path, fields.get("name").copied())?;
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf());

    Some(Skill {
        name,
        description: description.to_owned(),
        file_path: path.to_path_buf(),
        base_dir,
        source: source.clone(),
        disable_model_invocation: parse_bool(
            fields.get("disable-model-invocation").copied(),
            false,
        ),
    })
}

/// Name precedence: explicit `name` key, then the skill directory name for
/// `SKILL.md` files, then the file stem.
fn resolve_name(path: &Path, explicit: Option<&str>) -> Option<String> {
    if let Some(name) = explicit.map(str::trim).filter(|n| !n.is_empty()) {
        return Some(name.to_owned());
    }

    let is_skill_md = path.file_name().is_some_and(|n| n == SKILL_FILENAME);
    if is_skill_md
        && let Some(dir_name) = path
            .parent()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
    {
        return Some(dir_name.to_lowercase());
    }

    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
}
