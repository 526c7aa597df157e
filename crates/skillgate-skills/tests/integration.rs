//! Integration tests for the skillgate-skills crate.
//!
//! These tests build real skill trees on disk and run them through the full
//! scan → merge → enrich → synthesize pipeline.

use std::path::Path;
use std::sync::Arc;

use skillgate_skills::{
    SkillDir, SkillManager, SkillSource, SkillsConfig, build_command_specs, enrich_skills,
    format_skills_for_prompt, load_skill_sources, match_direct, match_dispatch, merge_skill_dirs,
    resolve_command, scan_skills_dir,
};

fn write_skill(root: &Path, dir: &str, header: &str) {
    let path = root.join(dir);
    std::fs::create_dir_all(&path).unwrap();
    std::fs::write(
        path.join("SKILL.md"),
        format!("---\n{header}\n---\n\n# Instructions\n\nDo the thing.\n"),
    )
    .unwrap();
}

// ═══════════════════════════════════════════════════════════════════════
//  Discovery and merge
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn nonexistent_directory_is_empty() {
    assert!(scan_skills_dir(Path::new("/definitely/not/here"), &SkillSource::Bundled).is_empty());
}

#[test]
fn higher_priority_source_wins() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    write_skill(a.path(), "foo", "name: foo\ndescription: from A");
    write_skill(b.path(), "foo", "name: foo\ndescription: from B");

    let merged = merge_skill_dirs(&[
        SkillDir::new(a.path(), SkillSource::Managed),
        SkillDir::new(b.path(), SkillSource::Workspace),
    ]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].description, "from B");
    assert_eq!(merged[0].source, SkillSource::Workspace);
}

#[test]
fn skill_without_description_is_not_discovered() {
    let tmp = tempfile::tempdir().unwrap();
    write_skill(tmp.path(), "empty", "name: empty\ndescription:");
    write_skill(tmp.path(), "absent", "name: absent");
    assert!(scan_skills_dir(tmp.path(), &SkillSource::Workspace).is_empty());
}

#[tokio::test]
async fn parallel_load_matches_sequential_merge() {
    let dirs: Vec<_> = (0..4).map(|_| tempfile::tempdir().unwrap()).collect();
    for (i, dir) in dirs.iter().enumerate() {
        write_skill(dir.path(), "shared", &format!("name: shared\ndescription: tier {i}"));
        write_skill(dir.path(), &format!("own{i}"), &format!("description: own {i}"));
    }
    let sources: Vec<_> = dirs
        .iter()
        .map(|d| SkillDir::new(d.path(), SkillSource::Custom("tier".into())))
        .collect();

    let parallel = load_skill_sources(&sources).await;
    let sequential = merge_skill_dirs(&sources);
    assert_eq!(parallel, sequential);

    let shared = parallel.iter().find(|s| s.name == "shared").unwrap();
    assert_eq!(shared.description, "tier 3");
    assert_eq!(parallel.len(), 5);
}

// ═══════════════════════════════════════════════════════════════════════
//  End-to-end
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn case_distinct_names_get_suffixed_commands() {
    let managed = tempfile::tempdir().unwrap();
    let workspace = tempfile::tempdir().unwrap();
    write_skill(
        managed.path(),
        "deploy",
        "name: Deploy Service\ndescription: Deploy from the managed tier",
    );
    write_skill(
        workspace.path(),
        "deploy",
        "name: deploy_service\ndescription: Deploy from the workspace",
    );

    let merged = merge_skill_dirs(&[
        SkillDir::new(managed.path(), SkillSource::Managed),
        SkillDir::new(workspace.path(), SkillSource::Workspace),
    ]);
    assert_eq!(merged.len(), 2);

    let entries = enrich_skills(&merged);
    let commands = build_command_specs(&entries, &[]);
    let names: Vec<_> = commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["deploy_service", "deploy_service_2"]);

    let m = match_dispatch("/skill Deploy args here", &commands).unwrap();
    assert_eq!(m.command.skill_name, "Deploy Service");
    assert_eq!(m.args.as_deref(), Some("args here"));

    let m = match_direct("/DEPLOY_SERVICE_2", &commands).unwrap();
    assert_eq!(m.command.skill_name, "deploy_service");
    assert_eq!(m.args, None);
}

#[test]
fn prompt_escapes_skill_authored_content() {
    let tmp = tempfile::tempdir().unwrap();
    write_skill(
        tmp.path(),
        "tricky",
        r#"description: Use <b> & "quotes" freely"#,
    );

    let skills = scan_skills_dir(tmp.path(), &SkillSource::Workspace);
    let prompt = format_skills_for_prompt(&skills);
    assert!(prompt.contains("Use &lt;b&gt; &amp; &quot;quotes&quot; freely"));
    assert!(!prompt.contains("<b>"));
    assert!(!prompt.contains(r#""quotes""#));
    assert!(prompt.contains(&format!(
        "<location>{}</location>",
        skills[0].file_path.display()
    )));
}

#[tokio::test]
async fn manager_from_config_with_reserved_commands() {
    let workspace = tempfile::tempdir().unwrap();
    let bundled = tempfile::tempdir().unwrap();
    write_skill(bundled.path(), "status", "description: bundled status report");
    write_skill(workspace.path(), "review", "description: review code");

    let config = SkillsConfig {
        workspace_dir: Some(workspace.path().to_path_buf()),
        managed_dir: Some("/nonexistent/managed".into()),
        bundled_dir: Some(bundled.path().to_path_buf()),
        extra_dirs: Vec::new(),
        reserved_commands: vec!["status".into()],
    };

    let mgr = SkillManager::from_config(&config);
    let snapshot = mgr.load().await;
    let names: Vec<_> = snapshot.commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["status_2", "review"]);

    let m = resolve_command("/review src/main.rs", &snapshot.commands).unwrap();
    assert_eq!(m.args.as_deref(), Some("src/main.rs"));
}

#[tokio::test]
async fn concurrent_first_loads_share_one_snapshot() {
    let tmp = tempfile::tempdir().unwrap();
    for i in 0..10 {
        write_skill(tmp.path(), &format!("s{i}"), &format!("description: skill {i}"));
    }

    let mgr = Arc::new(SkillManager::new(vec![SkillDir::new(
        tmp.path(),
        SkillSource::Workspace,
    )]));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let mgr = Arc::clone(&mgr);
            tokio::spawn(async move { mgr.load().await })
        })
        .collect();

    let mut snapshots = Vec::new();
    for handle in handles {
        snapshots.push(handle.await.unwrap());
    }

    assert!(snapshots.iter().all(|s| Arc::ptr_eq(s, &snapshots[0])));
    assert_eq!(snapshots[0].skills.len(), 10);
}
