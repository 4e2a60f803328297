use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;
use tether_hooks::{
    HOOK_NAMES, HookAction, InstallContext, OWN_MARKER, Preconditions, Reconciler, SkipReason,
    resolve,
};

struct Repo {
    _tmp: TempDir,
    root: PathBuf,
}

impl Repo {
    /// A fake working tree with `.git/hooks` already present.
    fn new() -> Self {
        let tmp = TempDir::new().expect("create tempdir");
        let root = tmp.path().to_path_buf();
        fs::create_dir_all(root.join(".git").join("hooks")).unwrap();
        Self { _tmp: tmp, root }
    }

    fn git_dir(&self) -> PathBuf {
        self.root.join(".git")
    }

    fn hook(&self, name: &str) -> PathBuf {
        self.git_dir().join("hooks").join(name)
    }
}

fn skip_segments() -> Vec<String> {
    vec!["node_modules".to_string()]
}

fn install(ctx: &InstallContext, manifest_dir: &Path) -> tether_hooks::HookReport {
    let skip = skip_segments();
    let pre = Preconditions {
        has_manifest: true,
        manifest_dir,
        skip_segments: &skip,
    };
    Reconciler::new("npm").install(ctx, &pre)
}

fn uninstall(common_dir: &Path, manifest_dir: &Path) -> tether_hooks::HookReport {
    let skip = skip_segments();
    let pre = Preconditions {
        has_manifest: true,
        manifest_dir,
        skip_segments: &skip,
    };
    Reconciler::new("npm").uninstall(common_dir, &pre)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

#[test]
fn manifest_at_root_installs_with_dot_work_dir() {
    let repo = Repo::new();
    let ctx = resolve(&repo.git_dir(), None, &repo.root, false);

    install(&ctx, &repo.root);

    let hook = read(&repo.hook("pre-commit"));
    assert!(hook.contains("cd \".\""));
    assert_eq!(hook.lines().next(), Some(OWN_MARKER));
}

#[test]
fn every_hook_name_is_created() {
    let repo = Repo::new();
    let ctx = resolve(&repo.git_dir(), None, &repo.root, false);

    let report = install(&ctx, &repo.root);

    assert_eq!(report.hooks.len(), HOOK_NAMES.len());
    for name in HOOK_NAMES {
        assert_eq!(report.outcome(name), Some(&HookAction::Created), "{name}");
        assert!(read(&repo.hook(name)).contains(&format!("hookName=\"{name}\"")));
    }
}

#[test]
fn nested_manifest_uses_verbatim_relative_dir() {
    let repo = Repo::new();
    let pkg = repo.root.join("A").join("B");
    fs::create_dir_all(&pkg).unwrap();
    let ctx = resolve(&repo.git_dir(), Some("A/B/"), &pkg, false);

    install(&ctx, &pkg);
    assert!(read(&repo.hook("pre-commit")).contains("cd \"A/B/\""));

    uninstall(&repo.git_dir(), &pkg);
    assert!(!repo.hook("pre-commit").exists());
}

#[test]
fn submodule_hooks_live_under_modules_dir() {
    let repo = Repo::new();
    let common_dir = repo.git_dir().join("modules").join("A").join("B");
    let pkg = repo.root.join("A").join("B");
    fs::create_dir_all(&common_dir).unwrap();
    fs::create_dir_all(&pkg).unwrap();
    let ctx = resolve(&common_dir, None, &pkg, false);

    install(&ctx, &pkg);

    let hook = common_dir.join("hooks").join("pre-commit");
    assert!(read(&hook).contains("cd \".\""));
    assert!(!repo.hook("pre-commit").exists());

    uninstall(&common_dir, &pkg);
    assert!(!hook.exists());
}

#[test]
fn ci_without_opt_in_installs_nothing() {
    let repo = Repo::new();
    let ctx = resolve(&repo.git_dir(), None, &repo.root, true);

    let report = install(&ctx, &repo.root);

    assert_eq!(report.skipped, Some(SkipReason::Ci));
    assert!(!repo.hook("pre-commit").exists());
}

#[test]
fn ci_with_opt_in_installs() {
    let repo = Repo::new();
    let ctx = resolve(&repo.git_dir(), None, &repo.root, true).with_skip_ci(false);

    install(&ctx, &repo.root);

    assert!(repo.hook("pre-commit").exists());
}

#[test]
fn package_inside_node_modules_installs_nothing() {
    let repo = Repo::new();
    let pkg = repo.root.join("node_modules").join("A");
    fs::create_dir_all(&pkg).unwrap();
    let ctx = resolve(&repo.git_dir(), None, &pkg, false);

    let report = install(&ctx, &pkg);

    assert!(matches!(
        report.skipped,
        Some(SkipReason::DependencyDirectory { .. })
    ));
    assert!(!repo.hook("pre-commit").exists());
}

#[test]
fn missing_manifest_installs_nothing() {
    let repo = Repo::new();
    let ctx = resolve(&repo.git_dir(), None, &repo.root, false);
    let skip = skip_segments();
    let pre = Preconditions {
        has_manifest: false,
        manifest_dir: &repo.root,
        skip_segments: &skip,
    };

    let report = Reconciler::new("npm").install(&ctx, &pre);

    assert_eq!(report.skipped, Some(SkipReason::MissingManifest));
    assert!(!repo.hook("pre-commit").exists());
}

#[test]
fn missing_hook_dir_is_created() {
    let tmp = TempDir::new().unwrap();
    let git_dir = tmp.path().join(".git");
    fs::create_dir_all(&git_dir).unwrap();
    let ctx = resolve(&git_dir, None, tmp.path(), false);

    let report = install(&ctx, tmp.path());

    assert_eq!(report.failed(), 0);
    assert!(git_dir.join("hooks").join("pre-commit").is_file());
}

#[test]
fn second_install_is_byte_identical() {
    let repo = Repo::new();
    let ctx = resolve(&repo.git_dir(), Some("packages/app/"), &repo.root, false);

    install(&ctx, &repo.root);
    let first: Vec<String> = HOOK_NAMES.iter().map(|n| read(&repo.hook(n))).collect();
    let report = install(&ctx, &repo.root);
    let second: Vec<String> = HOOK_NAMES.iter().map(|n| read(&repo.hook(n))).collect();

    assert_eq!(first, second);
    assert_eq!(report.changed(), 0);
}

#[rstest]
#[case("#!/bin/sh\n# husky\n\n. \"$(dirname \"$0\")/husky.sh\"\n", "husky.sh")]
#[case("#!/bin/sh\n#yorkie 2.0.0\nnode ./node_modules/yorkie/src/runner.js pre-commit\n", "yorkie/src/runner.js")]
#[case("#!/usr/bin/env node\n// Generated by ghooks. Do not edit this file.\nrequire('ghooks')\n", "require('ghooks')")]
#[case("#!/bin/bash\n./node_modules/pre-commit/hook\nRESULT=$?\n", "RESULT=$?")]
fn legacy_hooks_are_taken_over(#[case] legacy: &str, #[case] distinguishing: &str) {
    let repo = Repo::new();
    fs::write(repo.hook("pre-commit"), legacy).unwrap();
    let ctx = resolve(&repo.git_dir(), None, &repo.root, false);

    let report = install(&ctx, &repo.root);

    assert!(matches!(
        report.outcome("pre-commit"),
        Some(HookAction::Migrated { .. })
    ));
    let hook = read(&repo.hook("pre-commit"));
    assert_eq!(hook.lines().next(), Some(OWN_MARKER));
    assert!(!hook.contains(distinguishing));
}

#[test]
fn migrated_legacy_hook_is_removed_by_uninstall() {
    let repo = Repo::new();
    fs::write(repo.hook("commit-msg"), "#!/bin/sh\n#yorkie 2.0.0\n").unwrap();
    let ctx = resolve(&repo.git_dir(), None, &repo.root, false);

    let report = install(&ctx, &repo.root);
    assert_eq!(
        report.outcome("commit-msg"),
        Some(&HookAction::Migrated { from: "yorkie" })
    );

    let report = uninstall(&repo.git_dir(), &repo.root);
    assert_eq!(report.outcome("commit-msg"), Some(&HookAction::Removed));
    assert!(!repo.hook("commit-msg").exists());
}

#[test]
fn linked_worktree_package_shares_hooks_and_runs_from_dot() {
    let repo = Repo::new();
    // `git worktree add wt`: metadata under .git/worktrees, hooks stay shared.
    let wt = repo.root.join("wt");
    fs::create_dir_all(repo.git_dir().join("worktrees").join("wt")).unwrap();
    fs::create_dir_all(&wt).unwrap();
    let ctx = resolve(&repo.git_dir(), Some("."), &wt, false);

    install(&ctx, &wt);

    let hook = read(&repo.hook("pre-commit"));
    assert!(hook.contains("cd \".\" || exit 1"), "{hook}");
    assert!(!repo.git_dir().join("worktrees").join("wt").join("hooks").exists());

    uninstall(&repo.git_dir(), &wt);
    assert!(!repo.hook("pre-commit").exists());
}

#[test]
fn user_hook_is_never_touched() {
    let repo = Repo::new();
    let user_hook = "#!/bin/sh\nnpm run lint\n";
    fs::write(repo.hook("pre-commit"), user_hook).unwrap();
    let ctx = resolve(&repo.git_dir(), None, &repo.root, false);

    let report = install(&ctx, &repo.root);
    assert_eq!(report.outcome("pre-commit"), Some(&HookAction::SkippedForeign));
    assert_eq!(read(&repo.hook("pre-commit")), user_hook);

    let report = uninstall(&repo.git_dir(), &repo.root);
    assert_eq!(report.outcome("pre-commit"), Some(&HookAction::SkippedForeign));
    assert_eq!(read(&repo.hook("pre-commit")), user_hook);
}

#[test]
fn hand_edited_hook_without_marker_is_kept_on_uninstall() {
    let repo = Repo::new();
    let ctx = resolve(&repo.git_dir(), None, &repo.root, false);
    install(&ctx, &repo.root);

    let edited = read(&repo.hook("commit-msg")).replacen("# tether\n", "", 1);
    fs::write(repo.hook("commit-msg"), &edited).unwrap();

    uninstall(&repo.git_dir(), &repo.root);
    assert_eq!(read(&repo.hook("commit-msg")), edited);
    assert!(!repo.hook("pre-commit").exists());

    // Once relinquished, install leaves it alone too.
    install(&ctx, &repo.root);
    assert_eq!(read(&repo.hook("commit-msg")), edited);
}

#[test]
fn install_then_uninstall_restores_absence() {
    let repo = Repo::new();
    let ctx = resolve(&repo.git_dir(), None, &repo.root, false);

    install(&ctx, &repo.root);
    let report = uninstall(&repo.git_dir(), &repo.root);

    assert_eq!(report.changed(), HOOK_NAMES.len());
    for name in HOOK_NAMES {
        assert!(!repo.hook(name).exists(), "{name} should be removed");
    }
    assert!(repo.git_dir().join("hooks").is_dir(), "hook dir is kept");
}

#[test]
fn uninstall_from_node_modules_removes_nothing() {
    let repo = Repo::new();
    let ctx = resolve(&repo.git_dir(), None, &repo.root, false);
    install(&ctx, &repo.root);

    let pkg = repo.root.join("node_modules").join("dep");
    let report = uninstall(&repo.git_dir(), &pkg);

    assert!(report.skipped.is_some());
    assert!(repo.hook("pre-commit").exists());
}
