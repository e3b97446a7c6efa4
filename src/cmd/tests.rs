// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::config::set_and_save;
use super::repo::show_remote;
use super::ssh::{key_status, print_public_key};
use super::{ActionFailed, check, run_action};
use crate::config::Settings;
use crate::git::Repository;
use crate::outcome::{FailureKind, Outcome};
use crate::session::{Action, ConsolePresenter, Session};
use crate::ssh::SshService;

fn settings_with_key(key: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.ssh.key_path = key.display().to_string();
    settings
}

#[test]
fn test_check_maps_failure() {
    assert!(check(&Outcome::ok("done")).is_ok());
    let err = check(&Outcome::fail(FailureKind::Validation, "Enter a commit message."))
        .unwrap_err();
    let failed = err.downcast_ref::<ActionFailed>().unwrap();
    assert_eq!(failed.0, "Validation: Enter a commit message.");
}

#[tokio::test]
async fn test_run_action_presents_then_fails() {
    let (session, events) = Session::with_shell(Settings::default());
    let mut presenter = ConsolePresenter::new(Vec::new(), false);

    let err = run_action(session, events, Action::Fetch, &mut presenter)
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<ActionFailed>().is_some());
    let text = String::from_utf8(presenter.into_inner()).unwrap();
    insta::assert_snapshot!(text, @r"
    fetch...
    ✗ NotConfigured: Repository path is not set in settings.
    ");
}

#[tokio::test]
async fn test_show_remote_requires_repository() {
    let repo = Repository::with_shell(Settings::default());
    let mut out = Vec::new();
    let err = show_remote(&repo, &mut out, false).await.unwrap_err();
    assert!(err.to_string().starts_with("NotConfigured"));
    assert!(out.is_empty());
}

#[test]
fn test_set_and_save_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");

    set_and_save(&path, "server.host", "git.example.org").unwrap();
    let settings = set_and_save(&path, "server.port", "2222").unwrap();
    assert_eq!(settings.server.host, "git.example.org");

    let reloaded = Settings::builder().add_toml_file(&path).build().unwrap();
    assert_eq!(reloaded, settings);
}

#[test]
fn test_set_and_save_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");

    assert!(set_and_save(&path, "server.proxy", "x").is_err());
    assert!(set_and_save(&path, "fetch.interval_sec", "3").is_err());
    assert!(!path.exists());
}

#[test]
fn test_key_status_text() {
    let dir = tempfile::tempdir().unwrap();
    let key = dir.path().join("id");
    std::fs::write(&key, "private").unwrap();
    let ssh = SshService::new(settings_with_key(&key));

    let mut out = Vec::new();
    key_status(&ssh, &mut out, false).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        format!(
            "private  {} (present)\npublic   {}.pub (missing)\n",
            key.display(),
            key.display()
        )
    );
}

#[test]
fn test_key_status_json() {
    let dir = tempfile::tempdir().unwrap();
    let key = dir.path().join("id");
    std::fs::write(dir.path().join("id.pub"), "ssh-ed25519 AAAA c\n").unwrap();
    let ssh = SshService::new(settings_with_key(&key));

    let mut out = Vec::new();
    key_status(&ssh, &mut out, true).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    insta::assert_json_snapshot!(value, {
        ".key_path" => "[path]",
        ".public_key_path" => "[path]",
    }, @r#"
    {
      "key_exists": false,
      "key_path": "[path]",
      "public_key": "ssh-ed25519 AAAA c",
      "public_key_path": "[path]"
    }
    "#);
}

#[test]
fn test_print_public_key_missing() {
    let dir = tempfile::tempdir().unwrap();
    let ssh = SshService::new(settings_with_key(&dir.path().join("id")));
    let mut out = Vec::new();
    let err = print_public_key(&ssh, &mut out).unwrap_err();
    assert!(err.to_string().contains("ssh generate"));
}
