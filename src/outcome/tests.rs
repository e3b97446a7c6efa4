// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::patterns::{classify, combined, contains_any, NOTHING_TO_COMMIT, SSH_BANNER};
use super::{FailureKind, Outcome, failure_kind};
use crate::core::process::builder::CommandResult;

#[test]
fn test_summary_prefixes_failure_kind() {
    let outcome = Outcome::fail(FailureKind::NotConfigured, "repository path is not set");
    insta::assert_snapshot!(outcome.summary(), @"NotConfigured: repository path is not set");
    assert!(!outcome.success());
}

#[test]
fn test_success_summary_is_bare_message() {
    let outcome = Outcome::ok("Fetch completed.");
    assert_eq!(outcome.into_pair(), (true, "Fetch completed.".to_string()));
}

#[test]
fn test_display_marks_result() {
    insta::assert_snapshot!(Outcome::ok("done").to_string(), @"✓ done");
    insta::assert_snapshot!(
        Outcome::fail(FailureKind::Timeout, "slow").to_string(),
        @"✗ Timeout: slow"
    );
}

#[test]
fn test_classify_respects_precedence() {
    let text = combined("", "CONFLICT (content): Merge conflict in lib.kicad_sym\nCould not resolve host");
    assert_eq!(
        classify(&text, &[FailureKind::Conflict, FailureKind::Connectivity]),
        Some(FailureKind::Conflict)
    );
    assert_eq!(
        classify(&text, &[FailureKind::Connectivity, FailureKind::Conflict]),
        Some(FailureKind::Connectivity)
    );
}

#[test]
fn test_classify_dns_failure() {
    let text = combined(
        "",
        "ssh: Could not resolve hostname git.example.invalid: Name or service not known",
    );
    assert_eq!(
        classify(&text, &[FailureKind::Connectivity]),
        Some(FailureKind::Connectivity)
    );
}

#[test]
fn test_classify_rejected_push() {
    let text = combined(
        "",
        " ! [rejected]        main -> main (fetch first)\nerror: failed to push some refs",
    );
    assert_eq!(
        classify(&text, &[FailureKind::Rejected, FailureKind::Connectivity]),
        Some(FailureKind::Rejected)
    );
}

#[test]
fn test_classify_unmatched_is_none() {
    let text = combined("", "fatal: bad object HEAD");
    assert_eq!(
        classify(
            &text,
            &[FailureKind::Conflict, FailureKind::Rejected, FailureKind::Connectivity]
        ),
        None
    );
}

#[test]
fn test_nothing_to_commit_phrases() {
    let text = combined("On branch main\nnothing to commit, working tree clean", "");
    assert!(contains_any(&text, NOTHING_TO_COMMIT));
}

#[test]
fn test_ssh_banner_phrases() {
    let text = combined(
        "",
        "Hi there, alice! You've successfully authenticated, but Forgejo does not provide shell access.",
    );
    assert!(contains_any(&text, SSH_BANNER));
}

#[test]
fn test_failure_kind_sentinels_win() {
    let missing = CommandResult::not_found("git not found");
    let timed_out = CommandResult::timed_out("Server unreachable (connection timed out)");
    let precedence = [FailureKind::Connectivity];

    assert_eq!(failure_kind(&missing, &precedence), FailureKind::ToolMissing);
    assert_eq!(failure_kind(&timed_out, &precedence), FailureKind::Timeout);
}

#[test]
fn test_failure_kind_falls_back_to_generic() {
    let result = CommandResult::new(
        128,
        String::new(),
        "fatal: not a git repository".to_string(),
    );
    assert_eq!(
        failure_kind(&result, &[FailureKind::Conflict, FailureKind::Connectivity]),
        FailureKind::Generic
    );
}
