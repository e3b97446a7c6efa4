// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, KgError, KgResult, ProcessError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidValue {
        section: "server".to_string(),
        key: "port".to_string(),
        message: "must be 1-65535, got 0".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'port' in section '[server]': must be 1-65535, got 0"
    );
}

#[test]
fn test_process_error_wraps_into_kg_error() {
    let err: KgError = ProcessError::ExecutableNotFound {
        name: "git".to_string(),
    }
    .into();
    assert_eq!(
        err.to_string(),
        "process error: executable not found: 'git' (not in PATH)"
    );
}

#[test]
fn test_kg_error_size() {
    let size = std::mem::size_of::<KgError>();
    assert!(size <= 24, "KgError is {size} bytes, expected <= 24");
}

#[test]
fn test_kg_result_size() {
    let size = std::mem::size_of::<KgResult<()>>();
    assert!(size <= 24, "KgResult<()> is {size} bytes, expected <= 24");
}
