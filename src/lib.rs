// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          repo / ssh / config / watch
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |  session    plugin        |
//!              |  serialized actions,      |
//!              |  events, auto fetch       |
//!              '------+--------------+-----'
//!                     |              |
//!                     v              v
//!                    git            ssh
//!              Repository ops   keys, probe,
//!              status, remote   host block
//!                     |              |
//!                     +------+-------+
//!                            v
//!   +-----------------------------------------+
//!   |  core     process (ProcessBuilder)      |
//!   +-----------------------------------------+
//!   |  foundation  config, error, logging,    |
//!   |              outcome (taxonomy)         |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod outcome;
pub mod plugin;
pub mod session;
pub mod ssh;
