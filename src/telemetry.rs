// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tracing subscriber setup for binaries and tests embedding this crate

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber on stdout filtered by `RUST_LOG`
///
/// `default_level` applies when `RUST_LOG` is unset. Returns `false` if a
/// global subscriber was already installed.
pub fn init_tracing(default_level: tracing::Level) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Like [`init_tracing`], but writes through the test harness capture
pub fn init_test_tracing(default_level: tracing::Level) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_target(false)
        .with_test_writer()
        .try_init()
        .is_ok()
}

fn env_filter(default_level: tracing::Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(default_level).into())
        .from_env_lossy()
}
