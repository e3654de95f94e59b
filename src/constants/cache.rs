// ABOUTME: Score cache sizing and TTL defaults
// ABOUTME: The TTL is a safety net only; explicit invalidation is the primary consistency mechanism
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

/// Default maximum number of cached (user, day) score entries
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;

/// Default score entry TTL in seconds (order of minutes; cached scores are
/// always re-derivable from the consumption log)
pub const DEFAULT_SCORE_TTL_SECS: u64 = 300;

/// Default interval between background sweeps for expired entries
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;
