// ABOUTME: Score cache abstraction keyed by (user, day) with explicit invalidation
// ABOUTME: Pluggable backend trait; the TTL is only a safety net, never the consistency mechanism
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

//! Score cache
//!
//! Stores the most recently computed [`DailyScore`] per `(user, date)`. The
//! cache never holds authoritative data: every entry is re-derivable from the
//! consumption log, so it can be dropped or cleared entirely at any time.
//! Explicit invalidation on consumption writes is the primary consistency
//! mechanism; the TTL exists only as a safety net.

/// Cache facade with graceful degradation to an always-miss cache
pub mod factory;
/// In-memory cache implementation
pub mod memory;

use crate::constants::cache::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CLEANUP_INTERVAL_SECS, DEFAULT_SCORE_TTL_SECS,
};
use crate::errors::AppResult;
use crate::models::DailyScore;
use chrono::NaiveDate;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Cache provider trait for pluggable backend implementations
///
/// Reads and writes for different keys never conflict. Concurrent writers to
/// the same key are tolerable: both recompute and store the same correct
/// score, which is wasted work rather than a correctness bug.
#[async_trait::async_trait]
pub trait ScoreCacheProvider: Send + Sync + Clone {
    /// Create new cache instance with configuration
    ///
    /// # Errors
    ///
    /// Returns an error if cache initialization fails
    async fn new(config: CacheConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Store a computed score with TTL
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or storage fails
    async fn put(&self, key: &ScoreCacheKey, score: &DailyScore, ttl: Duration) -> AppResult<()>;

    /// Retrieve a cached score, `None` on miss or expiry
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails
    async fn get(&self, key: &ScoreCacheKey) -> AppResult<Option<DailyScore>>;

    /// Destroy a single cache entry (not just mark it stale)
    ///
    /// # Errors
    ///
    /// Returns an error if invalidation fails
    async fn invalidate(&self, key: &ScoreCacheKey) -> AppResult<()>;

    /// Destroy all entries matching a glob pattern (e.g. `score:user:{id}:*`),
    /// returning how many were removed
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid or removal fails
    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64>;

    /// Whether a live (non-expired) entry exists for the key
    ///
    /// # Errors
    ///
    /// Returns an error if the existence check fails
    async fn exists(&self, key: &ScoreCacheKey) -> AppResult<bool>;

    /// Remaining TTL for a live entry, `None` when absent or expired
    ///
    /// # Errors
    ///
    /// Returns an error if the TTL check fails
    async fn ttl(&self, key: &ScoreCacheKey) -> AppResult<Option<Duration>>;

    /// Clear every entry (safe at any time; worst case is recomputation)
    ///
    /// # Errors
    ///
    /// Returns an error if the clear operation fails
    async fn clear_all(&self) -> AppResult<()>;
}

/// Score cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached (user, day) entries before LRU eviction
    pub max_entries: usize,
    /// TTL applied to stored scores (safety net, order of minutes)
    pub score_ttl: Duration,
    /// Interval between background sweeps for expired entries
    pub cleanup_interval: Duration,
    /// Enable the background cleanup task (disable in tests to avoid runtime conflicts)
    pub enable_background_cleanup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            score_ttl: Duration::from_secs(DEFAULT_SCORE_TTL_SECS),
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            enable_background_cleanup: true,
        }
    }
}

impl CacheConfig {
    /// Load cache configuration from environment variables
    ///
    /// Recognized: `SCORE_CACHE_MAX_ENTRIES`, `SCORE_CACHE_TTL_SECS`,
    /// `SCORE_CACHE_CLEANUP_INTERVAL_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: std::env::var("SCORE_CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_entries),
            score_ttl: std::env::var("SCORE_CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map_or(defaults.score_ttl, Duration::from_secs),
            cleanup_interval: std::env::var("SCORE_CACHE_CLEANUP_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map_or(defaults.cleanup_interval, Duration::from_secs),
            enable_background_cleanup: true,
        }
    }
}

/// Structured cache key: one score per user per calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreCacheKey {
    /// Owning user
    pub user_id: Uuid,
    /// Calendar day the score covers
    pub date: NaiveDate,
}

impl ScoreCacheKey {
    /// Create new cache key
    #[must_use]
    pub const fn new(user_id: Uuid, date: NaiveDate) -> Self {
        Self { user_id, date }
    }

    /// Pattern matching every cached day for a user
    #[must_use]
    pub fn user_pattern(user_id: Uuid) -> String {
        format!("score:user:{user_id}:date:*")
    }
}

impl fmt::Display for ScoreCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "score:user:{}:date:{}", self.user_id, self.date)
    }
}
