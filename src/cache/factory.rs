// ABOUTME: Score cache facade with graceful degradation
// ABOUTME: Falls back to an always-miss no-op cache when construction fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

use super::{memory::InMemoryScoreCache, CacheConfig, ScoreCacheKey, ScoreCacheProvider};
use crate::models::DailyScore;
use chrono::NaiveDate;
use std::time::Duration;
use uuid::Uuid;

/// Unified score cache interface
///
/// An unavailable backend degrades to an always-miss cache: every read is a
/// miss and every write is dropped, so callers recompute from the consumption
/// log instead of failing. The cache never blocks or fails its caller.
#[derive(Clone)]
pub struct ScoreCache {
    backend: Backend,
    score_ttl: Duration,
}

#[derive(Clone)]
enum Backend {
    Memory(InMemoryScoreCache),
    /// Always-miss no-op backend
    Disabled,
}

impl ScoreCache {
    /// Create a new score cache, degrading to a no-op cache on failure
    pub async fn new(config: CacheConfig) -> Self {
        let score_ttl = config.score_ttl;
        tracing::info!(
            "Initializing in-memory score cache (max entries: {})",
            config.max_entries
        );
        match InMemoryScoreCache::new(config).await {
            Ok(inner) => Self {
                backend: Backend::Memory(inner),
                score_ttl,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Score cache unavailable; degrading to always-miss cache");
                Self {
                    backend: Backend::Disabled,
                    score_ttl,
                }
            }
        }
    }

    /// Create a score cache from environment variables
    pub async fn from_env() -> Self {
        Self::new(CacheConfig::from_env()).await
    }

    /// Create a no-op cache that misses on every read and drops every write
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            backend: Backend::Disabled,
            score_ttl: Duration::from_secs(0),
        }
    }

    /// Retrieve the cached score for a user-day, `None` on miss
    ///
    /// Backend errors degrade to a miss so the caller recomputes.
    pub async fn get(&self, user_id: Uuid, date: NaiveDate) -> Option<DailyScore> {
        match &self.backend {
            Backend::Memory(inner) => {
                let key = ScoreCacheKey::new(user_id, date);
                match inner.get(&key).await {
                    Ok(cached) => cached,
                    Err(e) => {
                        tracing::warn!(error = %e, %key, "Score cache read failed; treating as miss");
                        None
                    }
                }
            }
            Backend::Disabled => None,
        }
    }

    /// Store a freshly computed score with the configured TTL
    ///
    /// Backend errors are logged and swallowed; the score stays re-derivable.
    pub async fn put(&self, user_id: Uuid, date: NaiveDate, score: &DailyScore) {
        if let Backend::Memory(inner) = &self.backend {
            let key = ScoreCacheKey::new(user_id, date);
            if let Err(e) = inner.put(&key, score, self.score_ttl).await {
                tracing::warn!(error = %e, %key, "Score cache write failed; entry dropped");
            }
        }
    }

    /// Destroy the cache entry for a user-day
    ///
    /// Called synchronously by every code path that creates, edits, or
    /// deletes a consumption event for that day.
    pub async fn invalidate(&self, user_id: Uuid, date: NaiveDate) {
        if let Backend::Memory(inner) = &self.backend {
            let key = ScoreCacheKey::new(user_id, date);
            if let Err(e) = inner.invalidate(&key).await {
                tracing::warn!(error = %e, %key, "Score cache invalidation failed");
            } else {
                tracing::debug!(%key, "Invalidated cached score");
            }
        }
    }

    /// Destroy the cache entries for several days at once
    pub async fn invalidate_batch(&self, user_id: Uuid, dates: &[NaiveDate]) {
        for &date in dates {
            self.invalidate(user_id, date).await;
        }
    }

    /// Destroy every cached day for a user, returning how many were removed
    pub async fn invalidate_user(&self, user_id: Uuid) -> u64 {
        match &self.backend {
            Backend::Memory(inner) => {
                let pattern = ScoreCacheKey::user_pattern(user_id);
                match inner.invalidate_pattern(&pattern).await {
                    Ok(removed) => {
                        tracing::debug!(%user_id, removed, "Invalidated all cached scores for user");
                        removed
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, %user_id, "User-wide cache invalidation failed");
                        0
                    }
                }
            }
            Backend::Disabled => 0,
        }
    }

    /// Clear every entry (safe at any time; worst case is recomputation)
    pub async fn clear_all(&self) {
        if let Backend::Memory(inner) = &self.backend {
            if let Err(e) = inner.clear_all().await {
                tracing::warn!(error = %e, "Score cache clear failed");
            }
        }
    }
}
