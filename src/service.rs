// ABOUTME: Orchestrator wiring stores, cache, scoring, and recommendations together
// ABOUTME: Cached score reads, synchronous invalidation on writes, fire-and-forget recompute
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

//! Scoring service
//!
//! The entry point request handlers talk to. Reads are cache-first with lazy
//! recompute on miss; consumption writes invalidate synchronously and then
//! refresh scores and recommendations in a detached background task whose
//! failures are logged, never propagated.

use crate::cache::factory::ScoreCache;
use crate::config::EngineConfig;
use crate::errors::AppResult;
use crate::models::{DailyScore, Recommendation, RecommendationStatus};
use crate::recommendations::{GenerationContext, RecommendationEngine};
use crate::storage::{CatalogStore, ConsumptionStore, DateRange, RecommendationStore};
use crate::tracking::{
    self, compute_streak, summarize_week, DatedScore, ScoreComparison, WeeklySummary,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Scoring and recommendation orchestrator
///
/// Cheap to clone; all state is behind `Arc`s so clones share the same
/// cache and stores.
#[derive(Clone)]
pub struct ScoringService {
    catalog: Arc<dyn CatalogStore>,
    consumption: Arc<dyn ConsumptionStore>,
    recommendations: Arc<dyn RecommendationStore>,
    cache: ScoreCache,
    engine: Arc<RecommendationEngine>,
    config: EngineConfig,
}

impl ScoringService {
    /// Create a service over the given stores
    ///
    /// Cache construction degrades to an always-miss cache rather than
    /// failing, so this only errs on genuinely unrecoverable setup problems.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` keeps the constructor stable while
    /// backends that can fail to initialize are added.
    pub async fn new(
        catalog: Arc<dyn CatalogStore>,
        consumption: Arc<dyn ConsumptionStore>,
        recommendations: Arc<dyn RecommendationStore>,
        config: EngineConfig,
    ) -> AppResult<Self> {
        let cache = ScoreCache::new(config.cache.clone()).await;
        let engine = Arc::new(RecommendationEngine::new(config.recommendation_expiry_hours));
        Ok(Self {
            catalog,
            consumption,
            recommendations,
            cache,
            engine,
            config,
        })
    }

    /// The day's score, from cache or recomputed from the consumption log
    ///
    /// A cache miss recomputes against the current state of the log; the
    /// cache never holds authoritative data. Zero consumption is a valid
    /// all-zero score, while a log read failure propagates as retryable
    /// [`DataUnavailable`](crate::errors::ErrorCode::DataUnavailable) so
    /// callers can tell the two apart.
    pub async fn score_for_day(&self, user_id: Uuid, date: NaiveDate) -> AppResult<DailyScore> {
        if let Some(cached) = self.cache.get(user_id, date).await {
            tracing::debug!(%user_id, %date, "Score cache hit");
            return Ok(cached);
        }

        let score = self.compute_for_day(user_id, date).await?;
        self.cache.put(user_id, date, &score).await;
        Ok(score)
    }

    /// Recompute a day's score directly from the consumption log
    async fn compute_for_day(&self, user_id: Uuid, date: NaiveDate) -> AppResult<DailyScore> {
        let events = self
            .consumption
            .query_consumption_events(user_id, DateRange::single(date))
            .await?;
        let aggregate = tracking::aggregate(&events);
        Ok(tracking::compute(&aggregate))
    }

    /// Destroy the cached score for a user-day
    ///
    /// Every code path that creates, edits, or deletes a consumption event
    /// for the day must call this synchronously before returning success.
    pub async fn invalidate(&self, user_id: Uuid, date: NaiveDate) {
        self.cache.invalidate(user_id, date).await;
    }

    /// Handle a durable consumption write for a user-day
    ///
    /// Invalidates the cached score synchronously, then dispatches score
    /// recomputation and recommendation refresh as a detached background
    /// task. The fire-and-forget is intentional: a transient recompute
    /// failure must never fail the food-logging request that triggered it.
    /// The cache is simply left invalidated and the next read recomputes
    /// synchronously.
    pub async fn on_consumption_write(&self, user_id: Uuid, date: NaiveDate) {
        self.invalidate(user_id, date).await;

        let service = self.clone();
        tokio::spawn(async move {
            if let Err(e) = service.refresh_after_write(user_id, date).await {
                tracing::warn!(
                    error = %e,
                    %user_id,
                    %date,
                    "Background score refresh failed; cache left invalidated"
                );
            }
        });
    }

    /// Recompute the score and refresh recommendations after a durable write
    ///
    /// Runs strictly after the triggering write so generation never sees a
    /// state older than the write and never recommends an already-closed gap.
    async fn refresh_after_write(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        let score = self.score_for_day(user_id, date).await?;
        self.refresh_recommendations(user_id, date, &score).await?;
        Ok(())
    }

    /// Auto-complete satisfied recommendations and generate new ones
    ///
    /// Returns the freshly saved batch (possibly empty when the day's gaps
    /// are already covered by live recommendations).
    pub async fn refresh_recommendations(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        score: &DailyScore,
    ) -> AppResult<Vec<Recommendation>> {
        let pending = self
            .recommendations
            .load_pending_recommendations(user_id)
            .await?;

        // Cleanup side effect of logging: pending cards whose system just
        // reached target complete without a user-invoked transition
        for id in RecommendationEngine::auto_completions(score, &pending) {
            self.recommendations
                .update_status(id, RecommendationStatus::Completed)
                .await?;
            tracing::debug!(recommendation_id = %id, "Auto-completed recommendation, system target reached");
        }

        let pending = self
            .recommendations
            .load_pending_recommendations(user_id)
            .await?;
        let catalog = self.catalog.list_catalog_foods().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Catalog unavailable; generating without food suggestions");
            Vec::new()
        });

        let batch = self.engine.generate(&GenerationContext {
            user_id,
            date,
            current_score: score,
            existing: &pending,
            catalog: &catalog,
            now: Utc::now(),
        });

        if !batch.is_empty() {
            self.recommendations.save_recommendations(&batch).await?;
            tracing::info!(%user_id, %date, count = batch.len(), "Generated recommendations");
        }
        Ok(batch)
    }

    /// The single best next action for a user, if any
    pub async fn next_action(&self, user_id: Uuid) -> AppResult<Option<Recommendation>> {
        let pending = self
            .recommendations
            .load_pending_recommendations(user_id)
            .await?;
        Ok(RecommendationEngine::next_action(&pending, Utc::now()).cloned())
    }

    /// Accept a pending recommendation
    ///
    /// # Errors
    ///
    /// [`InvalidTransition`](crate::errors::ErrorCode::InvalidTransition)
    /// unless the recommendation is currently pending.
    pub async fn accept(&self, id: Uuid) -> AppResult<()> {
        self.transition(id, RecommendationStatus::ActedOn).await
    }

    /// Mark an acted-on recommendation's ingredients as purchased
    ///
    /// # Errors
    ///
    /// [`InvalidTransition`](crate::errors::ErrorCode::InvalidTransition)
    /// unless the recommendation is currently acted on.
    pub async fn mark_shopped(&self, id: Uuid) -> AppResult<()> {
        self.transition(id, RecommendationStatus::Shopped).await
    }

    /// Complete a recommendation (from shopped, or directly from acted-on
    /// for recipe-only flows that skip shopping)
    ///
    /// # Errors
    ///
    /// [`InvalidTransition`](crate::errors::ErrorCode::InvalidTransition)
    /// from any other status.
    pub async fn complete(&self, id: Uuid) -> AppResult<()> {
        self.transition(id, RecommendationStatus::Completed).await
    }

    /// Dismiss a recommendation from any non-terminal status
    ///
    /// # Errors
    ///
    /// [`InvalidTransition`](crate::errors::ErrorCode::InvalidTransition)
    /// when the recommendation is already completed or dismissed.
    pub async fn dismiss(&self, id: Uuid) -> AppResult<()> {
        self.transition(id, RecommendationStatus::Dismissed).await
    }

    async fn transition(&self, id: Uuid, next: RecommendationStatus) -> AppResult<()> {
        let rec = self
            .recommendations
            .get_recommendation(id)
            .await?
            .ok_or_else(|| crate::errors::AppError::not_found(format!("recommendation {id}")))?;
        RecommendationEngine::validate_transition(rec.status, next)?;
        self.recommendations.update_status(id, next).await
    }

    /// Dated overall scores for a trailing window ending at `end` (inclusive)
    pub async fn daily_scores(
        &self,
        user_id: Uuid,
        end: NaiveDate,
        days: u32,
    ) -> AppResult<Vec<DatedScore>> {
        let range_days = DateRange::trailing(end, days).days();
        let mut scores = Vec::with_capacity(range_days.len());
        for date in range_days {
            let score = self.score_for_day(user_id, date).await?;
            scores.push(DatedScore {
                date,
                overall_score: score.overall_score,
            });
        }
        Ok(scores)
    }

    /// Weekly summary for the seven days ending at `end`
    pub async fn weekly_summary(
        &self,
        user_id: Uuid,
        end: NaiveDate,
    ) -> AppResult<Option<WeeklySummary>> {
        let scores = self.daily_scores(user_id, end, 7).await?;
        Ok(summarize_week(&scores, self.config.trend_threshold))
    }

    /// Consecutive qualifying-day streak ending at `end`, looking back over
    /// `days` days
    pub async fn streak(&self, user_id: Uuid, end: NaiveDate, days: u32) -> AppResult<u32> {
        let scores = self.daily_scores(user_id, end, days).await?;
        Ok(compute_streak(
            &scores,
            self.config.streak_qualifying_score,
        ))
    }

    /// Compare two days' scores
    pub async fn compare_days(
        &self,
        user_id: Uuid,
        first: NaiveDate,
        second: NaiveDate,
    ) -> AppResult<ScoreComparison> {
        let first_score = self.score_for_day(user_id, first).await?;
        let second_score = self.score_for_day(user_id, second).await?;
        Ok(tracking::compare_scores(&first_score, &second_score))
    }
}
