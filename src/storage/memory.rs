// ABOUTME: In-memory implementations of the storage boundary traits
// ABOUTME: Used by tests and single-process deployments; ordering matches the trait contracts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

use super::{CatalogStore, ConsumptionStore, DateRange, RecommendationStore};
use crate::errors::{AppError, AppResult};
use crate::models::{CatalogFood, ConsumptionEvent, Recommendation, RecommendationStatus};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory reference catalog
#[derive(Default)]
pub struct InMemoryCatalog {
    foods: RwLock<Vec<CatalogFood>>,
}

impl InMemoryCatalog {
    /// Catalog seeded with the given foods
    #[must_use]
    pub fn with_foods(foods: Vec<CatalogFood>) -> Self {
        Self {
            foods: RwLock::new(foods),
        }
    }

    /// Add a food to the catalog
    pub async fn add_food(&self, food: CatalogFood) {
        self.foods.write().await.push(food);
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn list_catalog_foods(&self) -> AppResult<Vec<CatalogFood>> {
        Ok(self.foods.read().await.clone())
    }
}

/// In-memory consumption log
///
/// Events are append-mostly and immutable once created, matching the
/// external log's semantics. `set_unavailable` simulates a store outage so
/// tests can observe `DataUnavailable` propagation.
#[derive(Default)]
pub struct InMemoryConsumptionLog {
    events: RwLock<Vec<ConsumptionEvent>>,
    unavailable: AtomicBool,
}

impl InMemoryConsumptionLog {
    /// Append a consumption event
    ///
    /// The caller is responsible for invalidating the score cache for the
    /// event's user-day afterwards, as every log writer must.
    pub async fn append(&self, event: ConsumptionEvent) {
        self.events.write().await.push(event);
    }

    /// Remove every event for a user-day, returning how many were removed
    pub async fn remove_day(&self, user_id: Uuid, date: chrono::NaiveDate) -> usize {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|event| !(event.user_id == user_id && event.date == date));
        before - events.len()
    }

    /// Simulate the backing store going down (or coming back)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl ConsumptionStore for InMemoryConsumptionLog {
    async fn query_consumption_events(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> AppResult<Vec<ConsumptionEvent>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::data_unavailable(
                "consumption log is temporarily unavailable",
            ));
        }

        let mut matching: Vec<ConsumptionEvent> = self
            .events
            .read()
            .await
            .iter()
            .filter(|event| event.user_id == user_id && range.contains(event.date))
            .cloned()
            .collect();
        matching.sort_by_key(|event| (event.date, event.meal_time));
        Ok(matching)
    }
}

/// In-memory recommendation store
#[derive(Default)]
pub struct InMemoryRecommendationStore {
    recommendations: RwLock<Vec<Recommendation>>,
}

impl InMemoryRecommendationStore {
    /// Every stored recommendation for a user, regardless of status
    pub async fn all_for_user(&self, user_id: Uuid) -> Vec<Recommendation> {
        self.recommendations
            .read()
            .await
            .iter()
            .filter(|rec| rec.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RecommendationStore for InMemoryRecommendationStore {
    async fn save_recommendations(&self, recommendations: &[Recommendation]) -> AppResult<()> {
        self.recommendations
            .write()
            .await
            .extend_from_slice(recommendations);
        Ok(())
    }

    async fn load_pending_recommendations(&self, user_id: Uuid) -> AppResult<Vec<Recommendation>> {
        let mut pending: Vec<Recommendation> = self
            .recommendations
            .read()
            .await
            .iter()
            .filter(|rec| rec.user_id == user_id && rec.status == RecommendationStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by_key(|rec| rec.created_at);
        Ok(pending)
    }

    async fn get_recommendation(&self, id: Uuid) -> AppResult<Option<Recommendation>> {
        Ok(self
            .recommendations
            .read()
            .await
            .iter()
            .find(|rec| rec.id == id)
            .cloned())
    }

    async fn update_status(&self, id: Uuid, new_status: RecommendationStatus) -> AppResult<()> {
        let mut recommendations = self.recommendations.write().await;
        let rec = recommendations
            .iter_mut()
            .find(|rec| rec.id == id)
            .ok_or_else(|| AppError::not_found(format!("recommendation {id}")))?;
        rec.status = new_status;
        Ok(())
    }
}
