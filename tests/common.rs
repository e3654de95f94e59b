// ABOUTME: Shared test utilities for the wellness intelligence integration tests
// ABOUTME: Catalog seeds, event builders, and service wiring over in-memory stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]
#![allow(missing_docs)]

//! Shared test utilities for `wellness_intelligence`
//!
//! Common catalog seeds, consumption builders, and service setup to reduce
//! duplication across integration tests.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;
use wellness_intelligence::cache::CacheConfig;
use wellness_intelligence::config::EngineConfig;
use wellness_intelligence::models::{
    BenefitStrength, CatalogFood, ConsumedFoodItem, ConsumptionEvent, DefenseSystem, MealTime,
    SystemBenefit,
};
use wellness_intelligence::service::ScoringService;
use wellness_intelligence::storage::memory::{
    InMemoryCatalog, InMemoryConsumptionLog, InMemoryRecommendationStore,
};

/// A small but realistic reference catalog spanning all five systems
pub fn sample_catalog() -> Vec<CatalogFood> {
    vec![
        catalog_food(
            "tomato",
            "vegetable",
            &[
                (DefenseSystem::Angiogenesis, BenefitStrength::High),
                (DefenseSystem::DnaProtection, BenefitStrength::Medium),
            ],
        ),
        catalog_food(
            "spinach",
            "vegetable",
            &[
                (DefenseSystem::Angiogenesis, BenefitStrength::Medium),
                (DefenseSystem::Regeneration, BenefitStrength::Medium),
                (DefenseSystem::DnaProtection, BenefitStrength::High),
            ],
        ),
        catalog_food(
            "yogurt",
            "dairy",
            &[
                (DefenseSystem::Microbiome, BenefitStrength::High),
                (DefenseSystem::Immunity, BenefitStrength::Medium),
            ],
        ),
        catalog_food(
            "blueberry",
            "fruit",
            &[(DefenseSystem::DnaProtection, BenefitStrength::High)],
        ),
        catalog_food(
            "walnut",
            "nut",
            &[
                (DefenseSystem::Angiogenesis, BenefitStrength::Medium),
                (DefenseSystem::Regeneration, BenefitStrength::High),
                (DefenseSystem::DnaProtection, BenefitStrength::Medium),
            ],
        ),
        catalog_food(
            "kimchi",
            "fermented",
            &[
                (DefenseSystem::Microbiome, BenefitStrength::High),
                (DefenseSystem::Immunity, BenefitStrength::High),
            ],
        ),
        catalog_food(
            "green tea",
            "beverage",
            &[
                (DefenseSystem::Angiogenesis, BenefitStrength::High),
                (DefenseSystem::DnaProtection, BenefitStrength::Medium),
            ],
        ),
        catalog_food(
            "salmon",
            "fish",
            &[
                (DefenseSystem::Regeneration, BenefitStrength::High),
                (DefenseSystem::Immunity, BenefitStrength::Medium),
            ],
        ),
    ]
}

pub fn catalog_food(
    name: &str,
    category: &str,
    benefits: &[(DefenseSystem, BenefitStrength)],
) -> CatalogFood {
    CatalogFood {
        name: name.to_owned(),
        category: category.to_owned(),
        system_benefits: benefits.iter().copied().collect::<BTreeMap<_, _>>(),
    }
}

pub fn item(name: &str, benefits: &[(DefenseSystem, BenefitStrength)]) -> ConsumedFoodItem {
    ConsumedFoodItem::new(
        name,
        benefits
            .iter()
            .map(|&(system, strength)| SystemBenefit { system, strength })
            .collect(),
    )
}

pub fn event(
    user_id: Uuid,
    date: NaiveDate,
    meal_time: MealTime,
    items: Vec<ConsumedFoodItem>,
) -> ConsumptionEvent {
    ConsumptionEvent {
        user_id,
        date,
        meal_time,
        items,
    }
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

/// Engine configuration for tests: background cleanup disabled to avoid
/// runtime conflicts, everything else at defaults
pub fn test_config() -> EngineConfig {
    EngineConfig {
        cache: CacheConfig {
            enable_background_cleanup: false,
            ..CacheConfig::default()
        },
        ..EngineConfig::default()
    }
}

/// Fully wired service over fresh in-memory stores
pub struct TestHarness {
    pub service: ScoringService,
    pub catalog: Arc<InMemoryCatalog>,
    pub log: Arc<InMemoryConsumptionLog>,
    pub recommendations: Arc<InMemoryRecommendationStore>,
    pub user_id: Uuid,
}

impl TestHarness {
    pub async fn new() -> Self {
        let catalog = Arc::new(InMemoryCatalog::with_foods(sample_catalog()));
        let log = Arc::new(InMemoryConsumptionLog::default());
        let recommendations = Arc::new(InMemoryRecommendationStore::default());
        let service = ScoringService::new(
            catalog.clone(),
            log.clone(),
            recommendations.clone(),
            test_config(),
        )
        .await
        .expect("service construction");
        Self {
            service,
            catalog,
            log,
            recommendations,
            user_id: Uuid::new_v4(),
        }
    }

    /// Log an event for the test day and invalidate the cached score, as
    /// every consumption writer must
    pub async fn log_event(&self, meal_time: MealTime, items: Vec<ConsumedFoodItem>) {
        self.log
            .append(event(self.user_id, test_date(), meal_time, items))
            .await;
        self.service.invalidate(self.user_id, test_date()).await;
    }
}
