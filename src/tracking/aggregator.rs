// ABOUTME: Aggregates a day's consumption events into per-system unique-food sets
// ABOUTME: Dedup is per system by case-folded food name, not by event
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

use crate::models::{ConsumptionEvent, DefenseSystem, MealTime};
use std::collections::{BTreeMap, BTreeSet};

/// Aggregated view of one day's consumption
///
/// A single food counts toward every system it benefits: real foods are
/// multi-system, and the user gets credit in each. Eating the same food
/// twice in one day still counts once per system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumptionAggregate {
    /// Distinct (case-folded) food names logged against each system
    pub per_system_unique_foods: BTreeMap<DefenseSystem, BTreeSet<String>>,
    /// Distinct food names across the whole day, regardless of system
    pub total_unique_foods: BTreeSet<String>,
    /// Meal-time slots with at least one logged event
    pub meal_times_present: BTreeSet<MealTime>,
}

impl ConsumptionAggregate {
    /// Distinct foods logged against one system
    #[must_use]
    pub fn unique_food_count(&self, system: DefenseSystem) -> u32 {
        self.per_system_unique_foods
            .get(&system)
            .map_or(0, |foods| foods.len() as u32)
    }

    /// Systems with at least one logged food
    #[must_use]
    pub fn covered_system_count(&self) -> u32 {
        self.per_system_unique_foods
            .values()
            .filter(|foods| !foods.is_empty())
            .count() as u32
    }
}

/// Aggregate a day's consumption events
///
/// For every item in every event, the item's case-folded name is added to the
/// unique-food set of each system the item benefits. Quantities are ignored;
/// scoring is presence-based.
#[must_use]
pub fn aggregate(events: &[ConsumptionEvent]) -> ConsumptionAggregate {
    let mut result = ConsumptionAggregate::default();

    for event in events {
        if !event.items.is_empty() {
            result.meal_times_present.insert(event.meal_time);
        }
        for item in &event.items {
            let name = item.name.trim().to_lowercase();
            if name.is_empty() {
                continue;
            }
            result.total_unique_foods.insert(name.clone());
            for benefit in &item.benefits {
                result
                    .per_system_unique_foods
                    .entry(benefit.system)
                    .or_default()
                    .insert(name.clone());
            }
        }
    }

    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::models::{BenefitStrength, ConsumedFoodItem, SystemBenefit};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn item(name: &str, systems: &[DefenseSystem]) -> ConsumedFoodItem {
        ConsumedFoodItem::new(
            name,
            systems
                .iter()
                .map(|&system| SystemBenefit {
                    system,
                    strength: BenefitStrength::Medium,
                })
                .collect(),
        )
    }

    fn event(meal_time: MealTime, items: Vec<ConsumedFoodItem>) -> ConsumptionEvent {
        ConsumptionEvent {
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            meal_time,
            items,
        }
    }

    #[test]
    fn test_multi_system_food_credits_every_system() {
        let events = vec![event(
            MealTime::Breakfast,
            vec![item(
                "spinach",
                &[DefenseSystem::Angiogenesis, DefenseSystem::DnaProtection],
            )],
        )];
        let agg = aggregate(&events);
        assert_eq!(agg.unique_food_count(DefenseSystem::Angiogenesis), 1);
        assert_eq!(agg.unique_food_count(DefenseSystem::DnaProtection), 1);
        assert_eq!(agg.unique_food_count(DefenseSystem::Microbiome), 0);
        assert_eq!(agg.covered_system_count(), 2);
    }

    #[test]
    fn test_duplicate_food_counts_once_per_system() {
        let events = vec![
            event(
                MealTime::Breakfast,
                vec![item("spinach", &[DefenseSystem::Angiogenesis])],
            ),
            event(
                MealTime::Dinner,
                vec![item("Spinach ", &[DefenseSystem::Angiogenesis])],
            ),
        ];
        let agg = aggregate(&events);
        assert_eq!(agg.unique_food_count(DefenseSystem::Angiogenesis), 1);
        assert_eq!(agg.total_unique_foods.len(), 1);
        assert_eq!(agg.meal_times_present.len(), 2);
    }

    #[test]
    fn test_event_without_items_does_not_mark_meal_time() {
        let events = vec![event(MealTime::Lunch, vec![])];
        let agg = aggregate(&events);
        assert!(agg.meal_times_present.is_empty());
    }

    #[test]
    fn test_empty_events_yield_empty_aggregate() {
        let agg = aggregate(&[]);
        assert_eq!(agg.covered_system_count(), 0);
        assert!(agg.total_unique_foods.is_empty());
        assert!(agg.meal_times_present.is_empty());
    }
}
