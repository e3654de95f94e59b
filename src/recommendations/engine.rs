// ABOUTME: Synthesizes, deduplicates, and prioritizes next-action recommendations from coverage gaps
// ABOUTME: Owns next-action selection, lifecycle validation, and auto-completion of satisfied cards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

use super::gap_analyzer::{analyze_gaps, priority_for_gap, SystemGap};
use crate::constants::recommendations::FOOD_SUGGESTION_LIMIT;
use crate::constants::scoring::FOODS_PER_SYSTEM_TARGET;
use crate::errors::{AppError, AppResult};
use crate::models::{
    CatalogFood, DailyScore, DefenseSystem, MealTime, Recommendation, RecommendationPriority,
    RecommendationStatus, RecommendationType,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashSet;
use uuid::Uuid;

/// Inputs for one generation pass
pub struct GenerationContext<'a> {
    /// User the recommendations are for
    pub user_id: Uuid,
    /// Day whose coverage gaps drive generation
    pub date: NaiveDate,
    /// Freshly computed score for that day
    pub current_score: &'a DailyScore,
    /// Recommendations already stored for the user
    pub existing: &'a [Recommendation],
    /// Catalog snapshot for food suggestions
    pub catalog: &'a [CatalogFood],
    /// Generation instant, also the expiry anchor
    pub now: DateTime<Utc>,
}

/// A catalog food proposed to close one or more gaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodCandidate {
    /// Canonical food name
    pub name: String,
    /// Food category
    pub category: String,
    /// Gap systems this food benefits
    pub systems: Vec<DefenseSystem>,
    /// How many of the gap systems it benefits
    pub system_count: usize,
    /// Rank bucket from the multi-system count
    pub priority: RecommendationPriority,
}

/// Generates recommendations and manages their lifecycle
pub struct RecommendationEngine {
    expiry_hours: i64,
}

impl RecommendationEngine {
    /// Engine with the given expiry horizon in hours
    #[must_use]
    pub const fn new(expiry_hours: i64) -> Self {
        Self { expiry_hours }
    }

    /// Generate a deduplicated, priority-ordered batch of recommendations
    ///
    /// Candidates are synthesized per gap system (missing systems first, then
    /// weak ones, weakest first), followed by a meal-plan card when two or
    /// more systems are weak at once and a workflow-step card for the first
    /// missed main meal. The batch is deduplicated by `(target_system, type)`
    /// against itself and against still-pending, non-expired existing
    /// recommendations, so repeated calls for the same gaps produce nothing
    /// new.
    #[must_use]
    pub fn generate(&self, ctx: &GenerationContext<'_>) -> Vec<Recommendation> {
        let gaps = analyze_gaps(ctx.current_score);

        let mut live_keys: HashSet<(Option<DefenseSystem>, RecommendationType)> = ctx
            .existing
            .iter()
            .filter(|rec| rec.is_actionable(ctx.now))
            .map(Recommendation::dedup_key)
            .collect();

        let gap_system_list: Vec<DefenseSystem> =
            gaps.gap_systems().iter().map(|gap| gap.system).collect();

        let mut batch = Vec::new();
        let mut push_unique = |candidate: Recommendation| {
            if live_keys.insert(candidate.dedup_key()) {
                batch.push(candidate);
            } else {
                tracing::debug!(
                    target_system = ?candidate.target_system,
                    rec_type = ?candidate.rec_type,
                    "Skipping duplicate recommendation for live (system, type) pair"
                );
            }
        };

        for gap in gaps.gap_systems() {
            push_unique(self.system_candidate(ctx, gap, &gap_system_list));
        }

        if gaps.weak_systems.len() >= 2 {
            if let Some(candidate) = self.meal_plan_candidate(ctx, &gaps.weak_systems) {
                push_unique(candidate);
            }
        }

        if let Some(&meal_time) = gaps.missed_main_meals().first() {
            push_unique(self.missed_meal_candidate(ctx, meal_time));
        }

        batch.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        batch
    }

    /// Pick the single next action: highest-priority, non-expired, pending,
    /// tie-broken by earliest creation
    #[must_use]
    pub fn next_action<'a>(
        recommendations: &'a [Recommendation],
        now: DateTime<Utc>,
    ) -> Option<&'a Recommendation> {
        recommendations
            .iter()
            .filter(|rec| rec.is_actionable(now))
            .min_by(|a, b| {
                b.priority
                    .cmp(&a.priority)
                    .then_with(|| a.created_at.cmp(&b.created_at))
            })
    }

    /// Validate a caller-invoked lifecycle transition
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`](crate::errors::ErrorCode::InvalidTransition),
    /// carrying the current and attempted status, when the state machine does
    /// not allow the move.
    pub fn validate_transition(
        current: RecommendationStatus,
        next: RecommendationStatus,
    ) -> AppResult<()> {
        if current.can_transition_to(next) {
            Ok(())
        } else {
            Err(AppError::invalid_transition(current, next))
        }
    }

    /// Pending recommendations whose target system just reached its target
    ///
    /// Cleanup side effect of logging: these move to `Completed` without a
    /// user-invoked transition, through this dedicated internal path.
    #[must_use]
    pub fn auto_completions(
        score: &DailyScore,
        pending: &[Recommendation],
    ) -> Vec<Uuid> {
        let completed_systems: HashSet<DefenseSystem> =
            score.completed_systems().into_iter().collect();

        pending
            .iter()
            .filter(|rec| rec.status == RecommendationStatus::Pending)
            .filter(|rec| {
                rec.target_system
                    .is_some_and(|system| completed_systems.contains(&system))
            })
            .map(|rec| rec.id)
            .collect()
    }

    fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::hours(self.expiry_hours)
    }

    /// Candidate for one under-covered system
    ///
    /// A system with no coverage gets a food-suggestion card naming catalog
    /// foods that also help the other gaps; a partially covered system gets
    /// a recipe card to finish it.
    fn system_candidate(
        &self,
        ctx: &GenerationContext<'_>,
        gap: SystemGap,
        gap_systems: &[DefenseSystem],
    ) -> Recommendation {
        let label = system_label(gap.system);
        let priority = priority_for_gap(gap.unique_food_count);

        let (rec_type, title, description, action_url) = if gap.is_missing() {
            let exclude: Vec<String> = ctx.current_score.coverage_for(gap.system).map_or_else(
                Vec::new,
                |coverage| coverage.unique_foods.iter().cloned().collect(),
            );
            let candidates =
                recommend_foods(gap_systems, &exclude, ctx.catalog, FOOD_SUGGESTION_LIMIT);
            let suggestions = if candidates.is_empty() {
                String::new()
            } else {
                let names: Vec<&str> =
                    candidates.iter().map(|c| c.name.as_str()).collect();
                format!(" Try: {}.", names.join(", "))
            };
            (
                RecommendationType::FoodSuggestion,
                format!("Start Your {label} Journey"),
                format!(
                    "No {} foods logged today.{suggestions}",
                    label.to_lowercase()
                ),
                format!("/foods/suggest?system={}", gap.system),
            )
        } else {
            (
                RecommendationType::Recipe,
                format!(
                    "Strengthen Your {label} ({}/{} foods)",
                    gap.unique_food_count, FOODS_PER_SYSTEM_TARGET
                ),
                format!(
                    "You've logged {} {} food{} today. Add {} more to complete this system.",
                    gap.unique_food_count,
                    label.to_lowercase(),
                    if gap.unique_food_count == 1 { "" } else { "s" },
                    gap.foods_needed
                ),
                format!("/recipes/generate?system={}", gap.system),
            )
        };

        Recommendation {
            id: Uuid::new_v4(),
            user_id: ctx.user_id,
            rec_type,
            priority,
            status: RecommendationStatus::Pending,
            target_system: Some(gap.system),
            title,
            description,
            action_url,
            created_at: ctx.now,
            expires_at: self.expires_at(ctx.now),
        }
    }

    /// Meal-plan candidate when several systems are weak simultaneously,
    /// targeting the weakest of them
    fn meal_plan_candidate(
        &self,
        ctx: &GenerationContext<'_>,
        weak_systems: &[SystemGap],
    ) -> Option<Recommendation> {
        let weakest = weak_systems.first()?;
        let labels: Vec<&str> = weak_systems
            .iter()
            .take(3)
            .map(|gap| system_label(gap.system))
            .collect();

        Some(Recommendation {
            id: Uuid::new_v4(),
            user_id: ctx.user_id,
            rec_type: RecommendationType::MealPlan,
            priority: RecommendationPriority::High,
            status: RecommendationStatus::Pending,
            target_system: Some(weakest.system),
            title: "Create a Meal Plan".to_owned(),
            description: format!(
                "Boost multiple defense systems ({}) with a custom meal plan.",
                labels.join(", ")
            ),
            action_url: "/meal-planner".to_owned(),
            created_at: ctx.now,
            expires_at: self.expires_at(ctx.now),
        })
    }

    /// Workflow-step candidate for a missed main meal
    fn missed_meal_candidate(
        &self,
        ctx: &GenerationContext<'_>,
        meal_time: MealTime,
    ) -> Recommendation {
        let label = meal_label(meal_time);
        Recommendation {
            id: Uuid::new_v4(),
            user_id: ctx.user_id,
            rec_type: RecommendationType::WorkflowStep,
            priority: RecommendationPriority::Medium,
            status: RecommendationStatus::Pending,
            target_system: None,
            title: format!("Plan Your {label}"),
            description: format!(
                "{label} is not logged yet. Planning ahead makes healthy eating easier."
            ),
            action_url: format!("/log/meal?slot={meal_time}"),
            created_at: ctx.now,
            expires_at: self.expires_at(ctx.now),
        }
    }
}

/// Rank catalog foods by how many gap systems they close at once
///
/// Foods already logged (by case-folded name) are excluded. A food touching
/// three or more gap systems ranks high, two ranks medium, one ranks low;
/// ties break toward the higher system count.
#[must_use]
pub fn recommend_foods(
    gap_systems: &[DefenseSystem],
    exclude: &[String],
    catalog: &[CatalogFood],
    limit: usize,
) -> Vec<FoodCandidate> {
    if gap_systems.is_empty() {
        return Vec::new();
    }

    let excluded: HashSet<String> = exclude.iter().map(|name| name.to_lowercase()).collect();

    let mut candidates: Vec<FoodCandidate> = catalog
        .iter()
        .filter(|food| !excluded.contains(&food.name.to_lowercase()))
        .filter_map(|food| {
            let systems: Vec<DefenseSystem> = gap_systems
                .iter()
                .copied()
                .filter(|&system| food.benefits_system(system))
                .collect();
            if systems.is_empty() {
                return None;
            }
            let system_count = systems.len();
            let priority = if system_count >= 3 {
                RecommendationPriority::High
            } else if system_count >= 2 {
                RecommendationPriority::Medium
            } else {
                RecommendationPriority::Low
            };
            Some(FoodCandidate {
                name: food.name.clone(),
                category: food.category.clone(),
                systems,
                system_count,
                priority,
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.system_count.cmp(&a.system_count))
            .then_with(|| a.name.cmp(&b.name))
    });
    candidates.truncate(limit);
    candidates
}

/// Prose label for a defense system
const fn system_label(system: DefenseSystem) -> &'static str {
    match system {
        DefenseSystem::Angiogenesis => "Angiogenesis",
        DefenseSystem::Regeneration => "Regeneration",
        DefenseSystem::Microbiome => "Microbiome",
        DefenseSystem::DnaProtection => "DNA Protection",
        DefenseSystem::Immunity => "Immunity",
    }
}

/// Prose label for a meal-time slot
const fn meal_label(meal_time: MealTime) -> &'static str {
    match meal_time {
        MealTime::Breakfast => "Breakfast",
        MealTime::MorningSnack => "Morning Snack",
        MealTime::Lunch => "Lunch",
        MealTime::AfternoonSnack => "Afternoon Snack",
        MealTime::Dinner => "Dinner",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::models::{BenefitStrength, ConsumedFoodItem, ConsumptionEvent, SystemBenefit};
    use crate::tracking::{aggregate, compute};
    use std::collections::BTreeMap;

    fn score_with(counts: &[(DefenseSystem, usize)], meal_times: &[MealTime]) -> DailyScore {
        let mut events = Vec::new();
        for (index, &meal_time) in meal_times.iter().enumerate() {
            let items = if index == 0 {
                counts
                    .iter()
                    .flat_map(|&(system, count)| {
                        (0..count).map(move |i| {
                            ConsumedFoodItem::new(
                                format!("{system}-{i}"),
                                vec![SystemBenefit {
                                    system,
                                    strength: BenefitStrength::Medium,
                                }],
                            )
                        })
                    })
                    .collect()
            } else {
                vec![ConsumedFoodItem::new(
                    format!("filler-{index}"),
                    vec![SystemBenefit {
                        system: DefenseSystem::Immunity,
                        strength: BenefitStrength::Low,
                    }],
                )]
            };
            events.push(ConsumptionEvent {
                user_id: Uuid::new_v4(),
                date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
                meal_time,
                items,
            });
        }
        compute(&aggregate(&events))
    }

    fn catalog_food(name: &str, systems: &[DefenseSystem]) -> CatalogFood {
        CatalogFood {
            name: name.to_owned(),
            category: "test".to_owned(),
            system_benefits: systems
                .iter()
                .map(|&system| (system, BenefitStrength::Medium))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn context<'a>(
        score: &'a DailyScore,
        existing: &'a [Recommendation],
        catalog: &'a [CatalogFood],
    ) -> GenerationContext<'a> {
        GenerationContext {
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            current_score: score,
            existing,
            catalog,
            now: Utc::now(),
        }
    }

    #[test]
    fn test_missing_system_yields_critical_food_suggestion() {
        let score = score_with(
            &[
                (DefenseSystem::Regeneration, 5),
                (DefenseSystem::Microbiome, 5),
                (DefenseSystem::DnaProtection, 5),
                (DefenseSystem::Immunity, 5),
            ],
            &[MealTime::Breakfast],
        );
        let engine = RecommendationEngine::new(24);
        let batch = engine.generate(&context(&score, &[], &[]));

        let angio: Vec<&Recommendation> = batch
            .iter()
            .filter(|rec| rec.target_system == Some(DefenseSystem::Angiogenesis))
            .collect();
        assert_eq!(angio.len(), 1);
        assert_eq!(angio[0].rec_type, RecommendationType::FoodSuggestion);
        assert_eq!(angio[0].priority, RecommendationPriority::Critical);
    }

    #[test]
    fn test_weak_system_yields_recipe_with_priority_by_depth() {
        let score = score_with(
            &[
                (DefenseSystem::Angiogenesis, 2),
                (DefenseSystem::Regeneration, 4),
                (DefenseSystem::Microbiome, 5),
                (DefenseSystem::DnaProtection, 5),
                (DefenseSystem::Immunity, 5),
            ],
            &[MealTime::Breakfast],
        );
        let engine = RecommendationEngine::new(24);
        let batch = engine.generate(&context(&score, &[], &[]));

        let angio = batch
            .iter()
            .find(|rec| rec.target_system == Some(DefenseSystem::Angiogenesis))
            .unwrap();
        assert_eq!(angio.rec_type, RecommendationType::Recipe);
        assert_eq!(angio.priority, RecommendationPriority::High);

        let regen = batch
            .iter()
            .find(|rec| rec.target_system == Some(DefenseSystem::Regeneration))
            .unwrap();
        assert_eq!(regen.priority, RecommendationPriority::Medium);
    }

    #[test]
    fn test_batch_is_sorted_highest_priority_first() {
        let score = score_with(
            &[
                (DefenseSystem::Regeneration, 3),
                (DefenseSystem::Microbiome, 1),
            ],
            &[MealTime::Breakfast],
        );
        let engine = RecommendationEngine::new(24);
        let batch = engine.generate(&context(&score, &[], &[]));
        assert!(!batch.is_empty());
        for pair in batch.windows(2) {
            assert!(pair[0].priority >= pair[1].priority);
        }
    }

    #[test]
    fn test_dedup_against_pending_existing() {
        let score = score_with(
            &[
                (DefenseSystem::Regeneration, 5),
                (DefenseSystem::Microbiome, 5),
                (DefenseSystem::DnaProtection, 5),
                (DefenseSystem::Immunity, 5),
            ],
            &[MealTime::Breakfast],
        );
        let engine = RecommendationEngine::new(24);
        let ctx = context(&score, &[], &[]);
        let first = engine.generate(&ctx);
        assert!(!first.is_empty());

        let ctx_again = GenerationContext {
            existing: &first,
            ..ctx
        };
        let second = engine.generate(&ctx_again);
        assert!(second.is_empty());
    }

    #[test]
    fn test_expired_pending_does_not_block_regeneration() {
        let score = score_with(
            &[
                (DefenseSystem::Regeneration, 5),
                (DefenseSystem::Microbiome, 5),
                (DefenseSystem::DnaProtection, 5),
                (DefenseSystem::Immunity, 5),
            ],
            &[MealTime::Breakfast],
        );
        let engine = RecommendationEngine::new(24);
        let ctx = context(&score, &[], &[]);
        let mut stale = engine.generate(&ctx);
        for rec in &mut stale {
            rec.expires_at = ctx.now - Duration::hours(1);
        }

        let ctx_again = GenerationContext {
            existing: &stale,
            ..ctx
        };
        let fresh = engine.generate(&ctx_again);
        assert_eq!(fresh.len(), stale.len());
    }

    #[test]
    fn test_meal_plan_generated_when_two_systems_weak() {
        let score = score_with(
            &[
                (DefenseSystem::Angiogenesis, 1),
                (DefenseSystem::Regeneration, 2),
                (DefenseSystem::Microbiome, 5),
                (DefenseSystem::DnaProtection, 5),
                (DefenseSystem::Immunity, 5),
            ],
            &[MealTime::Breakfast],
        );
        let engine = RecommendationEngine::new(24);
        let batch = engine.generate(&context(&score, &[], &[]));

        let meal_plan = batch
            .iter()
            .find(|rec| rec.rec_type == RecommendationType::MealPlan)
            .unwrap();
        // Targets the weakest weak system
        assert_eq!(meal_plan.target_system, Some(DefenseSystem::Angiogenesis));
        assert_eq!(meal_plan.priority, RecommendationPriority::High);
    }

    #[test]
    fn test_workflow_step_for_first_missed_main_meal() {
        let score = score_with(&[(DefenseSystem::Immunity, 1)], &[MealTime::Lunch]);
        let engine = RecommendationEngine::new(24);
        let batch = engine.generate(&context(&score, &[], &[]));

        let steps: Vec<&Recommendation> = batch
            .iter()
            .filter(|rec| rec.rec_type == RecommendationType::WorkflowStep)
            .collect();
        assert_eq!(steps.len(), 1);
        assert!(steps[0].title.contains("Breakfast"));
        assert!(steps[0].target_system.is_none());
    }

    #[test]
    fn test_next_action_orders_by_priority_then_age() {
        let engine = RecommendationEngine::new(24);
        let score = score_with(
            &[
                (DefenseSystem::Angiogenesis, 3),
                (DefenseSystem::Microbiome, 0),
            ],
            &[MealTime::Breakfast],
        );
        let batch = engine.generate(&context(&score, &[], &[]));
        let next = RecommendationEngine::next_action(&batch, Utc::now()).unwrap();
        assert_eq!(next.priority, RecommendationPriority::Critical);

        // Expired recommendations are never selected
        let expired: Vec<Recommendation> = batch
            .iter()
            .cloned()
            .map(|mut rec| {
                rec.expires_at = Utc::now() - Duration::hours(1);
                rec
            })
            .collect();
        assert!(RecommendationEngine::next_action(&expired, Utc::now()).is_none());
    }

    #[test]
    fn test_validate_transition_rejects_invalid_moves() {
        let err = RecommendationEngine::validate_transition(
            RecommendationStatus::Pending,
            RecommendationStatus::Completed,
        )
        .unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::InvalidTransition);

        assert!(RecommendationEngine::validate_transition(
            RecommendationStatus::ActedOn,
            RecommendationStatus::Completed,
        )
        .is_ok());
    }

    #[test]
    fn test_auto_completions_pick_satisfied_pending_only() {
        let engine = RecommendationEngine::new(24);
        let gap_score = score_with(
            &[
                (DefenseSystem::Regeneration, 5),
                (DefenseSystem::Microbiome, 5),
                (DefenseSystem::DnaProtection, 5),
                (DefenseSystem::Immunity, 5),
            ],
            &[MealTime::Breakfast],
        );
        let batch = engine.generate(&context(&gap_score, &[], &[]));
        let angio_id = batch
            .iter()
            .find(|rec| rec.target_system == Some(DefenseSystem::Angiogenesis))
            .unwrap()
            .id;

        // The user then fills angiogenesis to target
        let full_score = score_with(
            &[
                (DefenseSystem::Angiogenesis, 5),
                (DefenseSystem::Regeneration, 5),
                (DefenseSystem::Microbiome, 5),
                (DefenseSystem::DnaProtection, 5),
                (DefenseSystem::Immunity, 5),
            ],
            &[MealTime::Breakfast],
        );
        let completions = RecommendationEngine::auto_completions(&full_score, &batch);
        assert!(completions.contains(&angio_id));
    }

    #[test]
    fn test_recommend_foods_ranks_multi_system_first() {
        let catalog = vec![
            catalog_food("kale", &[DefenseSystem::Angiogenesis]),
            catalog_food(
                "walnut",
                &[
                    DefenseSystem::Angiogenesis,
                    DefenseSystem::Regeneration,
                    DefenseSystem::DnaProtection,
                ],
            ),
            catalog_food(
                "yogurt",
                &[DefenseSystem::Microbiome, DefenseSystem::Immunity],
            ),
        ];
        let gaps = [
            DefenseSystem::Angiogenesis,
            DefenseSystem::Regeneration,
            DefenseSystem::DnaProtection,
        ];
        let ranked = recommend_foods(&gaps, &[], &catalog, 10);
        assert_eq!(ranked[0].name, "walnut");
        assert_eq!(ranked[0].priority, RecommendationPriority::High);
        assert_eq!(ranked[0].system_count, 3);
        // yogurt benefits none of the gap systems
        assert!(ranked.iter().all(|c| c.name != "yogurt"));
    }

    #[test]
    fn test_recommend_foods_excludes_already_logged() {
        let catalog = vec![catalog_food("kale", &[DefenseSystem::Angiogenesis])];
        let ranked = recommend_foods(
            &[DefenseSystem::Angiogenesis],
            &["Kale".to_owned()],
            &catalog,
            10,
        );
        assert!(ranked.is_empty());
    }
}
