// ABOUTME: Fuzzy ingredient matching against the reference food catalog
// ABOUTME: Exact match, then substring, then suffix variants; first hit wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

use crate::models::{BenefitStrength, CatalogFood, ConsumedFoodItem, DefenseSystem, SystemBenefit};

/// Certainty tier for how a free-text ingredient was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchConfidence {
    /// No catalog entry matched
    None,
    /// Matched only after trying suffix variants
    Low,
    /// Matched by substring containment
    Medium,
    /// Matched the catalog name exactly (case-insensitive, trimmed)
    High,
}

/// Outcome of matching one ingredient against the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// The ingredient text as supplied
    pub ingredient: String,
    /// Catalog entry the ingredient resolved to, if any
    pub matched_food: Option<CatalogFood>,
    /// Benefits of the matched food; empty when nothing matched
    pub benefits: Vec<SystemBenefit>,
    /// How certain the resolution is
    pub confidence: MatchConfidence,
}

impl MatchResult {
    fn none(ingredient: &str) -> Self {
        Self {
            ingredient: ingredient.to_owned(),
            matched_food: None,
            benefits: Vec::new(),
            confidence: MatchConfidence::None,
        }
    }

    fn hit(ingredient: &str, food: &CatalogFood, confidence: MatchConfidence) -> Self {
        Self {
            ingredient: ingredient.to_owned(),
            matched_food: Some(food.clone()),
            benefits: food.benefits(),
            confidence,
        }
    }
}

/// Resolve a free-text food name to a catalog entry and its benefits
///
/// Tries, in order, first hit wins:
/// 1. exact case-insensitive match → `High`
/// 2. substring containment either way → `Medium` (when several entries
///    qualify, the first in catalog iteration order wins — an accepted
///    ambiguity, not an error)
/// 3. suffix variants of the input (strip `s`, `ies`→`y`, strip `es`,
///    append `s`) re-tested for exact/containment → `Low`
///
/// Empty input and an empty catalog both yield `None` confidence; neither is
/// an error. Pure over (input, catalog snapshot); performs no I/O.
#[must_use]
pub fn match_ingredient(ingredient: &str, catalog: &[CatalogFood]) -> MatchResult {
    let normalized = ingredient.trim().to_lowercase();
    if normalized.is_empty() {
        return MatchResult::none(ingredient);
    }

    if let Some(food) = catalog.iter().find(|f| f.name.to_lowercase() == normalized) {
        return MatchResult::hit(ingredient, food, MatchConfidence::High);
    }

    if let Some(food) = catalog.iter().find(|f| {
        let name = f.name.to_lowercase();
        normalized.contains(&name) || name.contains(&normalized)
    }) {
        return MatchResult::hit(ingredient, food, MatchConfidence::Medium);
    }

    for variant in suffix_variants(&normalized) {
        if let Some(food) = catalog.iter().find(|f| {
            let name = f.name.to_lowercase();
            name == variant || variant.contains(&name)
        }) {
            return MatchResult::hit(ingredient, food, MatchConfidence::Low);
        }
    }

    MatchResult::none(ingredient)
}

/// Match several ingredients against one catalog snapshot
#[must_use]
pub fn match_batch(ingredients: &[&str], catalog: &[CatalogFood]) -> Vec<MatchResult> {
    ingredients
        .iter()
        .map(|ingredient| match_ingredient(ingredient, catalog))
        .collect()
}

/// Resolve a recipe's ingredients to consumed items with benefits
///
/// Unmatched ingredients fall back to the recipe's own tagged defense
/// systems at `Medium` strength. The fallback is logged so attribution stays
/// auditable even though the stored shape is identical to a catalog hit.
#[must_use]
pub fn resolve_recipe_ingredients(
    ingredients: &[&str],
    recipe_systems: &[DefenseSystem],
    catalog: &[CatalogFood],
) -> Vec<ConsumedFoodItem> {
    ingredients
        .iter()
        .filter_map(|ingredient| {
            let result = match_ingredient(ingredient, catalog);
            if result.confidence == MatchConfidence::None {
                if recipe_systems.is_empty() {
                    return None;
                }
                tracing::debug!(
                    ingredient,
                    systems = recipe_systems.len(),
                    "No catalog match; attributing recipe's tagged systems at medium strength"
                );
                let benefits = recipe_systems
                    .iter()
                    .map(|&system| SystemBenefit {
                        system,
                        strength: BenefitStrength::Medium,
                    })
                    .collect();
                return Some(ConsumedFoodItem::new(*ingredient, benefits));
            }
            Some(ConsumedFoodItem::new(*ingredient, result.benefits))
        })
        .collect()
}

/// Common singular/plural suffix variants of a normalized ingredient
fn suffix_variants(normalized: &str) -> Vec<String> {
    let mut variants = Vec::with_capacity(4);
    if let Some(stripped) = normalized.strip_suffix('s') {
        variants.push(stripped.to_owned());
    }
    if let Some(stem) = normalized.strip_suffix("ies") {
        variants.push(format!("{stem}y"));
    }
    if let Some(stripped) = normalized.strip_suffix("es") {
        variants.push(stripped.to_owned());
    }
    variants.push(format!("{normalized}s"));
    variants
}
