use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::{AnswerSet, Category, CategoryProvider};
use crate::severity::Severity;
use crate::table::ReactionTable;
use crate::{nan_to_zero, round_to};

/// Per-category figures of one respondent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMetrics {
    pub reaction_count: usize,
    pub effective_reaction_count: usize,
    pub stress_factor: f64,
    /// Share of all reactions, 0..=100, not rounded.
    pub proportion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub summary_ratio: f64,
    pub total_reaction_count: f64,
    pub general_ratio: f64,
}

/// Presentation row of a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRow {
    pub reaction_count: usize,
    pub stress_factor: f64,
    pub effective_reaction_count: usize,
    /// Reactions weighted by the stress factor.
    pub f: f64,
    /// Stress factor in percent.
    pub d_sf: f64,
    /// Answered questions of the category.
    pub answers: BTreeSet<u32>,
}

impl StatRow {
    pub fn as_tuple(&self) -> (usize, f64, usize, f64, f64, &BTreeSet<u32>) {
        (
            self.reaction_count,
            self.stress_factor,
            self.effective_reaction_count,
            self.f,
            self.d_sf,
            &self.answers,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryResult {
    pub id: u32,
    pub title: String,
    pub metrics: CategoryMetrics,
    pub stat: StatRow,
}

/// Everything computed for one respondent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    pub categories: Vec<CategoryResult>,
    pub summary: ScoreSummary,
    /// Band of the summary ratio.
    pub severity: Severity,
    pub description: &'static str,
}

/// Scores the answers of one respondent against a reaction table.
///
/// Every method is a pure function of the answers, the table and its
/// arguments. Categories are visited in the order they are given.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostics<'a> {
    answers: &'a AnswerSet,
    table: &'a ReactionTable,
}

impl<'a> Diagnostics<'a> {
    pub fn new(answers: &'a AnswerSet, table: &'a ReactionTable) -> Self {
        Self { answers, table }
    }

    pub fn with_embedded_table(answers: &'a AnswerSet) -> Self {
        Self::new(answers, ReactionTable::embedded())
    }

    /// Answered questions that belong to the category.
    pub fn category_answers(&self, category: &Category) -> BTreeSet<u32> {
        self.answers
            .question_ids()
            .intersection(&category.questions)
            .copied()
            .collect()
    }

    pub fn reaction_count(&self, category: &Category) -> usize {
        self.answers
            .question_ids()
            .intersection(&category.questions)
            .count()
    }

    /// Answered questions listed under effective thinking for the category.
    /// A category the table has no block for has none.
    pub fn effective_reaction_count(&self, category: &Category) -> usize {
        match self.table.effective_questions(category.id) {
            Some(questions) => self.answers.question_ids().intersection(questions).count(),
            None => {
                tracing::debug!("no effective reactions listed for category {}", category.id);
                0
            }
        }
    }

    /// `1 - effective / reactions`, rounded to 2 decimals; 0 without reactions.
    ///
    /// Not clamped: more effective reactions than reactions gives a negative
    /// factor, which is reported as a data inconsistency.
    pub fn stress_factor(&self, category: &Category) -> f64 {
        let q = self.reaction_count(category);
        if q == 0 {
            return 0.0;
        }
        let q_eff = self.effective_reaction_count(category);
        if q_eff > q {
            tracing::warn!(
                "category {} has {} effective reactions but only {} reactions",
                category.id,
                q_eff,
                q
            );
        }
        nan_to_zero(round_to(1.0 - q_eff as f64 / q as f64, 2))
    }

    /// Share of the category in all reactions, in percent.
    pub fn proportion_of_reactions(&self, category: &Category, categories: &[Category]) -> f64 {
        let q_sum = self.summary_reaction_count(categories);
        if q_sum == 0.0 {
            return 0.0;
        }
        let q = self.reaction_count(category);
        nan_to_zero((q * 100) as f64 / q_sum)
    }

    pub fn summary_reaction_count(&self, categories: &[Category]) -> f64 {
        categories
            .iter()
            .map(|category| self.reaction_count(category))
            .sum::<usize>() as f64
    }

    /// Stress factors weighted by proportion, as a ratio rounded to 2 decimals.
    pub fn summary_ratio_emotional_stress(&self, categories: &[Category]) -> f64 {
        let total = categories.iter().fold(0.0, |total, category| {
            total
                + self.stress_factor(category) * self.proportion_of_reactions(category, categories)
        });
        nan_to_zero(round_to(total / 100.0, 2))
    }

    /// Summary ratio scaled by the number of reactions, rounded to a whole number.
    pub fn general_ratio_emotional_stress(&self, categories: &[Category]) -> f64 {
        nan_to_zero(round_to(
            self.summary_ratio_emotional_stress(categories)
                * self.summary_reaction_count(categories),
            0,
        ))
    }

    pub fn metrics(&self, category: &Category, categories: &[Category]) -> CategoryMetrics {
        CategoryMetrics {
            reaction_count: self.reaction_count(category),
            effective_reaction_count: self.effective_reaction_count(category),
            stress_factor: self.stress_factor(category),
            proportion: self.proportion_of_reactions(category, categories),
        }
    }

    pub fn stat_row(&self, category: &Category) -> StatRow {
        let reaction_count = self.reaction_count(category);
        let stress_factor = self.stress_factor(category);
        StatRow {
            reaction_count,
            stress_factor,
            effective_reaction_count: self.effective_reaction_count(category),
            f: round_to(reaction_count as f64 * stress_factor, 2),
            d_sf: round_to(stress_factor * 100.0, 2),
            answers: self.category_answers(category),
        }
    }

    pub fn summary(&self, categories: &[Category]) -> ScoreSummary {
        ScoreSummary {
            summary_ratio: self.summary_ratio_emotional_stress(categories),
            total_reaction_count: self.summary_reaction_count(categories),
            general_ratio: self.general_ratio_emotional_stress(categories),
        }
    }

    pub fn evaluate<P: CategoryProvider + ?Sized>(&self, provider: &P) -> Diagnosis {
        let categories = provider.categories();
        let summary = self.summary(categories);
        let severity = Severity::classify(summary.summary_ratio);
        Diagnosis {
            categories: categories
                .iter()
                .map(|category| CategoryResult {
                    id: category.id,
                    title: category.title.clone(),
                    metrics: self.metrics(category, categories),
                    stat: self.stat_row(category),
                })
                .collect(),
            summary,
            severity,
            description: severity.description(),
        }
    }
}
