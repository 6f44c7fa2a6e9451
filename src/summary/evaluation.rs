//! The budget evaluator.
//!
//! Tallies spending per category, compares each tally against the category's
//! spending limit and produces the report rendered by the summary page and
//! returned by the summary API.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    category::{Category, CategoryId},
    expense::Expense,
};

/// How a category's spending compares to its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// No limit is set for the category.
    NoLimit,
    /// Spending is below the limit.
    Under,
    /// Spending is exactly at the limit.
    Equal,
    /// Spending exceeds the limit.
    Over,
}

impl BudgetStatus {
    /// Compare `spent` against `limit`.
    pub fn evaluate(spent: i64, limit: Option<i64>) -> Self {
        match limit {
            None => BudgetStatus::NoLimit,
            Some(limit) if spent > limit => BudgetStatus::Over,
            Some(limit) if spent == limit => BudgetStatus::Equal,
            Some(_) => BudgetStatus::Under,
        }
    }
}

/// The evaluated budget for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// The name of the category.
    pub category: String,
    /// The sum of all expense amounts recorded under the category.
    pub spent: i64,
    /// The spending limit, or `None` when no limit is set.
    pub limit: Option<i64>,
    /// How `spent` compares to `limit`.
    pub status: BudgetStatus,
    /// How much of the limit has been spent, as a whole percentage capped at
    /// 100. Zero when no limit is set.
    pub percent: u8,
}

/// The evaluated budget for all categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetReport {
    /// Per-category summaries, sorted by category name.
    pub categories: Vec<CategorySummary>,
    /// The sum of all expense amounts across all categories.
    pub total_spending: i64,
}

/// Tally the amount spent per category.
///
/// Categories without expenses do not appear in the result.
pub fn sum_spending_by_category(expenses: &[Expense]) -> HashMap<CategoryId, i64> {
    let mut spending = HashMap::new();

    for expense in expenses {
        *spending.entry(expense.category_id).or_insert(0) += expense.amount;
    }

    spending
}

/// Evaluate the budget for every category.
///
/// This is a pure function of its inputs: `spent` is recomputed from the full
/// expense list on every call, never cached. The report lists one summary per
/// category, sorted by name, and the grand total over all expenses.
pub fn compute_summaries(expenses: &[Expense], categories: &[Category]) -> BudgetReport {
    let spending = sum_spending_by_category(expenses);

    let mut summaries: Vec<CategorySummary> = categories
        .iter()
        .map(|category| {
            let spent = *spending.get(&category.id).unwrap_or(&0);
            let limit = category.limit();
            let status = BudgetStatus::evaluate(spent, limit);
            let percent = match limit {
                Some(limit) => percent_of_limit(spent, limit),
                None => 0,
            };

            CategorySummary {
                category: category.name.to_string(),
                spent,
                limit,
                status,
                percent,
            }
        })
        .collect();

    summaries.sort_by(|a, b| a.category.cmp(&b.category));

    let total_spending = expenses.iter().map(|expense| expense.amount).sum();

    BudgetReport {
        categories: summaries,
        total_spending,
    }
}

/// `spent` as a whole percentage of `limit`, rounded to the nearest integer
/// and capped at 100.
///
/// `limit` must be positive.
fn percent_of_limit(spent: i64, limit: i64) -> u8 {
    let percent = (spent * 100 + limit / 2) / limit;

    percent.clamp(0, 100) as u8
}

#[cfg(test)]
mod budget_status_tests {
    use super::BudgetStatus;

    #[test]
    fn evaluates_spending_against_limit() {
        assert_eq!(BudgetStatus::evaluate(0, None), BudgetStatus::NoLimit);
        assert_eq!(BudgetStatus::evaluate(50, Some(100)), BudgetStatus::Under);
        assert_eq!(BudgetStatus::evaluate(100, Some(100)), BudgetStatus::Equal);
        assert_eq!(BudgetStatus::evaluate(101, Some(100)), BudgetStatus::Over);
    }
}
