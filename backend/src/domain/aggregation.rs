//! Discount and failure aggregation over task lists.
//!
//! An entry with a negative value is a failed activity, and its value is the
//! amount discounted from the member's allowance.

use crate::domain::models::{round_cents, TaskList};

/// Sum of the negative entries of one list. Zero when there are none.
pub fn compute_discount(list: &TaskList) -> f64 {
    let total = list
        .activities
        .iter()
        .filter(|a| a.is_failed())
        .fold(0.0, |acc, a| acc + a.value);
    round_cents(total)
}

pub fn compute_total_discount(lists: &[TaskList]) -> f64 {
    round_cents(lists.iter().fold(0.0, |acc, list| acc + compute_discount(list)))
}

pub fn count_failed_activities(list: &TaskList) -> usize {
    list.activities.iter().filter(|a| a.is_failed()).count()
}

/// One count per list, in input order.
pub fn count_failed_activities_per_list(lists: &[TaskList]) -> Vec<usize> {
    lists.iter().map(count_failed_activities).collect()
}

/// Allowance left after applying a (non-positive) total discount, never below zero.
pub fn remaining_allowance(allowance_value: f64, total_discount: f64) -> f64 {
    round_cents((allowance_value + total_discount).max(0.0))
}
