// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::models::Transaction;

pub fn sum_where<F>(transactions: &[Transaction], pred: F) -> Decimal
where
    F: Fn(&Transaction) -> bool,
{
    transactions
        .iter()
        .filter(|t| pred(t))
        .map(|t| t.amount)
        .sum()
}

pub fn total_expense(transactions: &[Transaction]) -> Decimal {
    sum_where(transactions, |t| t.is_expense)
}

pub fn total_income(transactions: &[Transaction]) -> Decimal {
    sum_where(transactions, |t| !t.is_expense)
}

pub fn net_amount(transactions: &[Transaction]) -> Decimal {
    total_income(transactions) - total_expense(transactions)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
    pub percent: f64,
}

/// Per-category sums over one side of the ledger, largest first. Ties keep
/// the order categories were first encountered in. When the group total is
/// zero every category is listed at 0%.
pub fn group_by_category(transactions: &[Transaction], expense: bool) -> Vec<CategoryTotal> {
    let mut groups: Vec<(String, Decimal)> = Vec::new();
    for t in transactions.iter().filter(|t| t.is_expense == expense) {
        match groups.iter_mut().find(|(name, _)| name == &t.category) {
            Some((_, amount)) => *amount += t.amount,
            None => groups.push((t.category.clone(), t.amount)),
        }
    }
    let total: Decimal = groups.iter().map(|(_, amount)| *amount).sum();
    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups
        .into_iter()
        .map(|(category, amount)| {
            let percent = if total > Decimal::ZERO {
                (amount / total).to_f64().unwrap_or(0.0) * 100.0
            } else {
                0.0
            };
            CategoryTotal {
                category,
                amount,
                percent,
            }
        })
        .collect()
}

/// `(YYYY-MM, income, expense)` per calendar month, newest month first.
pub fn monthly_cashflow(transactions: &[Transaction]) -> Vec<(String, Decimal, Decimal)> {
    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let entry = map
            .entry(t.date.format("%Y-%m").to_string())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        if t.is_expense {
            entry.1 += t.amount;
        } else {
            entry.0 += t.amount;
        }
    }
    map.into_iter()
        .rev()
        .map(|(month, (income, expense))| (month, income, expense))
        .collect()
}
