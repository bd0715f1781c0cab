// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;

pub const FALLBACK_CATEGORY: &str = "Other";

/// One classification rule: any keyword contained in the description maps
/// the transaction to `category` with the given expense flag.
pub struct Rule {
    pub keywords: &'static [&'static str],
    pub category: &'static str,
    pub is_expense: bool,
}

/// Ordered rule table; earlier rules take precedence. Data, not branching
/// code, so rules can be extended without touching the matcher.
pub static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule {
            keywords: &["salary", "payroll", "wages", "paycheck"],
            category: "Salary",
            is_expense: false,
        },
        Rule {
            keywords: &["dividend", "interest", "capital gain"],
            category: "Investments",
            is_expense: false,
        },
        Rule {
            keywords: &["grocery", "groceries", "supermarket", "bakery", "butcher"],
            category: "Food",
            is_expense: true,
        },
        Rule {
            keywords: &["restaurant", "cafe", "coffee", "pizza", "takeaway", "lunch", "dinner"],
            category: "Dining",
            is_expense: true,
        },
        Rule {
            keywords: &["uber", "lyft", "taxi", "fuel", "parking", "metro", "train", "transit"],
            category: "Transport",
            is_expense: true,
        },
        Rule {
            keywords: &["rent", "mortgage", "landlord"],
            category: "Housing",
            is_expense: true,
        },
        Rule {
            keywords: &["electricity", "water bill", "internet", "phone bill", "utility"],
            category: "Utilities",
            is_expense: true,
        },
        Rule {
            keywords: &["pharmacy", "doctor", "dentist", "clinic", "hospital"],
            category: "Health",
            is_expense: true,
        },
        Rule {
            keywords: &["netflix", "spotify", "cinema", "steam", "concert"],
            category: "Entertainment",
            is_expense: true,
        },
        Rule {
            keywords: &["amazon", "mall", "clothing", "shoes", "ikea"],
            category: "Shopping",
            is_expense: true,
        },
    ]
});

/// Which raw amount sign marks an expense when nothing else says so. The
/// polarity is explicit configuration because the two entry paths (manual
/// entry vs bank export) disagree about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignConvention {
    /// Positive raw amounts are expenses (manual-entry style).
    #[default]
    PositiveIsExpense,
    /// Negative raw amounts are expenses (bank-export style).
    NegativeIsExpense,
}

impl SignConvention {
    pub fn is_expense(self, amount: Decimal) -> bool {
        match self {
            SignConvention::PositiveIsExpense => amount > Decimal::ZERO,
            SignConvention::NegativeIsExpense => amount < Decimal::ZERO,
        }
    }
}

/// Case-insensitive substring match against the rule table; the first
/// matching rule wins.
pub fn classify(description: &str) -> Option<(&'static str, bool)> {
    let hay = description.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| hay.contains(k)))
        .map(|rule| (rule.category, rule.is_expense))
}

/// Advisory classification with the no-match fallback: `Other`, expense
/// flag inferred from the raw amount sign under `convention`. Callers may
/// always override the result before persisting.
pub fn classify_or_default(
    description: &str,
    amount: Decimal,
    convention: SignConvention,
) -> (String, bool) {
    match classify(description) {
        Some((category, is_expense)) => (category.to_string(), is_expense),
        None => (
            FALLBACK_CATEGORY.to_string(),
            convention.is_expense(amount),
        ),
    }
}
