// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::assistant::{self, FAILURE_REPLY, Generator, Snapshot};
use billfold::models::Transaction;
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(date: &str, amount: i64, desc: &str, cat: &str, expense: bool) -> Transaction {
    Transaction::new(d(date), Decimal::from(amount), desc, cat, expense)
}

fn scenario() -> Vec<Transaction> {
    vec![
        tx("2025-05-03", 40, "Lunch", "Food", true),
        tx("2025-05-04", 10, "Coffee", "Food", true),
        tx("2025-05-25", 3000, "Pay", "Salary", false),
    ]
}

struct Echo;

impl Generator for Echo {
    fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        Ok(prompt.to_string())
    }
}

struct Failing;

impl Generator for Failing {
    fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        anyhow::bail!("connection refused")
    }
}

#[test]
fn brief_carries_scope_totals_and_breakdown() {
    let snapshot = Snapshot::over(&scenario(), "current financial month");
    let text = assistant::brief(&snapshot, "USD");

    assert!(text.contains("Scope: current financial month"));
    assert!(text.contains("Income: USD 3000"));
    assert!(text.contains("Expenses: USD 50"));
    assert!(text.contains("Net: USD 2950"));
    assert!(text.contains("- Food: USD 50 (100.0%)"));
}

#[test]
fn brief_for_an_empty_scope_reports_no_spending() {
    let snapshot = Snapshot::over(&[], "all time");
    let text = assistant::brief(&snapshot, "USD");
    assert!(text.contains("Scope: all time"));
    assert!(text.contains("Net: USD 0"));
    assert!(text.contains("Spending by category: none recorded"));
}

#[test]
fn prompt_stacks_scopes_then_question_then_instruction() {
    let txs = scenario();
    let snapshots = [
        Snapshot::over(&txs, "current financial month"),
        Snapshot::over(&txs, "all time"),
    ];
    let prompt = assistant::compose_prompt(&snapshots, "USD", "Where does my money go?");

    let month_at = prompt.find("Scope: current financial month").unwrap();
    let all_at = prompt.find("Scope: all time").unwrap();
    let question_at = prompt.find("Question: Where does my money go?").unwrap();
    assert!(month_at < all_at);
    assert!(all_at < question_at);
    assert!(prompt.ends_with("do not invent numbers."));
}

#[test]
fn ask_returns_the_generator_reply_unchanged() {
    let snapshots = [Snapshot::over(&scenario(), "all time")];
    let reply = assistant::ask(&Echo, &snapshots, "USD", "How much did I spend?");
    assert!(reply.contains("Question: How much did I spend?"));
}

#[test]
fn ask_never_raises_on_a_failing_collaborator() {
    let snapshots = [Snapshot::over(&scenario(), "all time")];
    let reply = assistant::ask(&Failing, &snapshots, "USD", "Anything?");
    assert_eq!(reply, FAILURE_REPLY);
}
