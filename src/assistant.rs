// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt::Write as _;
use std::time::Duration;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use crate::aggregate::{self, CategoryTotal};
use crate::models::{Settings, Transaction};

const UA: &str = concat!(
    "billfold/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/billfold)"
);

const CLOSING_INSTRUCTION: &str =
    "Answer briefly and concretely using only the figures above; do not invent numbers.";

/// Returned in place of a reply when the generation collaborator fails or
/// times out; the underlying error goes to the log.
pub const FAILURE_REPLY: &str =
    "The assistant could not produce an answer right now. Please try again later.";

/// Aggregates for one reporting scope, ready for templating.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub scope: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
    pub breakdown: Vec<CategoryTotal>,
}

impl Snapshot {
    pub fn over(transactions: &[Transaction], scope: &str) -> Self {
        Self {
            scope: scope.to_string(),
            income: aggregate::total_income(transactions),
            expense: aggregate::total_expense(transactions),
            net: aggregate::net_amount(transactions),
            breakdown: aggregate::group_by_category(transactions, true),
        }
    }
}

/// Fixed-template brief for one scope. The same shape serves every scope;
/// only the label and the figures vary.
pub fn brief(snapshot: &Snapshot, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Scope: {}", snapshot.scope);
    let _ = writeln!(out, "Income: {} {}", currency, snapshot.income.round_dp(2));
    let _ = writeln!(out, "Expenses: {} {}", currency, snapshot.expense.round_dp(2));
    let _ = writeln!(out, "Net: {} {}", currency, snapshot.net.round_dp(2));
    if snapshot.breakdown.is_empty() {
        let _ = writeln!(out, "Spending by category: none recorded");
    } else {
        let _ = writeln!(out, "Spending by category:");
        for entry in &snapshot.breakdown {
            let _ = writeln!(
                out,
                "- {}: {} {} ({:.1}%)",
                entry.category,
                currency,
                entry.amount.round_dp(2),
                entry.percent
            );
        }
    }
    out
}

/// Briefs for every scope, then the user's question, then the closing
/// instruction. Pure formatting; no transport concerns.
pub fn compose_prompt(snapshots: &[Snapshot], currency: &str, question: &str) -> String {
    let mut out = String::from("You are a personal finance assistant. Financial summary:\n\n");
    for snapshot in snapshots {
        out.push_str(&brief(snapshot, currency));
        out.push('\n');
    }
    let _ = writeln!(out, "Question: {}", question);
    out.push_str(CLOSING_INSTRUCTION);
    out
}

/// The external generation collaborator: one prompt string in, one reply
/// string out. Transport, model choice, and timeouts live behind this seam.
pub trait Generator {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Composes the prompt, hands it to `generator`, and returns the reply
/// unchanged. Never raises: any failure collapses to [`FAILURE_REPLY`].
pub fn ask(
    generator: &dyn Generator,
    snapshots: &[Snapshot],
    currency: &str,
    question: &str,
) -> String {
    let prompt = compose_prompt(snapshots, currency, question);
    match generator.generate(&prompt) {
        Ok(reply) => reply,
        Err(err) => {
            warn!(err = %err, "assistant generation failed");
            FAILURE_REPLY.to_string()
        }
    }
}

/// Blocking HTTP generator against an Ollama-style `/api/generate`
/// endpoint, with a bounded request timeout.
pub struct HttpGenerator {
    endpoint: String,
    model: String,
    timeout: Duration,
}

impl HttpGenerator {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            endpoint: settings.assistant_endpoint.clone(),
            model: settings.assistant_model.clone(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Deserialize)]
struct GenerateReply {
    response: String,
}

impl Generator for HttpGenerator {
    fn generate(&self, prompt: &str) -> Result<String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(UA)
            .build()?;
        let resp = client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
            }))
            .send()?
            .error_for_status()?;
        let body: GenerateReply = resp.json().context("Malformed generation response")?;
        Ok(body.response)
    }
}
