use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{DocumentEntry, DocumentKind, State};
use crate::pricing::PaymentStatus;

/// Which documents a statement covers
#[derive(Debug, Default, Clone)]
pub struct StatementFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<PaymentStatus>,
}

impl StatementFilter {
    fn matches(&self, entry: &DocumentEntry) -> bool {
        self.from.map_or(true, |d| entry.date >= d)
            && self.to.map_or(true, |d| entry.date <= d)
            && self.status.map_or(true, |s| entry.status() == s)
    }
}

/// A single payment line item for display in statement detail rows
#[derive(Debug, Serialize)]
pub struct StatementPayment {
    pub amount: f64,
    pub date: NaiveDate,
}

/// A single row in the statement table
#[derive(Debug, Serialize)]
pub struct StatementRow {
    pub number: String,
    pub date: NaiveDate,
    pub total: f64,
    pub paid: f64,
    pub outstanding: f64,
    pub payments: Vec<StatementPayment>,
    pub status: PaymentStatus,
}

/// Account statement for one client or provider
#[derive(Debug, Serialize)]
pub struct Statement {
    pub kind: DocumentKind,
    pub party: String,
    pub rows: Vec<StatementRow>,
    pub total: f64,
    pub paid: f64,
    pub outstanding: f64,
}

pub fn build_statement(
    state: &State,
    kind: DocumentKind,
    party: &str,
    filter: &StatementFilter,
) -> Statement {
    let rows: Vec<StatementRow> = state
        .history
        .iter()
        .filter(|e| e.kind == kind && e.party == party)
        .filter(|e| filter.matches(e))
        .map(|e| StatementRow {
            number: e.number.clone(),
            date: e.date,
            total: e.total,
            paid: e.paid_amount(),
            outstanding: e.outstanding(),
            payments: e
                .payments
                .iter()
                .map(|p| StatementPayment {
                    amount: p.amount,
                    date: p.date,
                })
                .collect(),
            status: e.status(),
        })
        .collect();

    let total: f64 = rows.iter().map(|r| r.total).sum();
    let paid: f64 = rows.iter().map(|r| r.paid).sum();

    Statement {
        kind,
        party: party.to_string(),
        rows,
        total,
        paid,
        outstanding: total - paid,
    }
}
