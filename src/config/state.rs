use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BillingError;
use crate::pricing::{derive_payment_status, LineItem, PaymentStatus, Settlement, Totals};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct State {
    #[serde(default)]
    pub counters: Counters,
    #[serde(default)]
    pub history: Vec<DocumentEntry>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Counters {
    #[serde(default)]
    pub invoice: Counter,
    #[serde(default)]
    pub bill: Counter,
}

impl Counters {
    pub fn get(&self, kind: DocumentKind) -> &Counter {
        match kind {
            DocumentKind::Invoice => &self.invoice,
            DocumentKind::Bill => &self.bill,
        }
    }

    pub fn get_mut(&mut self, kind: DocumentKind) -> &mut Counter {
        match kind {
            DocumentKind::Invoice => &mut self.invoice,
            DocumentKind::Bill => &mut self.bill,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Counter {
    pub last_number: u32,
    pub last_year: u32,
}

impl Default for Counter {
    fn default() -> Self {
        Self {
            last_number: 0,
            last_year: u32::try_from(chrono::Utc::now().year()).unwrap_or_default(),
        }
    }
}

impl Counter {
    /// Sequence the next document dated in `year` would get
    pub fn next_seq(&self, year: u32) -> u32 {
        if self.last_year == year {
            self.last_number + 1
        } else {
            1 // Reset for new year
        }
    }

    /// Move the counter forward; back-dated documents never rewind it
    pub fn advance(&mut self, year: u32, seq: u32) {
        if year > self.last_year {
            self.last_year = year;
            self.last_number = seq;
        } else if year == self.last_year {
            self.last_number = self.last_number.max(seq);
        }
    }
}

/// Calendar year used in document numbers
pub fn document_year(date: NaiveDate) -> Result<u32, BillingError> {
    u32::try_from(date.year()).map_err(|_| BillingError::InvalidDate(date.to_string()))
}

/// Purchase bills come from providers, sales invoices go to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Invoice,
    Bill,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Invoice => write!(f, "invoice"),
            DocumentKind::Bill => write!(f, "bill"),
        }
    }
}

impl FromStr for DocumentKind {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "invoice" | "invoices" => Ok(DocumentKind::Invoice),
            "bill" | "bills" => Ok(DocumentKind::Bill),
            _ => Err(BillingError::InvalidKind(s.to_string())),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Payment {
    pub amount: f64,
    pub date: NaiveDate,
}

/// A stored bill or invoice with the totals computed when it was priced
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DocumentEntry {
    pub number: String,
    pub kind: DocumentKind,
    /// Client id for invoices, provider id for bills
    pub party: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub discount: f64,
    pub subtotal: f64,
    pub vat_amount: f64,
    pub total: f64,
    #[serde(default)]
    pub lines: Vec<LineItem>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl State {
    /// Sequence for the next `kind` document dated in `year`.
    ///
    /// Past both the counter and every document of that kind already dated
    /// in `year`, so back-dating into an earlier year cannot reuse a number.
    pub fn next_seq(&self, kind: DocumentKind, year: u32) -> u32 {
        let issued = self
            .history
            .iter()
            .filter(|e| e.kind == kind && document_year(e.date).ok() == Some(year))
            .count();
        let issued = u32::try_from(issued).unwrap_or(u32::MAX);

        self.counters
            .get(kind)
            .next_seq(year)
            .max(issued.saturating_add(1))
    }

    pub fn has_document(&self, number: &str) -> bool {
        self.history.iter().any(|e| e.number == number)
    }
}

impl DocumentEntry {
    pub fn paid_amount(&self) -> f64 {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Negative when a discount pushed the total below zero
    pub fn outstanding(&self) -> f64 {
        self.total - self.paid_amount()
    }

    pub fn status(&self) -> PaymentStatus {
        derive_payment_status(self.total, self.paid_amount())
    }

    pub fn totals(&self) -> Totals {
        Totals {
            subtotal: self.subtotal,
            vat_amount: self.vat_amount,
            discount: self.discount,
            total_amount: self.total,
        }
    }

    pub fn settlement(&self) -> Settlement {
        self.totals().settle(self.paid_amount())
    }

    pub(crate) fn apply_totals(&mut self, totals: &Totals) {
        self.subtotal = totals.subtotal;
        self.vat_amount = totals.vat_amount;
        self.discount = totals.discount;
        self.total = totals.total_amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(number: &str, kind: DocumentKind, date: NaiveDate) -> DocumentEntry {
        DocumentEntry {
            number: number.to_string(),
            kind,
            party: "example-client".to_string(),
            date,
            discount: 0.0,
            subtotal: 100.0,
            vat_amount: 0.0,
            total: 100.0,
            lines: Vec::new(),
            payments: Vec::new(),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_counter_resets_for_new_year() {
        let counter = Counter {
            last_number: 7,
            last_year: 2025,
        };
        assert_eq!(counter.next_seq(2025), 8);
        assert_eq!(counter.next_seq(2026), 1);
    }

    #[test]
    fn test_counter_advance_ignores_earlier_year() {
        let mut counter = Counter {
            last_number: 1,
            last_year: 2026,
        };
        counter.advance(2025, 2);
        assert_eq!((counter.last_year, counter.last_number), (2026, 1));

        counter.advance(2026, 2);
        assert_eq!((counter.last_year, counter.last_number), (2026, 2));

        counter.advance(2027, 1);
        assert_eq!((counter.last_year, counter.last_number), (2027, 1));
    }

    #[test]
    fn test_next_seq_counts_back_dated_history() {
        let mut state = State::default();
        state.counters.invoice = Counter {
            last_number: 1,
            last_year: 2026,
        };
        state.history.push(entry("INV-2025-0001", DocumentKind::Invoice, ymd(2025, 12, 30)));
        state.history.push(entry("INV-2026-0001", DocumentKind::Invoice, ymd(2026, 1, 2)));
        state.history.push(entry("BILL-2025-0001", DocumentKind::Bill, ymd(2025, 6, 1)));

        assert_eq!(state.next_seq(DocumentKind::Invoice, 2025), 2);
        assert_eq!(state.next_seq(DocumentKind::Invoice, 2026), 2);
        assert_eq!(state.next_seq(DocumentKind::Invoice, 2024), 1);
        assert!(state.has_document("INV-2025-0001"));
        assert!(!state.has_document("INV-2025-0002"));
    }

    #[test]
    fn test_document_year_rejects_negative_years() {
        assert_eq!(document_year(ymd(2026, 3, 1)).unwrap(), 2026);
        assert!(matches!(
            document_year(ymd(-5, 1, 1)),
            Err(BillingError::InvalidDate(_))
        ));
    }
}
