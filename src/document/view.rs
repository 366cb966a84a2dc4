use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{DocumentEntry, DocumentKind, Payment};
use crate::pricing::{Billable, LineItem, LinePrice, Settlement, Totals};

/// A stored line together with its derived price
#[derive(Debug, Serialize)]
pub struct PricedLine<'a> {
    #[serde(flatten)]
    pub line: &'a LineItem,
    /// Days billed when the line is pro-rated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(flatten)]
    pub price: LinePrice,
}

/// Full breakdown of a document for printing or export.
///
/// Line prices are derived fresh from the stored lines; `totals` is the
/// snapshot taken when the document was priced.
#[derive(Debug, Serialize)]
pub struct DocumentView<'a> {
    pub number: &'a str,
    pub kind: DocumentKind,
    pub party: &'a str,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub lines: Vec<PricedLine<'a>>,
    pub totals: Totals,
    pub settlement: Settlement,
    pub payments: &'a [Payment],
}

impl<'a> DocumentView<'a> {
    pub fn new(entry: &'a DocumentEntry, due_days: u32) -> Self {
        let due_date = entry
            .date
            .checked_add_signed(chrono::Duration::days(i64::from(due_days)))
            .unwrap_or(entry.date);

        Self {
            number: &entry.number,
            kind: entry.kind,
            party: &entry.party,
            date: entry.date,
            due_date,
            lines: entry
                .lines
                .iter()
                .map(|line| PricedLine {
                    line,
                    days: line.period().map(|p| p.days()),
                    price: line.price(),
                })
                .collect(),
            totals: entry.totals(),
            settlement: entry.settlement(),
            payments: &entry.payments,
        }
    }
}
