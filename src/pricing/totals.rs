use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BillingError;
use crate::pricing::line::Billable;

/// Document-level totals derived from its lines and discount
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub subtotal: f64,
    pub vat_amount: f64,
    pub discount: f64,
    pub total_amount: f64,
}

/// Totals reconciled against what has been paid so far
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Settlement {
    pub total_amount: f64,
    pub paid_amount: f64,
    pub due_amount: f64,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Due,
    Partial,
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Due => write!(f, "DUE"),
            PaymentStatus::Partial => write!(f, "PARTIAL"),
            PaymentStatus::Paid => write!(f, "PAID"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "paid" => Ok(PaymentStatus::Paid),
            "partial" => Ok(PaymentStatus::Partial),
            "due" | "unpaid" => Ok(PaymentStatus::Due),
            _ => Err(BillingError::InvalidStatus(s.to_string())),
        }
    }
}

/// Sum every line's own price and apply a flat discount.
///
/// The total is not floored at zero: a discount larger than the pre-discount
/// total produces a negative `total_amount`.
pub fn aggregate<L: Billable>(lines: &[L], discount: f64) -> Totals {
    let (subtotal, vat_amount) = lines
        .iter()
        .map(|line| line.price())
        .fold((0.0, 0.0), |(amount, vat), price| {
            (amount + price.amount, vat + price.vat_amount)
        });

    Totals {
        subtotal,
        vat_amount,
        discount,
        total_amount: subtotal + vat_amount - discount,
    }
}

/// Paid once nothing is left due, partial once anything was paid, due otherwise
pub fn derive_payment_status(total_amount: f64, paid_amount: f64) -> PaymentStatus {
    let due_amount = total_amount - paid_amount;

    if due_amount <= 0.0 {
        PaymentStatus::Paid
    } else if paid_amount > 0.0 {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Due
    }
}

impl Totals {
    pub fn settle(&self, paid_amount: f64) -> Settlement {
        Settlement {
            total_amount: self.total_amount,
            paid_amount,
            due_amount: self.total_amount - paid_amount,
            status: derive_payment_status(self.total_amount, paid_amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::line::LineItem;

    fn flat(rate: f64, quantity: f64, vat_percent: f64) -> LineItem {
        LineItem {
            item_id: None,
            description: "Bandwidth".to_string(),
            unit: "Mbps".to_string(),
            quantity,
            rate,
            vat_percent,
            from_date: None,
            to_date: None,
        }
    }

    #[test]
    fn test_two_line_invoice_with_discount() {
        let lines = vec![flat(1000.0, 2.0, 0.0), flat(500.0, 1.0, 10.0)];
        let totals = aggregate(&lines, 100.0);

        assert_eq!(totals.subtotal, 2500.0);
        assert_eq!(totals.vat_amount, 50.0);
        assert_eq!(totals.discount, 100.0);
        assert_eq!(totals.total_amount, 2450.0);

        assert_eq!(totals.settle(2450.0).status, PaymentStatus::Paid);
        assert_eq!(totals.settle(1000.0).status, PaymentStatus::Partial);
        assert_eq!(totals.settle(1000.0).due_amount, 1450.0);
        assert_eq!(totals.settle(0.0).status, PaymentStatus::Due);
    }

    #[test]
    fn test_empty_lines() {
        let lines: Vec<LineItem> = Vec::new();
        let totals = aggregate(&lines, 0.0);
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn test_discount_can_drive_total_negative() {
        let totals = aggregate(&[flat(100.0, 1.0, 0.0)], 150.0);
        assert_eq!(totals.total_amount, -50.0);
        // Nothing is owed on a negative document
        assert_eq!(totals.settle(0.0).status, PaymentStatus::Paid);
    }

    #[test]
    fn test_status_boundaries() {
        assert_eq!(derive_payment_status(100.0, 100.0), PaymentStatus::Paid);
        assert_eq!(derive_payment_status(100.0, 120.0), PaymentStatus::Paid);
        assert_eq!(derive_payment_status(100.0, 99.99), PaymentStatus::Partial);
        assert_eq!(derive_payment_status(100.0, 0.0), PaymentStatus::Due);
    }

    #[test]
    fn test_status_regresses_when_paid_amount_drops() {
        let totals = aggregate(&[flat(300.0, 1.0, 0.0)], 0.0);
        assert_eq!(totals.settle(300.0).status, PaymentStatus::Paid);
        assert_eq!(totals.settle(100.0).status, PaymentStatus::Partial);
        assert_eq!(totals.settle(0.0).status, PaymentStatus::Due);
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert_eq!("PARTIAL".parse::<PaymentStatus>().unwrap(), PaymentStatus::Partial);
        assert_eq!("unpaid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Due);
        assert!("settled".parse::<PaymentStatus>().is_err());

        assert_eq!(PaymentStatus::Due.to_string(), "DUE");
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Partial).unwrap(),
            "\"partial\""
        );
    }
}
