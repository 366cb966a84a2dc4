use chrono::NaiveDate;

use crate::config::{DocumentEntry, Payment};
use crate::error::{BillingError, Result};
use crate::pricing::PaymentStatus;

/// Float noise ignored when comparing a payment to the payable amount
const EPSILON: f64 = 1e-9;

/// Largest payment accepted against `outstanding`: the balance rounded up
/// to the next whole cent, so pro-rata totals with fractional cents can be
/// settled with money amounts.
fn max_payable(outstanding: f64) -> f64 {
    if outstanding <= 0.0 {
        return 0.0;
    }
    (outstanding * 100.0 - EPSILON).ceil() / 100.0
}

/// Record a payment against a document.
///
/// Payments must be positive and may not exceed what is still outstanding,
/// rounded up to the cent.
pub fn record_payment(entry: &mut DocumentEntry, amount: f64, date: NaiveDate) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(BillingError::InvalidPaymentAmount);
    }

    let max = max_payable(entry.outstanding());
    if amount > max + EPSILON {
        return Err(BillingError::OverPayment {
            document: entry.number.clone(),
            max,
        });
    }

    entry.payments.push(Payment { amount, date });

    tracing::info!(
        document = %entry.number,
        amount,
        outstanding = entry.outstanding(),
        status = %entry.status(),
        "payment recorded"
    );
    Ok(())
}

/// Remove a payment (1-based index, default last).
///
/// A paid document may drop back to partial or due; that is allowed and logged.
pub fn remove_payment(entry: &mut DocumentEntry, index: Option<usize>) -> Result<Payment> {
    if entry.payments.is_empty() {
        return Err(BillingError::NoPayments(entry.number.clone()));
    }

    let remove_idx = match index {
        Some(i) => {
            if i == 0 || i > entry.payments.len() {
                return Err(BillingError::InvalidPaymentIndex {
                    document: entry.number.clone(),
                    index: i,
                    count: entry.payments.len(),
                });
            }
            i - 1
        }
        None => entry.payments.len() - 1,
    };

    let previous_status = entry.status();
    let removed = entry.payments.remove(remove_idx);

    if previous_status == PaymentStatus::Paid && entry.status() != PaymentStatus::Paid {
        tracing::warn!(
            document = %entry.number,
            status = %entry.status(),
            "removing payment reopened a paid document"
        );
    }
    tracing::info!(document = %entry.number, amount = removed.amount, "payment removed");

    Ok(removed)
}
