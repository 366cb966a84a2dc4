//! Line pricing and invoice aggregation.
//!
//! Everything here is pure: callers hand in a snapshot of lines and get
//! derived numbers back.

mod line;
mod totals;

pub use line::{days_count, days_in_month, price_line, Billable, BillingPeriod, LineItem, LinePrice};
pub use totals::{aggregate, derive_payment_status, PaymentStatus, Settlement, Totals};
