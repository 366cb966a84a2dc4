pub mod config;
pub mod document;
pub mod error;
pub mod pricing;

pub use config::{CatalogItem, Config, DocumentEntry, DocumentKind, Party, Payment, State};
pub use document::{create_document, edit_document, DocumentRequest, DocumentView};
pub use error::{BillingError, Result};
pub use pricing::{
    aggregate, derive_payment_status, price_line, Billable, BillingPeriod, LineItem, LinePrice,
    PaymentStatus, Settlement, Totals,
};
