use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Config directory not found at {0}. Run 'ispbill init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write state file: {0}")]
    StateWrite(#[from] toml::ser::Error),

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Client '{0}' not found in clients.toml")]
    ClientNotFound(String),

    #[error("Provider '{0}' not found in providers.toml")]
    ProviderNotFound(String),

    #[error("Item '{0}' not found in items.toml")]
    ItemNotFound(String),

    #[error("Invalid quantity '{qty}' for '{item}': {reason}")]
    InvalidQuantity {
        item: String,
        qty: String,
        reason: String,
    },

    #[error("Invalid rate '{rate}' for '{item}': must be a non-negative number")]
    InvalidRate { item: String, rate: String },

    #[error("Invalid item format '{0}'. Expected 'item:quantity[:from:to]' (e.g., 'fiber-100:1:2024-01-01:2024-01-15')")]
    InvalidItemFormat(String),

    #[error("Invalid line format '{0}'. Expected 'description:rate:quantity[:from:to]'")]
    InvalidLineFormat(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid line '{line}': {reason}")]
    InvalidLine { line: String, reason: String },

    #[error("Invalid discount {0}: must be a non-negative number")]
    InvalidDiscount(f64),

    #[error("Invalid document kind '{0}'. Use 'invoice' or 'bill'.")]
    InvalidKind(String),

    #[error("Invalid status '{0}'. Use 'paid', 'partial' or 'due'.")]
    InvalidStatus(String),

    #[error("No items specified. Use --item <id>:<quantity> or --line <description>:<rate>:<quantity>.")]
    NoItems,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document '{0}' not found in history")]
    DocumentNotFound(String),

    #[error("Document number {0} is already in use")]
    DuplicateDocumentNumber(String),

    #[error("Invalid document index '{0}'. Use 'ispbill list' to see available documents.")]
    InvalidDocumentIndex(String),

    #[error("Payment would exceed document total (max {max:.2} remaining)")]
    OverPayment { document: String, max: f64 },

    #[error("No payments recorded for {0}")]
    NoPayments(String),

    #[error("Invalid payment index {index} for {document} (only {count} payment(s) recorded)")]
    InvalidPaymentIndex {
        document: String,
        index: usize,
        count: usize,
    },

    #[error("Payment amount must be greater than zero")]
    InvalidPaymentAmount,

    #[error("Failed to encode document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BillingError>;
