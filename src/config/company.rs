use serde::{Deserialize, Serialize};

use super::state::DocumentKind;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub company: Company,
    pub billing: BillingSettings,
}

/// The tenant operating this back office
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Company {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BillingSettings {
    pub invoice_number_format: String,
    pub bill_number_format: String,
    pub currency: String,
    pub currency_symbol: String,
    pub due_days: u32,
    #[serde(default)]
    pub default_vat_percent: f64,
}

impl BillingSettings {
    pub fn number_format(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Invoice => &self.invoice_number_format,
            DocumentKind::Bill => &self.bill_number_format,
        }
    }
}
