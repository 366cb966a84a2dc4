use serde::{Deserialize, Serialize};

/// A counterparty: a client receiving sales invoices or a provider sending bills
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Party {
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub country: Option<String>,
}
