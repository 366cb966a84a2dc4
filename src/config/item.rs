use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogItem {
    pub description: String,
    pub rate: f64,
    pub unit: String,
    /// Falls back to `billing.default_vat_percent` when absent
    #[serde(default)]
    pub vat_percent: Option<f64>,
}
