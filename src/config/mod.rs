mod company;
mod item;
mod party;
pub mod state;

pub use company::{BillingSettings, Company, Config};
pub use item::CatalogItem;
pub use party::Party;
pub use state::{
    document_year, Counter, Counters, DocumentEntry, DocumentKind, Payment, State,
};

use crate::error::{BillingError, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG config dir, or ~/.ispbill/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "ispbill") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.ispbill/
    let home = std::env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
        BillingError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".ispbill"))
}

/// Fail early with a hint to run `init` when the directory is missing
pub fn ensure_initialized(config_dir: &Path) -> Result<()> {
    if config_dir.exists() {
        Ok(())
    } else {
        Err(BillingError::ConfigNotFound(config_dir.to_path_buf()))
    }
}

fn load_toml<T: DeserializeOwned>(path: PathBuf) -> Result<T> {
    if !path.exists() {
        return Err(BillingError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| BillingError::ConfigParse { path, source: e })
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    load_toml(config_dir.join("config.toml"))
}

/// Load clients.toml as a HashMap
pub fn load_clients(config_dir: &Path) -> Result<HashMap<String, Party>> {
    load_toml(config_dir.join("clients.toml"))
}

/// Load providers.toml as a HashMap
pub fn load_providers(config_dir: &Path) -> Result<HashMap<String, Party>> {
    load_toml(config_dir.join("providers.toml"))
}

/// Load the parties a document of `kind` may be addressed to
pub fn load_parties(config_dir: &Path, kind: DocumentKind) -> Result<HashMap<String, Party>> {
    match kind {
        DocumentKind::Invoice => load_clients(config_dir),
        DocumentKind::Bill => load_providers(config_dir),
    }
}

/// Load items.toml as a HashMap
pub fn load_items(config_dir: &Path) -> Result<HashMap<String, CatalogItem>> {
    load_toml(config_dir.join("items.toml"))
}

/// Load state.toml (creates default if missing)
pub fn load_state(config_dir: &Path) -> Result<State> {
    let path = config_dir.join("state.toml");
    if !path.exists() {
        return Ok(State::default());
    }
    load_toml(path)
}

/// Save state.toml
pub fn save_state(config_dir: &Path, state: &State) -> Result<()> {
    let content = toml::to_string_pretty(state)?;
    fs::write(config_dir.join("state.toml"), content)?;
    tracing::debug!(documents = state.history.len(), "state saved");
    Ok(())
}

/// Write the template files into a fresh config directory
pub fn init_config_dir(config_dir: &Path) -> Result<()> {
    if config_dir.exists() {
        return Err(BillingError::AlreadyInitialized(config_dir.to_path_buf()));
    }

    fs::create_dir_all(config_dir)?;
    fs::write(config_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(config_dir.join("clients.toml"), CLIENTS_TEMPLATE)?;
    fs::write(config_dir.join("providers.toml"), PROVIDERS_TEMPLATE)?;
    fs::write(config_dir.join("items.toml"), ITEMS_TEMPLATE)?;

    tracing::info!(path = %config_dir.display(), "initialized config directory");
    Ok(())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[company]
name = "Your ISP Name"
address = "12 Network Road"
city = "Dhaka"
country = "Bangladesh"
email = "billing@your-isp.net"
# phone = "+880-1700-000000"   # optional
# tax_id = "BIN-000000000"     # optional

[billing]
invoice_number_format = "INV-{year}-{seq:04}"  # e.g., INV-2026-0001
bill_number_format = "BILL-{year}-{seq:04}"    # e.g., BILL-2026-0001
currency = "BDT"
currency_symbol = "Tk "
due_days = 15
default_vat_percent = 5.0  # used when an item sets no vat_percent
"#;

/// Template content for clients.toml
pub const CLIENTS_TEMPLATE: &str = r#"# Clients receive sales invoices. The table name (e.g., [acme]) is used
# as the client identifier in the invoice command.
#
# Example:
#   ispbill invoice --client acme --item fiber-100:1

[example-client]
name = "Example Client Ltd."
contact = "Jane Smith"          # optional
email = "jane@example.com"
address = "45 Client Avenue"
city = "Chattogram"
# country = "Bangladesh"        # optional
"#;

/// Template content for providers.toml
pub const PROVIDERS_TEMPLATE: &str = r#"# Upstream providers bill the tenant for bandwidth. The table name is
# used as the provider identifier in the bill command.
#
# Example:
#   ispbill bill --provider example-upstream --item ip-transit:500

[example-upstream]
name = "Example Upstream IIG"
email = "noc@upstream.example"
address = "1 Gateway Tower"
city = "Dhaka"
"#;

/// Template content for items.toml
pub const ITEMS_TEMPLATE: &str = r#"# Billable catalog items. Rates are monthly; a line given a date range
# (item:qty:from:to) is pro-rated by day over the month it starts in.
#
# Example:
#   ispbill invoice --client example-client --item fiber-100:1:2026-01-01:2026-01-15

[fiber-100]
description = "Fiber Internet 100 Mbps"
rate = 3000.00
unit = "month"

[ip-transit]
description = "IP Transit Bandwidth"
rate = 350.00
unit = "Mbps"
vat_percent = 10.0

[installation]
description = "Installation & Setup"
rate = 1500.00
unit = "flat"
vat_percent = 0.0
"#;
