use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use std::path::Path;

use crate::config::{
    document_year, load_config, load_items, load_parties, load_state, save_state, CatalogItem,
    DocumentEntry, DocumentKind, State,
};
use crate::error::{BillingError, Result};
use crate::pricing::{aggregate, Billable, LineItem, Totals};

/// Unit label for free-text lines
const CUSTOM_LINE_UNIT: &str = "unit";

/// Everything needed to price and record a new bill or invoice
#[derive(Debug)]
pub struct DocumentRequest<'a> {
    pub kind: DocumentKind,
    /// Client id for invoices, provider id for bills
    pub party: &'a str,
    /// Catalog lines: `item:quantity[:from:to]`
    pub items: &'a [String],
    /// Free-text lines: `description:rate:quantity[:from:to]`
    pub lines: &'a [String],
    pub discount: f64,
    pub date: Option<NaiveDate>,
    /// Price without numbering or saving
    pub dry_run: bool,
}

/// A parsed `item:quantity[:from:to]` argument
#[derive(Debug, PartialEq)]
struct ItemInput<'a> {
    item_id: &'a str,
    quantity: f64,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
}

/// Parse a `YYYY-MM-DD` argument
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| BillingError::InvalidDate(input.to_string()))
}

fn parse_quantity(label: &str, qty_str: &str) -> Result<f64> {
    let quantity: f64 = qty_str
        .trim()
        .parse()
        .map_err(|_| BillingError::InvalidQuantity {
            item: label.to_string(),
            qty: qty_str.to_string(),
            reason: "must be a number".to_string(),
        })?;

    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(BillingError::InvalidQuantity {
            item: label.to_string(),
            qty: qty_str.to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok(quantity)
}

fn parse_dates(parts: &[&str]) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    match parts {
        [from, to] => Ok((Some(parse_date(from)?), Some(parse_date(to)?))),
        _ => Ok((None, None)),
    }
}

/// Parse item input like "fiber-100:1" or "fiber-100:1:2024-01-01:2024-01-15"
fn parse_item_input(input: &str) -> Result<ItemInput<'_>> {
    let parts: Vec<&str> = input.split(':').collect();
    if parts.len() != 2 && parts.len() != 4 {
        return Err(BillingError::InvalidItemFormat(input.to_string()));
    }

    let item_id = parts[0];
    let quantity = parse_quantity(item_id, parts[1])?;
    let (from_date, to_date) = parse_dates(&parts[2..])?;

    Ok(ItemInput {
        item_id,
        quantity,
        from_date,
        to_date,
    })
}

/// Parse a free-text line like "Static IP:500:2" (no catalog reference)
fn parse_custom_line(input: &str, vat_percent: f64) -> Result<LineItem> {
    let parts: Vec<&str> = input.split(':').collect();
    if parts.len() != 3 && parts.len() != 5 {
        return Err(BillingError::InvalidLineFormat(input.to_string()));
    }

    let description = parts[0].trim();
    if description.is_empty() {
        return Err(BillingError::InvalidLineFormat(input.to_string()));
    }

    let rate: f64 = parts[1]
        .trim()
        .parse()
        .map_err(|_| BillingError::InvalidRate {
            item: description.to_string(),
            rate: parts[1].to_string(),
        })?;
    let quantity = parse_quantity(description, parts[2])?;
    let (from_date, to_date) = parse_dates(&parts[3..])?;

    Ok(LineItem {
        item_id: None,
        description: description.to_string(),
        unit: CUSTOM_LINE_UNIT.to_string(),
        quantity,
        rate,
        vat_percent,
        from_date,
        to_date,
    })
}

/// Turn command-line line arguments into validated line items
pub fn build_lines(
    catalog: &HashMap<String, CatalogItem>,
    items: &[String],
    custom: &[String],
    default_vat_percent: f64,
) -> Result<Vec<LineItem>> {
    if items.is_empty() && custom.is_empty() {
        return Err(BillingError::NoItems);
    }

    let mut lines = Vec::with_capacity(items.len() + custom.len());

    for input in items {
        let parsed = parse_item_input(input)?;
        let item = catalog
            .get(parsed.item_id)
            .ok_or_else(|| BillingError::ItemNotFound(parsed.item_id.to_string()))?;

        lines.push(LineItem {
            item_id: Some(parsed.item_id.to_string()),
            description: item.description.clone(),
            unit: item.unit.clone(),
            quantity: parsed.quantity,
            rate: item.rate,
            vat_percent: item.vat_percent.unwrap_or(default_vat_percent),
            from_date: parsed.from_date,
            to_date: parsed.to_date,
        });
    }

    for input in custom {
        lines.push(parse_custom_line(input, default_vat_percent)?);
    }

    for line in &lines {
        line.validate()?;
    }

    Ok(lines)
}

fn validate_discount(discount: f64) -> Result<()> {
    if discount.is_finite() && discount >= 0.0 {
        Ok(())
    } else {
        Err(BillingError::InvalidDiscount(discount))
    }
}

/// Aggregate lines, logging the cases that price surprisingly
fn price_lines(number: &str, lines: &[LineItem], discount: f64) -> Totals {
    for line in lines.iter().filter(|line| line.falls_back_to_flat()) {
        tracing::warn!(
            document = number,
            line = line.label(),
            from = ?line.from_date,
            to = ?line.to_date,
            "date range is incomplete or reversed, pricing line flat"
        );
    }

    let totals = aggregate(lines, discount);

    if totals.total_amount < 0.0 {
        tracing::warn!(
            document = number,
            total = totals.total_amount,
            discount,
            "discount exceeds document total, total is negative"
        );
    }

    totals
}

/// Format document number from template
pub fn format_document_number(format: &str, year: u32, seq: u32) -> String {
    format
        .replace("{year}", &year.to_string())
        .replace("{seq:04}", &format!("{:04}", seq))
        .replace("{seq:05}", &format!("{:05}", seq))
        .replace("{seq:03}", &format!("{:03}", seq))
}

/// Resolve a document reference to the actual document number.
/// Accepts either an index (1-based, newest first) from 'list' or the full number.
pub fn resolve_document_number(state: &State, reference: &str) -> Result<String> {
    if let Ok(idx) = reference.parse::<usize>() {
        if idx == 0 || idx > state.history.len() {
            return Err(BillingError::InvalidDocumentIndex(reference.to_string()));
        }
        return Ok(state.history[state.history.len() - idx].number.clone());
    }

    if state.history.iter().any(|e| e.number == reference) {
        Ok(reference.to_string())
    } else {
        Err(BillingError::DocumentNotFound(reference.to_string()))
    }
}

/// Look up a stored document by number
pub fn find_document<'a>(state: &'a State, number: &str) -> Result<&'a DocumentEntry> {
    state
        .history
        .iter()
        .find(|e| e.number == number)
        .ok_or_else(|| BillingError::DocumentNotFound(number.to_string()))
}

pub fn find_document_mut<'a>(state: &'a mut State, number: &str) -> Result<&'a mut DocumentEntry> {
    state
        .history
        .iter_mut()
        .find(|e| e.number == number)
        .ok_or_else(|| BillingError::DocumentNotFound(number.to_string()))
}

/// Price a new bill or invoice and record it in the history
pub fn create_document(cfg_dir: &Path, request: &DocumentRequest<'_>) -> Result<DocumentEntry> {
    validate_discount(request.discount)?;

    let config = load_config(cfg_dir)?;
    let parties = load_parties(cfg_dir, request.kind)?;
    let catalog = load_items(cfg_dir)?;
    let mut state = load_state(cfg_dir)?;

    if !parties.contains_key(request.party) {
        return Err(match request.kind {
            DocumentKind::Invoice => BillingError::ClientNotFound(request.party.to_string()),
            DocumentKind::Bill => BillingError::ProviderNotFound(request.party.to_string()),
        });
    }

    let lines = build_lines(
        &catalog,
        request.items,
        request.lines,
        config.billing.default_vat_percent,
    )?;

    let date = request.date.unwrap_or_else(|| Local::now().date_naive());
    let year = document_year(date)?;
    let seq = state.next_seq(request.kind, year);
    let number = if request.dry_run {
        "DRAFT".to_string()
    } else {
        format_document_number(config.billing.number_format(request.kind), year, seq)
    };

    // Formats without {year} repeat once the sequence resets
    if !request.dry_run && state.has_document(&number) {
        return Err(BillingError::DuplicateDocumentNumber(number));
    }

    let totals = price_lines(&number, &lines, request.discount);

    let mut entry = DocumentEntry {
        number,
        kind: request.kind,
        party: request.party.to_string(),
        date,
        discount: 0.0,
        subtotal: 0.0,
        vat_amount: 0.0,
        total: 0.0,
        lines,
        payments: Vec::new(),
    };
    entry.apply_totals(&totals);

    if request.dry_run {
        tracing::debug!(kind = %request.kind, total = entry.total, "priced draft document");
        return Ok(entry);
    }

    state.counters.get_mut(request.kind).advance(year, seq);
    state.history.push(entry.clone());
    save_state(cfg_dir, &state)?;

    tracing::info!(
        document = %entry.number,
        kind = %entry.kind,
        party = %entry.party,
        lines = entry.lines.len(),
        total = entry.total,
        "document created"
    );

    Ok(entry)
}

/// Replace the lines (and optionally the discount) of a stored document.
///
/// The totals snapshot is recomputed; recorded payments are kept as they are.
pub fn edit_document(
    cfg_dir: &Path,
    number: &str,
    items: &[String],
    custom: &[String],
    discount: Option<f64>,
) -> Result<DocumentEntry> {
    if let Some(discount) = discount {
        validate_discount(discount)?;
    }

    let config = load_config(cfg_dir)?;
    let catalog = load_items(cfg_dir)?;
    let mut state = load_state(cfg_dir)?;

    let entry = find_document_mut(&mut state, number)?;
    let previous_status = entry.status();

    let lines = build_lines(&catalog, items, custom, config.billing.default_vat_percent)?;
    let discount = discount.unwrap_or(entry.discount);
    let totals = price_lines(number, &lines, discount);

    entry.lines = lines;
    entry.apply_totals(&totals);

    if entry.status() != previous_status {
        tracing::warn!(
            document = number,
            from = %previous_status,
            to = %entry.status(),
            "payment status changed by edit"
        );
    }

    let updated = entry.clone();
    save_state(cfg_dir, &state)?;

    tracing::info!(document = number, total = updated.total, "document updated");
    Ok(updated)
}
