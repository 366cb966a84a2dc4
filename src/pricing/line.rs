use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, Result};

/// Amount, tax and total for a single priced line
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LinePrice {
    pub amount: f64,
    pub vat_amount: f64,
    pub total: f64,
}

/// An inclusive date range used for pro-rata billing.
///
/// Only constructible with `to >= from`; anything else is not a period and
/// the line is priced flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPeriod {
    from: NaiveDate,
    to: NaiveDate,
}

impl BillingPeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Option<Self> {
        (to >= from).then_some(Self { from, to })
    }

    /// Parse a pair of optional `YYYY-MM-DD` strings.
    ///
    /// Missing, malformed or reversed ranges all yield `None`.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Option<Self> {
        let from = NaiveDate::parse_from_str(from?.trim(), "%Y-%m-%d").ok()?;
        let to = NaiveDate::parse_from_str(to?.trim(), "%Y-%m-%d").ok()?;
        Self::new(from, to)
    }

    pub fn from_dates(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<Self> {
        Self::new(from?, to?)
    }

    pub fn start(&self) -> NaiveDate {
        self.from
    }

    pub fn end(&self) -> NaiveDate {
        self.to
    }

    /// Days covered, both endpoints counted
    pub fn days(&self) -> u32 {
        days_count(self.from, self.to)
    }

    /// Share of the monthly rate covered by this period.
    ///
    /// The denominator is always the month of `from`, even when the range
    /// crosses into the next month.
    pub fn fraction(&self) -> f64 {
        f64::from(self.days()) / f64::from(days_in_month(self.from))
    }
}

/// Number of days in the calendar month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

/// Inclusive day count between two dates, zero when `to < from`
pub fn days_count(from: NaiveDate, to: NaiveDate) -> u32 {
    let days = (to - from).num_days() + 1;
    u32::try_from(days).unwrap_or(0)
}

/// Price one line.
///
/// With a valid date range the monthly `rate` is pro-rated by day; otherwise
/// the line is `rate * quantity`. Never fails: reversed or partial ranges
/// quietly fall back to flat pricing.
pub fn price_line(
    rate: f64,
    quantity: f64,
    vat_percent: f64,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
) -> LinePrice {
    let amount = match BillingPeriod::from_dates(from_date, to_date) {
        Some(period) => {
            (rate / f64::from(days_in_month(period.from))) * f64::from(period.days()) * quantity
        }
        None => rate * quantity,
    };

    let vat_amount = amount * (vat_percent / 100.0);

    LinePrice {
        amount,
        vat_amount,
        total: amount + vat_amount,
    }
}

/// Anything that can be priced as an invoice line.
///
/// Purchase-bill and sales-invoice lines share this one implementation.
pub trait Billable {
    fn rate(&self) -> f64;
    fn quantity(&self) -> f64;
    fn vat_percent(&self) -> f64;
    fn period_bounds(&self) -> (Option<NaiveDate>, Option<NaiveDate>);

    fn price(&self) -> LinePrice {
        let (from, to) = self.period_bounds();
        price_line(self.rate(), self.quantity(), self.vat_percent(), from, to)
    }

    /// True when the line carries dates that do not form a billing period
    fn falls_back_to_flat(&self) -> bool {
        match self.period_bounds() {
            (Some(from), Some(to)) => BillingPeriod::new(from, to).is_none(),
            (None, None) => false,
            _ => true,
        }
    }
}

/// A billable row on a purchase bill or sales invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub description: String,
    pub unit: String,
    pub quantity: f64,
    pub rate: f64,
    #[serde(default)]
    pub vat_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
}

impl LineItem {
    /// Reject values the pricer would silently turn into garbage
    pub fn validate(&self) -> Result<()> {
        let reject = |reason: &str| {
            Err(BillingError::InvalidLine {
                line: self.label().to_string(),
                reason: reason.to_string(),
            })
        };

        if !self.quantity.is_finite() || !self.rate.is_finite() || !self.vat_percent.is_finite() {
            return reject("quantity, rate and VAT must be finite numbers");
        }
        if self.quantity <= 0.0 {
            return reject("quantity must be greater than 0");
        }
        if self.rate < 0.0 {
            return reject("rate must not be negative");
        }
        if !(0.0..=100.0).contains(&self.vat_percent) {
            return reject("VAT must be between 0 and 100 percent");
        }

        Ok(())
    }

    /// Catalog id when present, description otherwise
    pub fn label(&self) -> &str {
        self.item_id.as_deref().unwrap_or(&self.description)
    }

    pub fn period(&self) -> Option<BillingPeriod> {
        BillingPeriod::from_dates(self.from_date, self.to_date)
    }
}

impl Billable for LineItem {
    fn rate(&self) -> f64 {
        self.rate
    }

    fn quantity(&self) -> f64 {
        self.quantity
    }

    fn vat_percent(&self) -> f64 {
        self.vat_percent
    }

    fn period_bounds(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (self.from_date, self.to_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn line(rate: f64, quantity: f64, vat_percent: f64) -> LineItem {
        LineItem {
            item_id: Some("fiber-100".to_string()),
            description: "Fiber 100 Mbps".to_string(),
            unit: "Mbps".to_string(),
            quantity,
            rate,
            vat_percent,
            from_date: None,
            to_date: None,
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date(2024, 1, 10)), 31);
        assert_eq!(days_in_month(date(2024, 2, 1)), 29);
        assert_eq!(days_in_month(date(2023, 2, 28)), 28);
        assert_eq!(days_in_month(date(2024, 4, 30)), 30);
        assert_eq!(days_in_month(date(2024, 12, 31)), 31);
    }

    #[test]
    fn test_days_count_is_inclusive() {
        assert_eq!(days_count(date(2024, 1, 1), date(2024, 1, 1)), 1);
        assert_eq!(days_count(date(2024, 1, 1), date(2024, 1, 15)), 15);
        assert_eq!(days_count(date(2024, 1, 15), date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_flat_pricing_without_dates() {
        let price = price_line(1000.0, 2.0, 0.0, None, None);
        assert_eq!(price.amount, 2000.0);
        assert_eq!(price.vat_amount, 0.0);
        assert_eq!(price.total, 2000.0);
    }

    #[test]
    fn test_pro_rata_half_january() {
        let price = price_line(
            3000.0,
            1.0,
            5.0,
            Some(date(2024, 1, 1)),
            Some(date(2024, 1, 15)),
        );
        assert!((price.amount - 1451.6129).abs() < 1e-4);
        assert!((price.vat_amount - 72.5806).abs() < 1e-4);
        assert_eq!(format!("{:.2}", price.total), "1524.19");
    }

    #[test]
    fn test_full_month_equals_flat() {
        let price = price_line(
            900.0,
            3.0,
            0.0,
            Some(date(2024, 2, 1)),
            Some(date(2024, 2, 29)),
        );
        assert!((price.amount - 2700.0).abs() < 1e-9);
    }

    #[test]
    fn test_range_crossing_month_uses_start_month() {
        // 2024-02-20..=2024-03-05 is 15 days, priced against February's 29
        let price = price_line(
            2900.0,
            1.0,
            0.0,
            Some(date(2024, 2, 20)),
            Some(date(2024, 3, 5)),
        );
        assert!((price.amount - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_reversed_range_falls_back_to_flat() {
        let price = price_line(
            3000.0,
            1.0,
            0.0,
            Some(date(2024, 1, 15)),
            Some(date(2024, 1, 1)),
        );
        assert_eq!(price.amount, 3000.0);
    }

    #[test]
    fn test_partial_range_falls_back_to_flat() {
        let price = price_line(3000.0, 2.0, 0.0, Some(date(2024, 1, 15)), None);
        assert_eq!(price.amount, 6000.0);
    }

    #[test]
    fn test_period_parse() {
        let period = BillingPeriod::parse(Some("2024-01-01"), Some("2024-01-15")).unwrap();
        assert_eq!(period.days(), 15);
        assert!((period.fraction() - 15.0 / 31.0).abs() < 1e-12);

        assert!(BillingPeriod::parse(Some("2024-01-15"), Some("2024-01-01")).is_none());
        assert!(BillingPeriod::parse(Some("not-a-date"), Some("2024-01-01")).is_none());
        assert!(BillingPeriod::parse(None, Some("2024-01-01")).is_none());
    }

    #[test]
    fn test_billable_falls_back_flag() {
        let mut item = line(100.0, 1.0, 0.0);
        assert!(!item.falls_back_to_flat());

        item.from_date = Some(date(2024, 1, 10));
        assert!(item.falls_back_to_flat());

        item.to_date = Some(date(2024, 1, 5));
        assert!(item.falls_back_to_flat());

        item.to_date = Some(date(2024, 1, 20));
        assert!(!item.falls_back_to_flat());
        assert!(item.period().is_some());
    }

    #[test]
    fn test_validate() {
        assert!(line(100.0, 1.0, 5.0).validate().is_ok());
        assert!(line(0.0, 1.0, 0.0).validate().is_ok());

        let err = line(100.0, 0.0, 5.0).validate().unwrap_err();
        assert!(err.to_string().contains("quantity must be greater than 0"));

        assert!(line(-1.0, 1.0, 5.0).validate().is_err());
        assert!(line(100.0, 1.0, 101.0).validate().is_err());
        assert!(line(f64::NAN, 1.0, 5.0).validate().is_err());
        assert!(line(100.0, f64::INFINITY, 5.0).validate().is_err());
    }
}
