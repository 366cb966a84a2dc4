use chrono::{Days, NaiveDate};
use ispbill::pricing::{
    aggregate, days_in_month, derive_payment_status, price_line, LineItem, PaymentStatus,
};
use proptest::prelude::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn period_strategy() -> impl Strategy<Value = Option<(NaiveDate, NaiveDate)>> {
    prop::option::of((date_strategy(), 0u64..45).prop_map(|(from, len)| {
        (from, from.checked_add_days(Days::new(len)).unwrap())
    }))
}

fn line_strategy() -> impl Strategy<Value = LineItem> {
    (0.0f64..10_000.0, 0.01f64..500.0, 0.0f64..=100.0, period_strategy()).prop_map(
        |(rate, quantity, vat_percent, period)| LineItem {
            item_id: None,
            description: "Bandwidth".to_string(),
            unit: "Mbps".to_string(),
            quantity,
            rate,
            vat_percent,
            from_date: period.map(|(from, _)| from),
            to_date: period.map(|(_, to)| to),
        },
    )
}

proptest! {
    #[test]
    fn flat_amount_is_rate_times_quantity(
        rate in 0.0f64..100_000.0,
        quantity in 0.0f64..1_000.0,
        vat in 0.0f64..=100.0,
    ) {
        let price = price_line(rate, quantity, vat, None, None);
        prop_assert_eq!(price.amount, rate * quantity);
    }

    #[test]
    fn total_is_amount_plus_vat(line in line_strategy()) {
        let price = price_line(line.rate, line.quantity, line.vat_percent, line.from_date, line.to_date);
        prop_assert_eq!(price.total, price.amount + price.vat_amount);
        prop_assert!(close(price.vat_amount, price.amount * line.vat_percent / 100.0));
    }

    #[test]
    fn pro_rata_is_day_share_of_month(
        rate in 0.0f64..10_000.0,
        quantity in 0.01f64..100.0,
        from in date_strategy(),
        len in 0u64..28,
    ) {
        let to = from.checked_add_days(Days::new(len)).unwrap();
        let dim = f64::from(days_in_month(from));
        let days = (len + 1) as f64;

        let price = price_line(rate, quantity, 0.0, Some(from), Some(to));
        prop_assert!(close(price.amount, rate * (days / dim) * quantity));
    }

    #[test]
    fn full_month_equals_flat_rate(
        rate in 0.0f64..10_000.0,
        quantity in 0.01f64..100.0,
        year in 2000i32..2100,
        month in 1u32..=12,
    ) {
        let from = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let to = from.checked_add_days(Days::new(u64::from(days_in_month(from)) - 1)).unwrap();

        let price = price_line(rate, quantity, 0.0, Some(from), Some(to));
        prop_assert!(close(price.amount, rate * quantity));
    }

    #[test]
    fn aggregate_ignores_line_order(
        (lines, shuffled) in prop::collection::vec(line_strategy(), 1..10)
            .prop_flat_map(|lines| (Just(lines.clone()), Just(lines).prop_shuffle())),
        discount in 0.0f64..1_000.0,
    ) {
        let a = aggregate(&lines, discount);
        let b = aggregate(&shuffled, discount);

        prop_assert!(close(a.subtotal, b.subtotal));
        prop_assert!(close(a.vat_amount, b.vat_amount));
        prop_assert!(close(a.total_amount, b.total_amount));
    }

    #[test]
    fn payment_status_boundaries(total in 0.01f64..100_000.0, share in 0.0001f64..0.9999) {
        prop_assert_eq!(derive_payment_status(total, total), PaymentStatus::Paid);
        prop_assert_eq!(derive_payment_status(total, 0.0), PaymentStatus::Due);

        let paid = total * share;
        prop_assume!(paid > 0.0 && paid < total);
        prop_assert_eq!(derive_payment_status(total, paid), PaymentStatus::Partial);
    }
}

#[test]
fn half_january_invoice_line() {
    let price = price_line(
        3000.0,
        1.0,
        5.0,
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 1, 15),
    );

    assert_eq!(format!("{:.2}", price.amount), "1451.61");
    assert_eq!(format!("{:.2}", price.vat_amount), "72.58");
    assert_eq!(format!("{:.2}", price.total), "1524.19");
}
