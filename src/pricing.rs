//! Cart arithmetic shared by the storefront totals endpoint and quotation
//! submission. The formula lives here once; each call site supplies its own
//! processing-fee rate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::PromoCode;

/// Fee rate used when rendering totals to the storefront.
pub const DISPLAY_FEE_RATE: f64 = 0.01;
/// Fee rate persisted in quotation/booking payloads. Diverges from the
/// display rate in the source business rule; kept as-is until confirmed.
pub const SUBMISSION_FEE_RATE: f64 = 0.03;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    pub price: f64,
    pub quantity: i64,
    /// Per-line percent discount, pre-clamped to [0,100] by the caller.
    pub discount: f64,
}

impl LineItem {
    /// Unit price rounded to the nearest whole currency unit. All percentage
    /// math runs on this, never on the raw price.
    pub fn effective_price(&self) -> f64 {
        self.price.round()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CartTotals {
    pub net_rate: f64,
    pub you_save: f64,
    pub subtotal: f64,
    pub discounted_subtotal: f64,
    pub processing_fee: f64,
    pub total: f64,
}

impl CartTotals {
    /// Compute totals for a set of line items plus a flat cart-wide percent
    /// discount. `fee_rate` only affects the persisted `processing_fee`; the
    /// displayed `total` always adds [`DISPLAY_FEE_RATE`].
    pub fn compute(items: &[LineItem], additional_discount: f64, fee_rate: f64) -> Self {
        let mut net_rate = 0.0;
        let mut you_save = 0.0;
        for item in items {
            let line = item.effective_price() * item.quantity as f64;
            net_rate += line;
            you_save += line * item.discount / 100.0;
        }
        let subtotal = net_rate - you_save;
        let discounted_subtotal = subtotal * (1.0 - additional_discount / 100.0);
        let processing_fee = discounted_subtotal * fee_rate;
        let total = discounted_subtotal * (1.0 + DISPLAY_FEE_RATE);

        Self {
            net_rate: round2(net_rate),
            you_save: round2(you_save),
            subtotal: round2(subtotal),
            discounted_subtotal: round2(discounted_subtotal),
            processing_fee: round2(processing_fee),
            total: round2(total),
        }
    }
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render a monetary amount with exactly two decimal places.
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

#[derive(Debug, Error, PartialEq)]
pub enum PromoError {
    #[error("promo code has expired")]
    Expired,
    #[error("cart total is below the promo minimum of {0}")]
    BelowMinimum(f64),
    #[error("promo code only applies to category {0}")]
    CategoryMismatch(String),
}

/// Check a promo code against the cart. On failure the caller drops the promo
/// (totals are computed without it) and surfaces the error message.
pub fn check_promo(
    promo: &PromoCode,
    subtotal: f64,
    cart_categories: &[String],
    now: DateTime<Utc>,
) -> Result<(), PromoError> {
    if let Some(expires_at) = promo.expires_at {
        if now > expires_at {
            return Err(PromoError::Expired);
        }
    }
    if let Some(min_amount) = promo.min_amount {
        if subtotal < min_amount {
            return Err(PromoError::BelowMinimum(min_amount));
        }
    }
    if let Some(category) = promo.category.as_deref() {
        if !cart_categories.iter().any(|c| c == category) {
            return Err(PromoError::CategoryMismatch(category.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;

    fn line(price: f64, discount: f64, quantity: i64) -> LineItem {
        LineItem {
            price,
            quantity,
            discount,
        }
    }

    fn promo(
        percent: f64,
        category: Option<&str>,
        min_amount: Option<f64>,
        expires_at: Option<DateTime<Utc>>,
    ) -> PromoCode {
        PromoCode {
            id: Uuid::new_v4(),
            code: "DIWALI10".into(),
            percent,
            category: category.map(str::to_string),
            min_amount,
            expires_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn reference_cart_without_additional_discount() {
        let items = vec![line(100.0, 10.0, 2), line(50.0, 0.0, 1)];
        let totals = CartTotals::compute(&items, 0.0, DISPLAY_FEE_RATE);

        assert_eq!(totals.net_rate, 250.00);
        assert_eq!(totals.you_save, 20.00);
        assert_eq!(totals.subtotal, 230.00);
        assert_eq!(totals.discounted_subtotal, 230.00);
        assert_eq!(totals.total, 232.30);
    }

    #[test]
    fn reference_cart_with_ten_percent_additional_discount() {
        let items = vec![line(100.0, 10.0, 2), line(50.0, 0.0, 1)];
        let totals = CartTotals::compute(&items, 10.0, DISPLAY_FEE_RATE);

        assert_eq!(totals.discounted_subtotal, 207.00);
        assert_eq!(totals.total, 209.07);
    }

    #[test]
    fn empty_cart_is_all_zero() {
        let totals = CartTotals::compute(&[], 0.0, DISPLAY_FEE_RATE);
        assert_eq!(totals.net_rate, 0.0);
        assert_eq!(totals.you_save, 0.0);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.processing_fee, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn net_rate_minus_you_save_equals_subtotal() {
        let carts = vec![
            vec![line(99.49, 12.5, 3), line(10.0, 100.0, 7)],
            vec![line(0.0, 50.0, 4), line(1234.56, 3.0, 1)],
            vec![line(5.5, 0.0, 0), line(19.99, 25.0, 2)],
        ];
        for items in carts {
            let totals = CartTotals::compute(&items, 0.0, DISPLAY_FEE_RATE);
            assert!(
                (totals.net_rate - totals.you_save - totals.subtotal).abs() < 0.005,
                "identity broke for {totals:?}"
            );
        }
    }

    #[test]
    fn zero_additional_discount_leaves_subtotal_unchanged() {
        let items = vec![line(75.0, 20.0, 3)];
        let totals = CartTotals::compute(&items, 0.0, DISPLAY_FEE_RATE);
        assert_eq!(totals.discounted_subtotal, totals.subtotal);
    }

    #[test]
    fn savings_grow_with_discount_and_quantity() {
        let base = CartTotals::compute(&[line(100.0, 10.0, 2)], 0.0, DISPLAY_FEE_RATE);
        let deeper = CartTotals::compute(&[line(100.0, 25.0, 2)], 0.0, DISPLAY_FEE_RATE);
        let more = CartTotals::compute(&[line(100.0, 10.0, 5)], 0.0, DISPLAY_FEE_RATE);

        assert!(deeper.you_save >= base.you_save);
        assert!(more.you_save >= base.you_save);
    }

    #[test]
    fn effective_price_rounds_before_discount_math() {
        // 99.50 rounds up to 100, so the line behaves exactly like a 100 unit.
        let totals = CartTotals::compute(&[line(99.50, 10.0, 2)], 0.0, DISPLAY_FEE_RATE);
        assert_eq!(totals.net_rate, 200.00);
        assert_eq!(totals.you_save, 20.00);
    }

    #[test]
    fn zero_quantity_line_contributes_nothing() {
        let with_zero = CartTotals::compute(
            &[line(100.0, 10.0, 2), line(500.0, 50.0, 0)],
            0.0,
            DISPLAY_FEE_RATE,
        );
        let without = CartTotals::compute(&[line(100.0, 10.0, 2)], 0.0, DISPLAY_FEE_RATE);
        assert_eq!(with_zero, without);
    }

    #[test]
    fn submission_fee_rate_changes_fee_but_not_display_total() {
        let items = vec![line(100.0, 0.0, 1)];
        let display = CartTotals::compute(&items, 0.0, DISPLAY_FEE_RATE);
        let submission = CartTotals::compute(&items, 0.0, SUBMISSION_FEE_RATE);

        assert_eq!(display.processing_fee, 1.00);
        assert_eq!(submission.processing_fee, 3.00);
        assert_eq!(display.total, submission.total);
    }

    #[test]
    fn format_amount_always_two_decimals() {
        assert_eq!(format_amount(232.3), "232.30");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(209.071), "209.07");
    }

    #[test]
    fn promo_passes_when_unconstrained() {
        let p = promo(10.0, None, None, None);
        assert_eq!(check_promo(&p, 50.0, &[], Utc::now()), Ok(()));
    }

    #[test]
    fn expired_promo_is_rejected() {
        let past = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let p = promo(10.0, None, None, Some(past));
        assert_eq!(check_promo(&p, 50.0, &[], Utc::now()), Err(PromoError::Expired));
    }

    #[test]
    fn promo_below_minimum_is_rejected() {
        let p = promo(10.0, None, Some(500.0), None);
        assert_eq!(
            check_promo(&p, 230.0, &[], Utc::now()),
            Err(PromoError::BelowMinimum(500.0))
        );
    }

    #[test]
    fn category_fenced_promo_requires_matching_line() {
        let p = promo(10.0, Some("sky_shots"), None, None);
        let mismatch = check_promo(&p, 230.0, &["sparklers".into()], Utc::now());
        assert_eq!(
            mismatch,
            Err(PromoError::CategoryMismatch("sky_shots".into()))
        );

        let ok = check_promo(
            &p,
            230.0,
            &["sparklers".into(), "sky_shots".into()],
            Utc::now(),
        );
        assert_eq!(ok, Ok(()));
    }
}
