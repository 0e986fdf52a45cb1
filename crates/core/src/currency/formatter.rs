//! Tiered formatting of satoshi amounts for display.
//!
//! Amounts are rendered with k/M suffixes so dashboard cards stay compact:
//! small balances read as raw sats, mid-range balances as thousands or
//! millions of sats, and anything from 0.1 BTC upward as whole bitcoin.
//! USD rendering converts through the supplied BTC price and falls back to
//! a fixed default rate when no price is known.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BTC_PRICE_USD, SATS_PER_BTC};

/// Display currency for formatted amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyMode {
    Btc,
    Usd,
}

/// Threshold above which BTC mode switches from sats to whole bitcoin.
const BTC_DISPLAY_THRESHOLD_SATS: u64 = 10_000_000;

/// Formats a satoshi amount for display.
///
/// In BTC mode the tiers are: >= 10,000,000 sats as `₿x.xx`, >= 1,000,000 as
/// `x.xM sats`, >= 1,000 as `x.xk sats`, and raw `x sats` below that.
/// In USD mode the amount is converted through `btc_price_usd` (the default
/// rate applies when the price is absent or non-positive) and tiered as
/// `$x.xM`, `$x.xk`, or `$x.xx`.
pub fn format_value(amount_sats: u64, mode: CurrencyMode, btc_price_usd: Option<Decimal>) -> String {
    match mode {
        CurrencyMode::Btc => format_btc(amount_sats),
        CurrencyMode::Usd => format_usd(amount_sats, btc_price_usd),
    }
}

fn format_btc(amount_sats: u64) -> String {
    if amount_sats >= BTC_DISPLAY_THRESHOLD_SATS {
        let btc = Decimal::from(amount_sats) / Decimal::from(SATS_PER_BTC);
        format!("₿{:.2}", btc)
    } else if amount_sats >= 1_000_000 {
        let millions = Decimal::from(amount_sats) / Decimal::from(1_000_000u64);
        format!("{:.1}M sats", millions)
    } else if amount_sats >= 1_000 {
        let thousands = Decimal::from(amount_sats) / Decimal::from(1_000u64);
        format!("{:.1}k sats", thousands)
    } else {
        format!("{} sats", amount_sats)
    }
}

fn format_usd(amount_sats: u64, btc_price_usd: Option<Decimal>) -> String {
    let price = btc_price_usd
        .filter(|p| p.is_sign_positive() && !p.is_zero())
        .unwrap_or_else(|| Decimal::from(DEFAULT_BTC_PRICE_USD));

    let usd = Decimal::from(amount_sats) / Decimal::from(SATS_PER_BTC) * price;

    if usd >= Decimal::from(1_000_000u64) {
        format!("${:.1}M", usd / Decimal::from(1_000_000u64))
    } else if usd >= Decimal::from(1_000u64) {
        format!("${:.1}k", usd / Decimal::from(1_000u64))
    } else {
        format!("${:.2}", usd)
    }
}
