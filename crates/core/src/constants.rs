/// Satoshis per whole bitcoin
pub const SATS_PER_BTC: u64 = 100_000_000;

/// Fallback BTC/USD rate applied when no price source is reachable
pub const DEFAULT_BTC_PRICE_USD: u64 = 40_000;

/// Base-unit decimals of the OVT token
pub const OVT_DECIMALS: u8 = 8;

/// Interval between NAV recomputations
pub const NAV_POLL_INTERVAL_SECS: u64 = 30;
