//! Display formatting for satoshi amounts.

mod formatter;

pub use formatter::{format_value, CurrencyMode};
