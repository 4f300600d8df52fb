//! Display formatting for prices.

use courtside_gateway::PriceValue;

/// Format a price for display, e.g. `15.00 €`.
///
/// Values without a numeric interpretation are shown raw with the currency
/// suffix, so a surprising payload is still visible rather than hidden.
#[must_use]
pub fn euro(value: &PriceValue) -> String {
    match value.as_f64() {
        Some(n) => format!("{n:.2} €"),
        None => format!("{value} €"),
    }
}

/// Format an optional price, with a dash when there is none.
#[must_use]
pub fn euro_or_dash(value: Option<&PriceValue>) -> String {
    value.map_or_else(|| "—".to_string(), euro)
}
