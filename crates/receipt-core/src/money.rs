//! Currency formatting for printed amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to cents, halves away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as `<symbol><amount>` with exactly two decimals.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    format!("{}{:.2}", symbol, round_cents(amount))
}

/// Format a deduction with a leading minus before the symbol (`-$2.00`).
pub fn format_deduction(amount: Decimal, symbol: &str) -> String {
    format!("-{}", format_currency(amount, symbol))
}
