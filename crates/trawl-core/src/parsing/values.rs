use rust_decimal::Decimal;
use std::str::FromStr;

/// Largest amount accepted as a single contract value ($1 quadrillion).
/// Anything above this is a corrupt cell, and keeping it out lets totals
/// over the whole snapshot stay far below `Decimal::MAX`.
pub const MAX_CONTRACT_VALUE: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Parse a monetary cell from a contract-notice export into a Decimal.
///
/// Handles formats like:
/// - "1234567" -> Some(1234567)
/// - "$1,234,567.00" -> Some(1234567.00)
/// - " $ 950 " -> Some(950)
/// - "1.5e6" -> Some(1500000)
/// - "", "N/A", "nan", "abc" -> None
///
/// Negative amounts and amounts above [`MAX_CONTRACT_VALUE`] are not valid
/// contract values and also yield None.
pub fn parse_currency(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let value = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()?;

    if value.is_sign_negative() && !value.is_zero() {
        return None;
    }
    if value > MAX_CONTRACT_VALUE {
        return None;
    }
    Some(value.normalize())
}
