use alloy::primitives::{
    utils::{format_units, parse_units},
    U256,
};
use eyre::{bail, eyre};

/// Parses a human readable decimal amount (`"1"`, `"0.01"`) into the token's
/// smallest unit.
pub fn parse_amount(value: &str, decimals: u8) -> eyre::Result<U256> {
    let value = value.trim();
    if value.is_empty() {
        bail!("empty amount");
    }
    let units = parse_units(value, decimals)
        .map_err(|err| eyre!("invalid amount {value:?} at {decimals} decimals: {err}"))?;
    if units.is_negative() {
        bail!("negative amount {value:?}");
    }
    Ok(units.get_absolute())
}

/// Formats an amount in smallest units back to decimal form, dropping
/// trailing zeros but always keeping one fractional digit (`1.0`, `0.5`).
pub fn format_amount(amount: U256, decimals: u8) -> eyre::Result<String> {
    let formatted = format_units(amount, decimals)
        .map_err(|err| eyre!("cannot format {amount} at {decimals} decimals: {err}"))?;
    Ok(trim_fraction(formatted))
}

fn trim_fraction(mut formatted: String) -> String {
    if !formatted.contains('.') {
        formatted.push_str(".0");
        return formatted;
    }
    let trimmed = formatted.trim_end_matches('0').len();
    formatted.truncate(trimmed);
    if formatted.ends_with('.') {
        formatted.push('0');
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAD: u64 = 1_000_000_000_000_000_000;

    #[test]
    fn one_token_round_trips() {
        let amount = parse_amount("1", 18).unwrap();
        assert_eq!(amount, U256::from(WAD));
        assert_eq!(format_amount(amount, 18).unwrap(), "1.0");
    }

    #[test]
    fn parses_fractional_amounts() {
        assert_eq!(
            parse_amount("0.01", 18).unwrap(),
            U256::from(10_000_000_000_000_000_u64)
        );
        assert_eq!(parse_amount(" 2.5 ", 6).unwrap(), U256::from(2_500_000));
    }

    #[test]
    fn formats_without_trailing_zeros() {
        assert_eq!(format_amount(U256::from(WAD / 2), 18).unwrap(), "0.5");
        assert_eq!(format_amount(U256::ZERO, 18).unwrap(), "0.0");
        assert_eq!(format_amount(U256::from(1_234_500), 6).unwrap(), "1.2345");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_amount("", 18).is_err());
        assert!(parse_amount("one", 18).is_err());
        assert!(parse_amount("-1", 18).is_err());
    }

    #[test]
    fn trims_fraction() {
        assert_eq!(trim_fraction("12".to_string()), "12.0");
        assert_eq!(trim_fraction("12.000".to_string()), "12.0");
        assert_eq!(trim_fraction("12.340".to_string()), "12.34");
    }
}
