use primitive_types::U256;

use crate::errors::CustomError;

/// Fractional digits shown for token balances.
pub const DECIMALS_TO_SHOW: u32 = 5;
/// Fractional digits kept for fiat values.
pub const FIAT_DECIMALS: u32 = 2;

const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("aud", "$"),
    ("brl", "R$"),
    ("cad", "$"),
    ("cny", "¥"),
    ("eur", "€"),
    ("gbp", "£"),
    ("hkd", "HK$"),
    ("inr", "₹"),
    ("jpy", "¥"),
    ("krw", "₩"),
    ("mxn", "$"),
    ("nzd", "NZ$"),
    ("rub", "₽"),
    ("sgd", "S$"),
    ("usd", "$"),
];

/// Parses a decimal minimal-unit string such as `"1500000000000000000"`.
pub fn parse_minimal_units(value: &str) -> Result<U256, CustomError> {
    U256::from_dec_str(value.trim())
        .map_err(|_| CustomError::InvalidAmountError(value.to_string()))
}

/// Scale a minimal-unit amount by `decimals`, trimming trailing zeros.
pub fn format_units(amount: U256, decimals: u8) -> String {
    let decimals = decimals as usize;
    let mut amount_str = amount.to_string();

    if amount_str.len() <= decimals {
        amount_str.insert_str(0, &"0".repeat(decimals - amount_str.len() + 1));
    }

    if decimals == 0 {
        return amount_str;
    }

    let point = amount_str.len() - decimals;
    amount_str.insert(point, '.');

    let trimmed = amount_str.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Human-readable balance rounded to `decimals_to_show` digits.
///
/// Positive amounts too small to show become `"< 0.00001"`.
pub fn render_from_token_minimal_unit(amount: U256, decimals: u8, decimals_to_show: u32) -> String {
    let value: f64 = format_units(amount, decimals).parse().unwrap_or(0.0);
    let threshold = 10f64.powi(-(decimals_to_show as i32));

    if value > 0.0 && value < threshold {
        return format!("< {}", render_number(threshold));
    }

    render_number(round_to(value, decimals_to_show))
}

/// Fiat value of `balance`, or `None` when the exchange rate is unknown.
///
/// A zero exchange rate means the price feed has nothing for this token and
/// is treated the same as a missing one.
pub fn balance_to_fiat(
    balance: &str,
    conversion_rate: f64,
    exchange_rate: Option<f64>,
    currency_code: &str,
) -> Option<String> {
    let exchange_rate = exchange_rate.filter(|rate| *rate != 0.0)?;
    let balance: f64 = balance.trim().parse().ok()?;
    let fiat = round_to(balance * exchange_rate * conversion_rate, FIAT_DECIMALS);
    if !fiat.is_finite() {
        return None;
    }
    Some(add_currency_symbol(fiat, currency_code))
}

pub fn add_currency_symbol(amount: f64, currency_code: &str) -> String {
    let prefix = if amount < 0.0 { "-" } else { "" };
    let magnitude = amount.abs();
    let rendered = if magnitude.fract() == 0.0 {
        render_number(magnitude)
    } else {
        format!("{:.2}", magnitude)
    };

    let code = currency_code.to_lowercase();
    match CURRENCY_SYMBOLS.iter().find(|(c, _)| *c == code) {
        Some((_, symbol)) => format!("{}{}{}", prefix, symbol, rendered),
        None => format!("{}{} {}", prefix, rendered, currency_code.to_uppercase()),
    }
}

fn round_to(value: f64, digits: u32) -> f64 {
    let base = 10f64.powi(digits as i32);
    (value * base).round() / base
}

fn render_number(value: f64) -> String {
    if value == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{}", value)
}
