//! Number formatting for report cells and chart axes.

/// Label shown for a difference that does not exist because the service
/// order was never found. Rendered instead of a blank or a fake zero.
pub const NOT_FOUND_LABEL: &str = "not found";

/// Currency prefix used by the summary box and the chart axis.
pub const CURRENCY_SYMBOL: &str = "R$";

/// Table-cell rendering: thousands separators, two decimal places.
pub fn number(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    let rendered = format!("{:.2}", n.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((&rendered, "00"));
    format!(
        "{}{}.{}",
        if n < 0.0 { "-" } else { "" },
        group_thousands(int_part),
        frac_part
    )
}

/// Currency rendering for the summary box: symbol, separators, two decimals.
pub fn currency(n: f64) -> String {
    format!("{CURRENCY_SYMBOL} {}", number(n))
}

/// Axis rendering: symbol and separators, no decimals; axis ticks drown in
/// centavos otherwise.
pub fn currency_axis(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    let rendered = format!("{:.0}", n.abs());
    format!(
        "{}{CURRENCY_SYMBOL} {}",
        if n < 0.0 { "-" } else { "" },
        group_thousands(&rendered)
    )
}

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(bytes.len() + bytes.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_format_groups_and_rounds() {
        assert_eq!(number(1_234_567.891), "1,234,567.89");
        assert_eq!(number(0.0), "0.00");
        assert_eq!(number(999.5), "999.50");
        assert_eq!(number(1000.0), "1,000.00");
    }

    #[test]
    fn negative_numbers_keep_the_sign_outside_the_grouping() {
        assert_eq!(number(-1234.5), "-1,234.50");
        assert_eq!(currency_axis(-1_000_000.0), "-R$ 1,000,000");
    }

    #[test]
    fn axis_format_has_no_decimals() {
        assert_eq!(currency_axis(18_900.0), "R$ 18,900");
        assert_eq!(currency_axis(45.9), "R$ 46");
    }

    #[test]
    fn summary_currency_keeps_decimals() {
        assert_eq!(currency(47_447.8), "R$ 47,447.80");
    }
}
