use chrono::{
    format::{Item, StrftimeItems},
    NaiveDate,
};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter {
    fn format_amount(&self, amount: f64) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// Display conventions shared by every screen: two-decimal money with
/// thousands separators and `dd/mm/yyyy` dates unless configured otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFormat {
    pub currency_symbol: String,
    pub date_format: String,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.into(),
            date_format: DEFAULT_DATE_FORMAT.into(),
        }
    }
}

impl DisplayFormat {
    pub fn new(currency_symbol: impl Into<String>, date_format: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            date_format: date_format.into(),
        }
    }

    /// List-row style: always carries a sign, e.g. `+$1,000.00` or `-$50.00`.
    pub fn format_signed(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { '-' } else { '+' };
        format!("{sign}{}{}", self.currency_symbol, group_thousands(amount.abs()))
    }

    pub fn format_percentage(&self, value: f64) -> String {
        format!("{value:.1}%")
    }
}

impl CurrencyFormatter for DisplayFormat {
    fn format_amount(&self, amount: f64) -> String {
        let body = group_thousands(amount.abs());
        // -0.004 rounds to 0.00 and must not print as a negative total
        if amount < 0.0 && body.chars().any(|c| matches!(c, '1'..='9')) {
            format!("-{}{}", self.currency_symbol, body)
        } else {
            format!("{}{}", self.currency_symbol, body)
        }
    }
}

impl DateFormatter for DisplayFormat {
    fn format_date(&self, date: NaiveDate) -> String {
        if is_valid_date_format(&self.date_format) {
            date.format(&self.date_format).to_string()
        } else {
            date.format(DEFAULT_DATE_FORMAT).to_string()
        }
    }
}

/// Whether `pattern` is a strftime pattern chrono can render.
pub fn is_valid_date_format(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

fn group_thousands(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{grouped}.{dec_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_use_two_decimals_and_separators() {
        let fmt = DisplayFormat::default();
        assert_eq!(fmt.format_amount(1000.0), "$1,000.00");
        assert_eq!(fmt.format_amount(950.0), "$950.00");
        assert_eq!(fmt.format_amount(0.0), "$0.00");
        assert_eq!(fmt.format_amount(-1234567.891), "-$1,234,567.89");
        assert_eq!(fmt.format_amount(-0.001), "$0.00");
    }

    #[test]
    fn list_rows_carry_a_sign() {
        let fmt = DisplayFormat::default();
        assert_eq!(fmt.format_signed(1000.0), "+$1,000.00");
        assert_eq!(fmt.format_signed(-50.0), "-$50.00");
    }

    #[test]
    fn percentages_have_one_decimal() {
        assert_eq!(DisplayFormat::default().format_percentage(100.0), "100.0%");
        assert_eq!(DisplayFormat::default().format_percentage(33.333), "33.3%");
    }

    #[test]
    fn dates_default_to_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(DisplayFormat::default().format_date(date), "02/01/2024");
        let iso = DisplayFormat::new("EUR ", "%Y-%m-%d");
        assert_eq!(iso.format_date(date), "2024-01-02");
        assert_eq!(iso.format_amount(5.5), "EUR 5.50");
    }

    #[test]
    fn broken_date_pattern_falls_back_to_default() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert!(!is_valid_date_format("%Q"));
        assert_eq!(DisplayFormat::new("$", "%Q").format_date(date), "02/01/2024");
    }
}
