//! Display formatting for amounts, dates and months.
//!
//! All output is fixed to the Chilean locale: pesos without decimals, `.` as
//! the thousands separator and `DD-MM-YYYY` dates.

use time::{Date, Month, macros::format_description};

const SHORT_MONTH_NAMES: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Insert `.` between every group of three digits, e.g. `1234567` to `1.234.567`.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    grouped
}

/// Format `amount` as Chilean pesos, e.g. `$1.234.567` or `-$1.234`.
///
/// Amounts are rounded to the nearest peso. Non-finite amounts render as `$0`.
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() {
        amount.round()
    } else {
        0.0
    };

    // Also catches -0.0.
    if amount == 0.0 {
        return "$0".to_owned();
    }

    let digits = group_thousands(&format!("{:.0}", amount.abs()));

    if amount < 0.0 {
        format!("-${digits}")
    } else {
        format!("${digits}")
    }
}

/// Format a percentage with one decimal place, e.g. `42.5%`.
pub fn format_percentage(percentage: f64) -> String {
    let percentage = if percentage.is_finite() {
        percentage
    } else {
        0.0
    };

    format!("{percentage:.1}%")
}

/// Parse the date prefix (`YYYY-MM-DD`) of a date or date-time string.
pub fn parse_date(date: &str) -> Option<Date> {
    let prefix = date.trim().get(..10)?;

    Date::parse(prefix, format_description!("[year]-[month]-[day]")).ok()
}

/// Format a backend date as `DD-MM-YYYY`, or `N/A` when it is missing or unparseable.
pub fn format_date(date: Option<&str>) -> String {
    let Some(date) = date.and_then(parse_date) else {
        return "N/A".to_owned();
    };

    date.format(format_description!("[day]-[month]-[year]"))
        .unwrap_or_else(|_| "N/A".to_owned())
}

/// Parse a `YYYY-MM` month key into its year and month.
pub fn parse_month(month: &str) -> Option<(i32, Month)> {
    let (year, month) = month.trim().split_once('-')?;

    if year.len() != 4 || month.len() != 2 {
        return None;
    }

    let year = year.parse::<i32>().ok()?;
    let month = Month::try_from(month.parse::<u8>().ok()?).ok()?;

    Some((year, month))
}

/// Short label for a `YYYY-MM` month, e.g. `Ene 25`.
///
/// Input that is not a month key is returned unchanged.
pub fn format_month(month: &str) -> String {
    match parse_month(month) {
        Some((year, month)) => format!(
            "{} {:02}",
            SHORT_MONTH_NAMES[month as usize - 1],
            year.rem_euclid(100)
        ),
        None => month.to_owned(),
    }
}

/// Long label for a `YYYY-MM` month, e.g. `Enero 2025`.
///
/// Input that is not a month key is returned unchanged.
pub fn format_month_name(month: &str) -> String {
    match parse_month(month) {
        Some((year, month)) => format!("{} {year}", MONTH_NAMES[month as usize - 1]),
        None => month.to_owned(),
    }
}


#[cfg(test)]
mod format_date_tests {
    use super::{format_date, format_month, format_month_name, format_percentage};

    #[test]
    fn formats_day_first() {
        assert_eq!(format_date(Some("2025-01-31")), "31-01-2025");
    }

    #[test]
    fn ignores_time_component() {
        assert_eq!(format_date(Some("2025-03-04T10:11:12.000Z")), "04-03-2025");
    }

    #[test]
    fn missing_or_invalid_date_is_not_available() {
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("")), "N/A");
        assert_eq!(format_date(Some("31/01/2025")), "N/A");
        assert_eq!(format_date(Some("2025-02-30")), "N/A");
    }

    #[test]
    fn month_labels() {
        assert_eq!(format_month("2025-01"), "Ene 25");
        assert_eq!(format_month("2009-12"), "Dic 09");
        assert_eq!(format_month_name("2025-01"), "Enero 2025");
        assert_eq!(format_month_name("2024-09"), "Septiembre 2024");
    }

    #[test]
    fn invalid_month_is_returned_unchanged() {
        assert_eq!(format_month("2025-13"), "2025-13");
        assert_eq!(format_month("enero"), "enero");
        assert_eq!(format_month_name("2025-1"), "2025-1");
    }

    #[test]
    fn percentage_has_one_decimal() {
        assert_eq!(format_percentage(42.0), "42.0%");
        assert_eq!(format_percentage(33.333), "33.3%");
        assert_eq!(format_percentage(f64::NAN), "0.0%");
    }
}
