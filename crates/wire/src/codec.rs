//! Scalar encode/decode under the remote service's fixed wire formats.
//!
//! The service is strict about scalar shapes: monetary amounts carry exactly
//! two decimal places with no grouping separator, and dates travel as a
//! nested element holding `year`, `month`, and `day` children. Everything
//! here round-trips exactly: `encode(decode(x)) == x` for every valid `x`.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::element::Element;
use crate::error::{Result, WireError};

/// Renders a monetary amount with exactly two decimal places and no
/// grouping separator (`1234.50`, never `1,234.50`).
pub fn encode_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Decodes a monetary amount from wire text.
pub fn decode_amount(field: &str, raw: &str) -> Result<Decimal> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|_| WireError::format(field, raw, "decimal amount"))
}

/// Renders a date as the service's nested element shape:
/// `<name><year>2026</year><month>08</month><day>06</day></name>`.
pub fn date_element(name: &str, date: NaiveDate) -> Element {
    Element::parent(
        name,
        vec![
            Element::text("year", format!("{:04}", date.year())),
            Element::text("month", format!("{:02}", date.month())),
            Element::text("day", format!("{:02}", date.day())),
        ],
    )
}

/// Decodes a date from its nested element shape. The element's own name is
/// reported as the offending field on error.
pub fn decode_date(element: &Element) -> Result<NaiveDate> {
    let component = |name: &str| -> Result<&str> {
        element
            .child_text(name)
            .ok_or_else(|| WireError::missing(element.name(), name))
    };

    let year = component("year")?;
    let month = component("month")?;
    let day = component("day")?;

    let parse =
        |raw: &str| -> Result<u32> { raw.trim().parse().map_err(|_| date_format_error(element, raw)) };

    let y = year
        .trim()
        .parse::<i32>()
        .map_err(|_| date_format_error(element, year))?;
    let m = parse(month)?;
    let d = parse(day)?;

    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| date_format_error(element, &format!("{year}-{month}-{day}")))
}

fn date_format_error(element: &Element, raw: &str) -> WireError {
    WireError::format(element.name(), raw, "calendar date")
}

/// Renders a boolean flag.
pub fn encode_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Decodes a boolean flag.
pub fn decode_bool(field: &str, raw: &str) -> Result<bool> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(WireError::format(field, raw, "boolean")),
    }
}
