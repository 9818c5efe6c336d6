use chrono::{
  DateTime,
  NaiveDate,
  NaiveDateTime
};

pub const NOT_AVAILABLE: &str = "N/A";
pub const INVALID_DATE: &str =
  "Invalid Date";

/// Rounds half-way values toward positive
/// infinity, the way the dashboard has
/// always rounded percentages.
pub fn round_half_up(value: f64) -> f64 {
  (value + 0.5).floor()
}

/// US-dollar amount with thousands
/// separators and two decimals:
/// `1234.5` renders as `$1,234.50`.
pub fn format_currency(
  value: f64
) -> String {
  if !value.is_finite() {
    return NOT_AVAILABLE.to_string();
  }

  let cents =
    (value.abs() * 100.0).round() as u128;
  let dollars = group_thousands(
    &(cents / 100).to_string()
  );
  let sign = if value < 0.0 && cents > 0
  {
    "-"
  } else {
    ""
  };

  format!(
    "{sign}${dollars}.{:02}",
    cents % 100
  )
}

fn group_thousands(
  digits: &str
) -> String {
  let mut out = String::with_capacity(
    digits.len() + digits.len() / 3
  );
  for (idx, ch) in digits.chars().enumerate()
  {
    if idx > 0
      && (digits.len() - idx) % 3 == 0
    {
      out.push(',');
    }
    out.push(ch);
  }
  out
}

/// Parses the date shapes the backend
/// emits: plain dates, naive ISO
/// datetimes (with `T` or a space) and
/// RFC 3339 timestamps.
pub fn parse_backend_date(
  raw: &str
) -> Option<NaiveDate> {
  let raw = raw.trim();
  if let Ok(date) =
    NaiveDate::parse_from_str(
      raw, "%Y-%m-%d"
    )
  {
    return Some(date);
  }
  for pattern in [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f"
  ] {
    if let Ok(dt) =
      NaiveDateTime::parse_from_str(
        raw, pattern
      )
    {
      return Some(dt.date());
    }
  }
  DateTime::parse_from_rfc3339(raw)
    .ok()
    .map(|dt| dt.date_naive())
}

/// `Jan 5, 2024`; `N/A` when the value
/// is missing or empty.
pub fn format_date(
  raw: Option<&str>
) -> String {
  match raw.map(str::trim) {
    | None | Some("") => {
      NOT_AVAILABLE.to_string()
    }
    | Some(text) => {
      parse_backend_date(text)
        .map(format_naive_date)
        .unwrap_or_else(|| {
          INVALID_DATE.to_string()
        })
    }
  }
}

pub fn format_naive_date(
  date: NaiveDate
) -> String {
  date.format("%b %-d, %Y").to_string()
}

/// Ratio in `[0, 1]` as a whole percent:
/// `0.834` renders as `83%`.
pub fn format_percent(
  ratio: f64
) -> String {
  format!(
    "{}%",
    round_half_up(ratio * 100.0) as i64
  )
}

pub fn or_not_available(
  value: Option<&str>
) -> String {
  match value {
    | Some(text)
      if !text.trim().is_empty() =>
    {
      text.to_string()
    }
    | _ => NOT_AVAILABLE.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn currency_groups_thousands() {
    assert_eq!(
      format_currency(1234.5),
      "$1,234.50"
    );
    assert_eq!(
      format_currency(0.0),
      "$0.00"
    );
    assert_eq!(
      format_currency(1_000_000.0),
      "$1,000,000.00"
    );
    assert_eq!(
      format_currency(999.999),
      "$1,000.00"
    );
  }

  #[test]
  fn currency_keeps_sign() {
    assert_eq!(
      format_currency(-42.1),
      "-$42.10"
    );
    assert_eq!(
      format_currency(-0.001),
      "$0.00"
    );
  }

  #[test]
  fn missing_date_is_not_available() {
    assert_eq!(format_date(None), "N/A");
    assert_eq!(
      format_date(Some("  ")),
      "N/A"
    );
  }

  #[test]
  fn dates_render_short_month() {
    assert_eq!(
      format_date(Some("2024-01-05")),
      "Jan 5, 2024"
    );
    assert_eq!(
      format_date(Some(
        "2023-11-30T08:15:00"
      )),
      "Nov 30, 2023"
    );
    assert_eq!(
      format_date(Some(
        "2023-11-30 08:15:00.123"
      )),
      "Nov 30, 2023"
    );
    assert_eq!(
      format_date(Some(
        "2025-06-01T12:00:00+00:00"
      )),
      "Jun 1, 2025"
    );
  }

  #[test]
  fn garbage_date_is_flagged() {
    assert_eq!(
      format_date(Some("soon")),
      "Invalid Date"
    );
  }

  #[test]
  fn percent_rounds_half_up() {
    assert_eq!(format_percent(0.834), "83%");
    assert_eq!(format_percent(0.125), "13%");
    assert_eq!(format_percent(0.0), "0%");
  }
}
