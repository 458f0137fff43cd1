//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse a front-matter date in one of the common authoring formats.
///
/// Values carrying an offset are converted into the site timezone; naive
/// values are taken as already being site-local.
pub fn parse_date(s: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(tz).naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.with_timezone(tz).naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(tz).naive_local());
    }

    None
}

/// Format a date using a Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// format_date(&date, "M/D/YYYY")   // -> "1/15/2024"
/// ```
pub fn format_date(date: &NaiveDateTime, format: &str) -> String {
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a site-local date in ISO 8601 / XML format with its offset
pub fn date_xml(date: &NaiveDateTime, tz: &Tz) -> String {
    match tz.from_local_datetime(date).earliest() {
        Some(dt) => dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
        None => Utc
            .from_utc_datetime(date)
            .format("%Y-%m-%dT%H:%M:%S%:z")
            .to_string(),
    }
}

/// Moment tokens, longest first so `MMMM` wins over `MM` and `M`
const MOMENT_TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("DDDD", "%j"),
    ("DD", "%d"),
    ("D", "%-d"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("HH", "%H"),
    ("H", "%-H"),
    ("hh", "%I"),
    ("h", "%-I"),
    ("mm", "%M"),
    ("m", "%-M"),
    ("ss", "%S"),
    ("s", "%-S"),
    ("SSS", "%3f"),
    ("ZZ", "%z"),
    ("Z", "%:z"),
    ("A", "%p"),
    ("a", "%P"),
];

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    let mut result = String::with_capacity(format.len() * 2);
    let mut rest = format;

    'outer: while let Some(c) = rest.chars().next() {
        // [literal]
        if c == '[' {
            if let Some(end) = rest.find(']') {
                push_literal(&mut result, &rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }

        for (token, replacement) in MOMENT_TOKENS {
            if let Some(stripped) = rest.strip_prefix(token) {
                result.push_str(replacement);
                rest = stripped;
                continue 'outer;
            }
        }

        push_literal(&mut result, &rest[..c.len_utf8()]);
        rest = &rest[c.len_utf8()..];
    }

    result
}

fn push_literal(out: &mut String, literal: &str) {
    for c in literal.chars() {
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_format_date() {
        let d = date(2024, 1, 5, 10, 30);
        assert_eq!(format_date(&d, "YYYY-MM-DD"), "2024-01-05");
        assert_eq!(format_date(&d, "M/D/YYYY"), "1/5/2024");
        assert_eq!(format_date(&d, "YYYY/M/D"), "2024/1/5");
        assert_eq!(format_date(&d, "MMMM D, YYYY"), "January 5, 2024");
        assert_eq!(format_date(&d, "YYYY年M月D日"), "2024年1月5日");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
        assert_eq!(moment_to_chrono_format("[Day] D"), "Day %-d");
        assert_eq!(moment_to_chrono_format("100%"), "100%%");
    }

    #[test]
    fn test_parse_date_formats() {
        let tz = Tz::UTC;
        assert_eq!(parse_date("2024-01-05", &tz), Some(date(2024, 1, 5, 0, 0)));
        assert_eq!(parse_date("2024/01/05", &tz), Some(date(2024, 1, 5, 0, 0)));
        assert_eq!(
            parse_date("2024-01-05 10:30:00", &tz),
            Some(date(2024, 1, 5, 10, 30))
        );
        assert_eq!(
            parse_date("2024-01-05T10:30:00", &tz),
            Some(date(2024, 1, 5, 10, 30))
        );
        assert_eq!(parse_date("last tuesday", &tz), None);
        assert_eq!(parse_date("", &tz), None);
    }

    #[test]
    fn test_parse_date_with_offset_uses_site_timezone() {
        let tz: Tz = "Asia/Shanghai".parse().unwrap();
        assert_eq!(
            parse_date("2024-01-04T20:00:00Z", &tz),
            Some(date(2024, 1, 5, 4, 0))
        );
    }

    #[test]
    fn test_date_xml() {
        let tz: Tz = "Asia/Shanghai".parse().unwrap();
        assert_eq!(
            date_xml(&date(2024, 1, 5, 0, 0), &tz),
            "2024-01-05T00:00:00+08:00"
        );
        assert_eq!(
            date_xml(&date(2024, 1, 5, 0, 0), &Tz::UTC),
            "2024-01-05T00:00:00+00:00"
        );
    }
}
