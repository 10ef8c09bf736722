//! Go duration text format
//!
//! ginkgo reads `--ginkgo.timeout` with Go's `time.ParseDuration`, so the
//! timeout is accepted and rendered in that syntax (`24h0m0s`, `1m30s`).

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Largest duration Go can represent (`math.MaxInt64` nanoseconds)
const MAX_NANOS: u128 = i64::MAX as u128;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

/// Parse a non-negative Go duration such as `90m`, `1h30m` or `1.5s`
pub fn parse_go_duration(input: &str) -> Result<Duration, String> {
    let invalid = || format!("invalid duration {input:?}");

    let (negative, body) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if body == "0" {
        return Ok(Duration::ZERO);
    }
    if body.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    let mut rest = body;

    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, after_int) = rest.split_at(int_len);

        let (frac_digits, after_number) = match after_int.strip_prefix('.') {
            Some(after_dot) => {
                let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
                after_dot.split_at(frac_len)
            }
            None => ("", after_int),
        };

        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid());
        }

        let unit_len = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, remaining) = after_number.split_at(unit_len);
        if unit.is_empty() {
            return Err(format!("missing unit in duration {input:?}"));
        }
        let scale = unit_nanos(unit)
            .ok_or_else(|| format!("unknown unit {unit:?} in duration {input:?}"))?;

        let whole: u128 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| invalid())?
        };
        if whole > MAX_NANOS / scale {
            return Err(invalid());
        }
        let mut value = whole * scale;

        // digits past nanosecond precision of the largest unit cannot matter
        let frac_digits = &frac_digits[..frac_digits.len().min(18)];
        if !frac_digits.is_empty() {
            let frac: u128 = frac_digits.parse().map_err(|_| invalid())?;
            let frac_value = frac * scale / 10u128.pow(frac_digits.len() as u32);
            value = value.checked_add(frac_value).ok_or_else(invalid)?;
        }

        total = total.checked_add(value).ok_or_else(invalid)?;
        if total > MAX_NANOS {
            return Err(invalid());
        }
        rest = remaining;
    }

    if negative && total != 0 {
        return Err(format!("duration {input:?} must be non-negative"));
    }

    Ok(Duration::from_nanos(total as u64))
}

/// `value / 10^digits` rendered with trailing fractional zeros trimmed
fn fixed_point(value: u128, digits: u32) -> String {
    let scale = 10u128.pow(digits);
    let (whole, frac) = (value / scale, value % scale);
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:0width$}", width = digits as usize);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

/// Render a duration the way Go's `time.Duration.String` does
pub fn format_go_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format!("{}µs", fixed_point(nanos, 3));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", fixed_point(nanos, 6));
    }

    let secs = nanos / NANOS_PER_SEC;
    let (hours, minutes) = (secs / 3_600, secs / 60 % 60);

    let seconds = fixed_point(nanos % (60 * NANOS_PER_SEC), 9);
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_matches_go() {
        assert_eq!(format_go_duration(Duration::from_secs(24 * 3600)), "24h0m0s");
        assert_eq!(format_go_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_go_duration(Duration::ZERO), "0s");
        assert_eq!(format_go_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_go_duration(Duration::from_micros(1500)), "1.5ms");
        assert_eq!(format_go_duration(Duration::from_nanos(1500)), "1.5µs");
        assert_eq!(format_go_duration(Duration::from_nanos(42)), "42ns");
        assert_eq!(format_go_duration(Duration::from_secs(3661)), "1h1m1s");
        assert_eq!(format_go_duration(Duration::from_millis(61_250)), "1m1.25s");
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_go_duration("24h").unwrap(), Duration::from_secs(86_400));
        assert_eq!(parse_go_duration("1h30m").unwrap(), Duration::from_secs(5_400));
        assert_eq!(parse_go_duration("1.5h").unwrap(), Duration::from_secs(5_400));
        assert_eq!(parse_go_duration("300ms").unwrap(), Duration::from_millis(300));
        assert_eq!(parse_go_duration("2us").unwrap(), Duration::from_micros(2));
        assert_eq!(parse_go_duration("2µs").unwrap(), Duration::from_micros(2));
        assert_eq!(parse_go_duration(".5s").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_go_duration("+10s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_go_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_go_duration("-0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_go_duration("").is_err());
        assert!(parse_go_duration("10").is_err());
        assert!(parse_go_duration("h").is_err());
        assert!(parse_go_duration("1d").is_err());
        assert!(parse_go_duration("1.h.").is_err());
        assert!(parse_go_duration("99999999999999999999h").is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_fraction() {
        assert!(parse_go_duration("94522879700260684295381835.9h").is_err());
        assert!(parse_go_duration("2562047h47m16.854775808s").is_err());
        assert!(parse_go_duration("2562047.8h").is_err());
        assert_eq!(
            parse_go_duration("2562047h47m16.854775807s").unwrap(),
            Duration::from_nanos(i64::MAX as u64)
        );
    }

    #[test]
    fn test_parse_rejects_negative() {
        let err = parse_go_duration("-5m").unwrap_err();
        assert!(err.contains("non-negative"));
    }

    #[test]
    fn test_format_of_parsed_value() {
        let parsed = parse_go_duration("2h45m30.5s").unwrap();
        assert_eq!(format_go_duration(parsed), "2h45m30.5s");
    }
}
