//! Numeric conversions with browser semantics: `parseFloat` prefix parsing,
//! `Number(...)` coercion of form values, `toFixed` and en-US digit grouping.

/// Parses the longest numeric prefix of `src`, like `parseFloat`.
///
/// Returns NaN when no digits lead the (left-trimmed) input.
pub(crate) fn parse_js_parse_float(src: &str) -> f64 {
    let src = src.trim_start();
    if src.is_empty() {
        return f64::NAN;
    }

    let bytes = src.as_bytes();
    let mut i = 0usize;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    if src[i..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let mut int_digits = 0usize;
    while matches!(bytes.get(i), Some(b) if b.is_ascii_digit()) {
        int_digits += 1;
        i += 1;
    }

    let mut frac_digits = 0usize;
    if bytes.get(i) == Some(&b'.') {
        let dot = i;
        i += 1;
        while matches!(bytes.get(i), Some(b) if b.is_ascii_digit()) {
            frac_digits += 1;
            i += 1;
        }
        if frac_digits == 0 {
            i = dot;
        }
    }

    if int_digits + frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let exp_start = i;
        i += 1;
        if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        let mut exp_digits = 0usize;
        while matches!(bytes.get(i), Some(b) if b.is_ascii_digit()) {
            exp_digits += 1;
            i += 1;
        }
        if exp_digits == 0 {
            i = exp_start;
        }
    }

    src[..i].parse::<f64>().unwrap_or(f64::NAN)
}

/// Coerces a form field value the way `Number(value)` does.
///
/// Surrounding whitespace is ignored and blank input is `None`; anything that
/// is not a complete decimal literal (or `Infinity`) is NaN.
pub(crate) fn parse_form_number(src: &str) -> Option<f64> {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        return None;
    }

    let unsigned = trimmed
        .strip_prefix('+')
        .or_else(|| trimmed.strip_prefix('-'))
        .unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return Some(if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    // Rust accepts "inf"/"nan" spellings that forms must not.
    let well_formed = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
        && unsigned.bytes().any(|b| b.is_ascii_digit());
    if !well_formed {
        return Some(f64::NAN);
    }
    Some(trimmed.parse::<f64>().unwrap_or(f64::NAN))
}

/// Renders `value` the way `String(number)` does: plain digits between
/// 1e-7 and 1e21, exponent notation outside that range.
pub(crate) fn format_number_default(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value < 0.0 { "-Infinity" } else { "Infinity" };
        return text.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest round-trip digits, e.g. "1.25e-7".
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let digits = mantissa.replace('.', "");
    let count = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let point = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if count <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - count) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let (lead, rest) = digits.split_at(1);
        let frac = if rest.is_empty() { String::new() } else { format!(".{rest}") };
        let exp_sign = if point > 0 { '+' } else { '-' };
        format!("{lead}{frac}e{exp_sign}{}", (point - 1).unsigned_abs())
    };
    format!("{sign}{body}")
}

/// Renders `value` with exactly `fraction_digits` digits after the point.
///
/// Exact ties round away from zero, as `toFixed` does.
pub(crate) fn number_to_fixed(value: f64, fraction_digits: usize) -> String {
    // Past 1e21 `toFixed` gives up and falls back to `String(value)`.
    if !value.is_finite() || value.abs() >= 1e21 {
        return format_number_default(value);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    // Enough digits to expose the exact binary value around a tie.
    let expanded = format!("{:.*}", fraction_digits + TIE_CHECK_DIGITS, abs);
    let cut = expanded.len() - TIE_CHECK_DIGITS;
    let (kept, rest) = expanded.split_at(cut);
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');

    let digits = if is_tie {
        increment_decimal(kept.trim_end_matches('.'))
    } else {
        format!("{:.*}", fraction_digits, abs)
    };
    format!("{sign}{digits}")
}

const TIE_CHECK_DIGITS: usize = 30;

/// Adds one unit in the last place of a plain decimal string.
fn increment_decimal(digits: &str) -> String {
    let mut out = digits.as_bytes().to_vec();
    let mut idx = out.len();
    loop {
        if idx == 0 {
            out.insert(0, b'1');
            break;
        }
        idx -= 1;
        match out[idx] {
            b'.' => continue,
            b'9' => out[idx] = b'0',
            digit => {
                out[idx] = digit + 1;
                break;
            }
        }
    }
    String::from_utf8(out).unwrap_or_default()
}

/// Inserts `,` every three digits of an unsigned integer digit string.
pub(crate) fn group_integer_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().rev().enumerate() {
        if index > 0 && index % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let grouped = grouped.chars().rev().collect::<String>();
    if grouped.is_empty() {
        "0".to_string()
    } else {
        grouped
    }
}

/// Length as a browser reports it for `value.length`.
pub(crate) fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}
