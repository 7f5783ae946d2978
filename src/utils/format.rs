//! Human-readable quantities for alert text.

pub const NOT_AVAILABLE: &str = "N/A";

const MAGNITUDES: [(f64, &str); 3] = [
    (1_000_000_000.0, "b"),
    (1_000_000.0, "m"),
    (1_000.0, "k"),
];

/// Compact token amount: `2b`, `1.5k`, `12.34m`, or a grouped decimal below 1000.
pub fn format_compact(amount: f64) -> String {
    if !amount.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    for (scale, suffix) in MAGNITUDES {
        if amount >= scale {
            return format!("{}{}", fixed_trimmed(amount / scale, 2), suffix);
        }
    }

    format_grouped(amount, 4)
}

/// en-US style grouping (`1,234,567.89`) with at most `max_fraction_digits`
/// fractional digits and no trailing zeros.
pub fn format_grouped(amount: f64, max_fraction_digits: usize) -> String {
    if !amount.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let fixed = fixed_trimmed(amount.abs(), max_fraction_digits);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if amount < 0.0 && fixed != "0" {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Fixed-point with trailing fractional zeros (and a dangling point) removed.
fn fixed_trimmed(value: f64, digits: usize) -> String {
    let s = format!("{:.*}", digits, value);
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn group_digits(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
