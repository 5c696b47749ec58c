//! Number formatting for report tables.

/// Format with `decimals` fraction digits and `,` thousands separators.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    let digits = int_part.len();
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (digits - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    if value.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

/// Whole dollars with a `$` prefix, e.g. `$1,072`.
pub fn format_money(value: f64) -> String {
    format!("${}", format_grouped(value.round(), 0))
}

/// Fixed two-decimal precision without grouping, e.g. `1234.50`.
pub fn format_fixed(value: f64) -> String {
    format!("{value:.2}")
}

/// Usage quantity: integers without decimals, fractions with two.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format_grouped(value, 0)
    } else {
        format_grouped(value, 2)
    }
}
