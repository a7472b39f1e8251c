//! Decimal-safe amount conversion between human-readable strings and
//! smallest-unit integer strings
//!
//! Everything here works on strings with integer arithmetic only. Binary
//! floating point never touches an on-wire amount, so tokens with up to 18
//! decimal places convert without precision loss.
//!
//! Conversion to smallest units truncates excess fractional digits instead
//! of rounding. Truncation is conservative: it never overstates the amount
//! a user would spend.

/// Convert a human-readable decimal string into an integer smallest-unit
/// string for a token with the given number of decimals.
///
/// Malformed input (empty, non-numeric, more than one decimal point) maps
/// to `"0"` rather than an error; callers treat a zero amount as
/// "quote unusable" either way.
///
/// ```
/// use swapquote_types::to_smallest_unit;
///
/// assert_eq!(to_smallest_unit("1.23456789", 6), "1234567");
/// assert_eq!(to_smallest_unit("100", 6), "100000000");
/// ```
pub fn to_smallest_unit(decimal: &str, decimals: u8) -> String {
	let decimal = decimal.trim();
	if decimal.is_empty() {
		return "0".to_string();
	}

	let (whole, fraction) = match decimal.split_once('.') {
		Some((w, f)) => (w, f),
		None => (decimal, ""),
	};

	if whole.is_empty() && fraction.is_empty() {
		return "0".to_string();
	}
	let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
	if !is_digits(whole) || !is_digits(fraction) {
		return "0".to_string();
	}

	// Truncate excess fractional digits, then right-pad to the full width.
	let decimals = decimals as usize;
	let mut fraction: String = fraction.chars().take(decimals).collect();
	while fraction.len() < decimals {
		fraction.push('0');
	}

	let combined = format!("{}{}", whole, fraction);
	let stripped = combined.trim_start_matches('0');
	if stripped.is_empty() {
		"0".to_string()
	} else {
		stripped.to_string()
	}
}

/// Convert an integer smallest-unit string back into a human-readable
/// decimal string for a token with the given number of decimals.
///
/// Malformed input maps to `"0"`.
///
/// ```
/// use swapquote_types::from_smallest_unit;
///
/// assert_eq!(from_smallest_unit("1234567", 6), "1.234567");
/// assert_eq!(from_smallest_unit("1000000", 6), "1");
/// ```
pub fn from_smallest_unit(units: &str, decimals: u8) -> String {
	let units = units.trim();
	if units.is_empty() || !units.chars().all(|c| c.is_ascii_digit()) {
		return "0".to_string();
	}

	// Left-pad so there is always at least one whole digit.
	let decimals = decimals as usize;
	let mut padded = units.to_string();
	while padded.len() <= decimals {
		padded.insert(0, '0');
	}

	let split_at = padded.len() - decimals;
	let whole = padded[..split_at].trim_start_matches('0');
	let whole = if whole.is_empty() { "0" } else { whole };
	let fraction = padded[split_at..].trim_end_matches('0');

	if fraction.is_empty() {
		whole.to_string()
	} else {
		format!("{}.{}", whole, fraction)
	}
}

/// Threshold below which display amounts switch to scientific notation
const SCIENTIFIC_THRESHOLD: f64 = 1e-9;

/// Format an amount for display using a significant-digit-aware policy:
/// fewer decimals for large amounts, more for sub-cent amounts, scientific
/// notation below a fixed threshold.
///
/// This is a presentation helper only; ranking and wire amounts always use
/// the exact decimal strings.
pub fn format_display_amount(value: f64) -> String {
	if value == 0.0 {
		return "0".to_string();
	}
	if value >= 1_000.0 {
		format!("{:.2}", value)
	} else if value >= 1.0 {
		format!("{:.4}", value)
	} else if value >= 0.01 {
		format!("{:.6}", value)
	} else if value >= SCIENTIFIC_THRESHOLD {
		format!("{:.8}", value)
	} else {
		format!("{:e}", value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_to_smallest_unit_basic() {
		assert_eq!(to_smallest_unit("1", 18), "1000000000000000000");
		assert_eq!(to_smallest_unit("100", 6), "100000000");
		assert_eq!(to_smallest_unit("0.5", 6), "500000");
		assert_eq!(to_smallest_unit("1.23456789", 6), "1234567");
		assert_eq!(to_smallest_unit("0", 18), "0");
		assert_eq!(to_smallest_unit("0.0", 18), "0");
	}

	#[test]
	fn test_to_smallest_unit_truncates_never_rounds() {
		// Truncation is the explicit policy: 1.9999999 with 6 decimals keeps
		// 1999999, it does not round up to 2000000.
		assert_eq!(to_smallest_unit("1.9999999", 6), "1999999");
		assert_eq!(to_smallest_unit("0.0000019", 6), "1");
	}

	#[test]
	fn test_to_smallest_unit_zero_decimals() {
		assert_eq!(to_smallest_unit("42.99", 0), "42");
		assert_eq!(to_smallest_unit("42", 0), "42");
	}

	#[test]
	fn test_to_smallest_unit_leading_and_partial_forms() {
		assert_eq!(to_smallest_unit("007", 2), "700");
		assert_eq!(to_smallest_unit(".5", 2), "50");
		assert_eq!(to_smallest_unit("5.", 2), "500");
	}

	#[test]
	fn test_to_smallest_unit_malformed_input() {
		assert_eq!(to_smallest_unit("", 6), "0");
		assert_eq!(to_smallest_unit("abc", 6), "0");
		assert_eq!(to_smallest_unit("1.2.3", 6), "0");
		assert_eq!(to_smallest_unit("-1", 6), "0");
		assert_eq!(to_smallest_unit("1e5", 6), "0");
		assert_eq!(to_smallest_unit(".", 6), "0");
	}

	#[test]
	fn test_from_smallest_unit_basic() {
		assert_eq!(from_smallest_unit("1234567", 6), "1.234567");
		assert_eq!(from_smallest_unit("1000000000000000000", 18), "1");
		assert_eq!(from_smallest_unit("500000", 6), "0.5");
		assert_eq!(from_smallest_unit("0", 6), "0");
		assert_eq!(from_smallest_unit("42", 0), "42");
	}

	#[test]
	fn test_from_smallest_unit_pads_short_values() {
		assert_eq!(from_smallest_unit("1", 6), "0.000001");
		assert_eq!(from_smallest_unit("1", 18), "0.000000000000000001");
	}

	#[test]
	fn test_from_smallest_unit_strips_trailing_zeros() {
		assert_eq!(from_smallest_unit("1500000", 6), "1.5");
		assert_eq!(from_smallest_unit("1000001", 6), "1.000001");
	}

	#[test]
	fn test_from_smallest_unit_malformed_input() {
		assert_eq!(from_smallest_unit("", 6), "0");
		assert_eq!(from_smallest_unit("12x4", 6), "0");
		assert_eq!(from_smallest_unit("-5", 6), "0");
	}

	#[test]
	fn test_round_trip_truncates_to_precision() {
		// Round-trip reproduces the input truncated to the token's decimals,
		// not the input verbatim.
		assert_eq!(from_smallest_unit(&to_smallest_unit("1.23456789", 6), 6), "1.234567");
		assert_eq!(from_smallest_unit(&to_smallest_unit("1.5", 6), 6), "1.5");
		assert_eq!(from_smallest_unit(&to_smallest_unit("100", 6), 6), "100");
		assert_eq!(
			from_smallest_unit(&to_smallest_unit("0.000000000000000001", 18), 18),
			"0.000000000000000001"
		);
	}

	#[test]
	fn test_format_display_amount_policy() {
		assert_eq!(format_display_amount(0.0), "0");
		assert_eq!(format_display_amount(12345.678), "12345.68");
		assert_eq!(format_display_amount(3.14159), "3.1416");
		assert_eq!(format_display_amount(0.123456789), "0.123457");
		assert_eq!(format_display_amount(0.00012345), "0.00012345");
		// Below the threshold formatting switches to scientific notation
		assert!(format_display_amount(3.0e-12).contains('e'));
	}
}
