//! Typed/lexical canonicalization of scalar literals (spec.md §4.3,
//! "object_to_rdf"), producing the canonical lexical form xsd:boolean,
//! xsd:integer and xsd:double require before an `oxrdf::Literal` is built.

/// Canonical lexical form of an XSD boolean: `"true"` or `"false"`.
pub fn canonical_boolean(value: bool) -> String {
	if value { "true" } else { "false" }.to_owned()
}

/// Canonical lexical form of an XSD integer: decimal digits, optional
/// leading `-`, no leading zeros (beyond a lone `0`).
pub fn canonical_integer(value: i64) -> String {
	value.to_string()
}

/// Canonical lexical form of an XSD double: `[-]d.dddE[-]dd`, or `INF`,
/// `-INF`, `NaN` for the non-finite values.
pub fn canonical_double(value: f64) -> String {
	if value.is_nan() {
		return "NaN".to_owned();
	}
	if value.is_infinite() {
		return if value > 0.0 { "INF" } else { "-INF" }.to_owned();
	}
	if value == 0.0 {
		return if value.is_sign_negative() { "-0.0E0" } else { "0.0E0" }.to_owned();
	}

	let sign = if value < 0.0 { "-" } else { "" };
	let abs = value.abs();
	let exponent = abs.log10().floor() as i32;
	let mantissa = abs / 10f64.powi(exponent);

	// Render the mantissa with enough precision to round-trip, then trim
	// trailing zeros but keep at least one fractional digit.
	let mut mantissa_str = format!("{mantissa:.15}");
	while mantissa_str.ends_with('0') {
		mantissa_str.pop();
	}
	if mantissa_str.ends_with('.') {
		mantissa_str.push('0');
	}

	format!("{sign}{mantissa_str}E{exponent}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn booleans_canonicalize_to_true_false() {
		assert_eq!(canonical_boolean(true), "true");
		assert_eq!(canonical_boolean(false), "false");
	}

	#[test]
	fn integers_have_no_leading_zeros() {
		assert_eq!(canonical_integer(42), "42");
		assert_eq!(canonical_integer(-7), "-7");
		assert_eq!(canonical_integer(0), "0");
	}

	#[test]
	fn doubles_use_scientific_notation() {
		assert_eq!(canonical_double(100.0), "1.0E2");
		assert_eq!(canonical_double(-0.5), "-5.0E-1");
		assert_eq!(canonical_double(f64::INFINITY), "INF");
		assert_eq!(canonical_double(f64::NAN), "NaN");
	}
}
