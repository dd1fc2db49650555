//! Row records and cell value helpers
//!
//! Rows travel through the grid as [`Record`]s: ordered maps from column name
//! to a [`serde_json::Value`]. The helpers below give those values the loose
//! comparison semantics a SQL backend would apply, so that in-process data
//! sources and formatters agree with database-backed ones.

use serde_json::Value;
use std::cmp::Ordering;

/// A single row: column name to cell value
pub type Record = serde_json::Map<String, Value>;

/// Returns the display form of a cell value.
///
/// Null renders as an empty string, booleans as `1` / `0`, strings verbatim.
pub fn to_display(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::Bool(true) => "1".to_string(),
		Value::Bool(false) => "0".to_string(),
		Value::Number(n) => n.to_string(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Returns the numeric value of a number, a numeric string or a boolean.
pub fn as_f64(value: &Value) -> Option<f64> {
	match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse::<f64>().ok(),
		Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
		_ => None,
	}
}

/// Integer cast with leading-digits semantics.
///
/// `"2021-01-01"` casts to `2021`, `"abc"` to `0`, `3.9` to `3`.
pub fn int_cast(value: &Value) -> i64 {
	match value {
		Value::Null => 0,
		Value::Bool(b) => i64::from(*b),
		Value::Number(n) => n
			.as_i64()
			.or_else(|| n.as_f64().map(|f| f.trunc() as i64))
			.unwrap_or(0),
		Value::String(s) => {
			let s = s.trim_start();
			let mut end = 0;
			for (i, c) in s.char_indices() {
				if c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+')) {
					end = i + c.len_utf8();
				} else {
					break;
				}
			}
			s[..end].parse::<i64>().unwrap_or(0)
		}
		Value::Array(items) => i64::from(!items.is_empty()),
		Value::Object(map) => i64::from(!map.is_empty()),
	}
}

/// Returns `true` for values that count as empty: null, `""`, `"0"`, `0`,
/// `false` and empty collections.
pub fn is_empty(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(b) => !b,
		Value::Number(n) => n.as_f64() == Some(0.0),
		Value::String(s) => s.is_empty() || s == "0",
		Value::Array(items) => items.is_empty(),
		Value::Object(map) => map.is_empty(),
	}
}

/// Finite numeric value of a number or a numeric string.
fn numeric(value: &Value) -> Option<f64> {
	match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
		_ => None,
	}
}

fn rank(value: &Value) -> u8 {
	match value {
		Value::Null => 0,
		Value::Bool(_) => 1,
		Value::Number(_) => 2,
		Value::String(_) if numeric(value).is_some() => 2,
		Value::String(_) => 3,
		Value::Array(_) => 4,
		Value::Object(_) => 5,
	}
}

/// Total order over cell values.
///
/// Null sorts first, then booleans, then numbers and numeric strings
/// compared numerically, then the remaining strings lexicographically.
pub fn compare(a: &Value, b: &Value) -> Ordering {
	let (left, right) = (rank(a), rank(b));
	if left != right {
		return left.cmp(&right);
	}
	match (a, b) {
		(Value::Bool(x), Value::Bool(y)) => x.cmp(y),
		(Value::String(x), Value::String(y)) if left == 3 => x.cmp(y),
		_ if left == 2 => match (numeric(a), numeric(b)) {
			(Some(x), Some(y)) => x.total_cmp(&y),
			_ => Ordering::Equal,
		},
		(Value::Null, Value::Null) => Ordering::Equal,
		_ => a.to_string().cmp(&b.to_string()),
	}
}

/// Loose equality used by the `=` and `!=` operators.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::Null, _) | (_, Value::Null) => false,
		(Value::Bool(x), other) | (other, Value::Bool(x)) => match other {
			Value::Bool(y) => x == y,
			_ => as_f64(other).map(|n| (n != 0.0) == *x).unwrap_or(false),
		},
		_ => compare(a, b) == Ordering::Equal,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!(null), "")]
	#[case(json!(true), "1")]
	#[case(json!(42), "42")]
	#[case(json!("Alice"), "Alice")]
	fn test_to_display(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(to_display(&value), expected);
	}

	#[rstest]
	#[case(json!("2021-01-01"), 2021)]
	#[case(json!("abc"), 0)]
	#[case(json!("-12px"), -12)]
	#[case(json!(3.9), 3)]
	#[case(json!(null), 0)]
	#[case(json!(true), 1)]
	fn test_int_cast(#[case] value: Value, #[case] expected: i64) {
		assert_eq!(int_cast(&value), expected);
	}

	#[rstest]
	fn test_compare_mixed_numeric() {
		assert_eq!(compare(&json!(10), &json!("9")), Ordering::Greater);
		assert_eq!(compare(&json!("10"), &json!("9")), Ordering::Greater);
		assert_eq!(compare(&json!(9), &json!("9")), Ordering::Equal);
		assert_eq!(compare(&json!("x1"), &json!(100)), Ordering::Greater);
		assert_eq!(compare(&json!("NaN"), &json!(1)), Ordering::Greater);
		assert_eq!(compare(&json!(null), &json!(0)), Ordering::Less);
	}

	#[rstest]
	fn test_compare_is_transitive_across_types() {
		let values = [
			json!(null),
			json!(false),
			json!(true),
			json!(-1.5),
			json!("2"),
			json!(9),
			json!("10"),
			json!(" 11 "),
			json!("10a"),
			json!("9a"),
			json!("abc"),
			json!([1]),
			json!({"a": 1}),
		];
		for a in &values {
			for b in &values {
				assert_eq!(compare(a, b), compare(b, a).reverse());
				for c in &values {
					if compare(a, b) != Ordering::Greater && compare(b, c) != Ordering::Greater {
						assert_ne!(compare(a, c), Ordering::Greater, "{a} <= {b} <= {c}");
					}
				}
			}
		}
	}

	#[rstest]
	fn test_loose_eq() {
		assert!(loose_eq(&json!(42), &json!("42")));
		assert!(loose_eq(&json!(true), &json!(1)));
		assert!(!loose_eq(&json!(null), &json!(null)));
		assert!(!loose_eq(&json!("a"), &json!("b")));
	}

	#[rstest]
	fn test_is_empty() {
		assert!(is_empty(&json!("")));
		assert!(is_empty(&json!("0")));
		assert!(is_empty(&json!(0)));
		assert!(!is_empty(&json!("2021-01-01")));
	}
}
