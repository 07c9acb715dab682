//! # Canonical Encoding
//!
//! Digests are only reproducible if the bytes fed to the hash are. This
//! module pins down one encoding for payloads and for the record preimage.
//!
//! ## Rules
//!
//! 1. Objects: keys sorted by byte order, at every depth.
//! 2. Arrays: element order preserved.
//! 3. Numbers: integers as-is. Floats with no fractional part in
//!    `[-2^63, 2^64)` convert exactly to `i64` or `u64` and are written as
//!    integers (`1.0` → `1`, `-0.0` → `0`, `2^53` float → `9007199254740992`),
//!    so logically equal payloads never diverge on formatting. Other floats
//!    use serde_json's shortest round-trip form.
//! 4. Strings: JSON-escaped, no Unicode normalization.
//! 5. No insignificant whitespace.
//!
//! ## Record preimage
//!
//! ```text
//! [position, previous_digest, timestamp, payload]
//! ```
//!
//! encoded as a canonical JSON array. JSON is self-delimiting, so two
//! different field tuples can never produce the same preimage. Plain string
//! concatenation would make `(1, "23…")` and `(12, "3…")` collide.

use serde_json::{Map, Number, Value};

use crate::crypto::Digest;
use crate::storage::payload::{Payload, Timestamp};

/// 2^63: integral floats in `[-I64_BOUND, I64_BOUND)` convert exactly to `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// 2^64: non-negative integral floats below this convert exactly to `u64`.
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

/// Return a canonical copy of `value` (sorted keys, normalized numbers).
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                if let Some(v) = map.get(key) {
                    sorted.insert(key.clone(), canonicalize(v));
                }
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        Value::Number(n) => Value::Number(normalize_number(n)),
        other => other.clone(),
    }
}

/// Canonical compact JSON text for `value`.
pub fn to_canonical_string(value: &Value) -> String {
    // Display on Value writes compact JSON and cannot fail.
    canonicalize(value).to_string()
}

/// Bytes hashed to seal a record.
pub fn record_preimage(
    position: u64,
    previous_digest: &Digest,
    timestamp: &Timestamp,
    payload: &Payload,
) -> Vec<u8> {
    let tuple = Value::Array(vec![
        Value::from(position),
        Value::String(previous_digest.as_str().to_string()),
        timestamp.to_value(),
        payload.as_value().clone(),
    ]);
    to_canonical_string(&tuple).into_bytes()
}

fn normalize_number(n: &Number) -> Number {
    if n.is_i64() || n.is_u64() {
        return n.clone();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f) => {
            Number::from(f as i64)
        }
        Some(f) if f.fract() == 0.0 && (0.0..U64_BOUND).contains(&f) => Number::from(f as u64),
        _ => n.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_are_sorted_at_every_depth() {
        let v = json!({"b": 1, "a": {"z": true, "m": [ {"y": 1, "x": 2} ]}});
        assert_eq!(
            to_canonical_string(&v),
            r#"{"a":{"m":[{"x":2,"y":1}],"z":true},"b":1}"#
        );
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let a: Value = serde_json::from_str(r#"{"amount":4,"to":"bob"}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"to":"bob","amount":4}"#).unwrap();
        assert_eq!(to_canonical_string(&a), to_canonical_string(&b));
    }

    #[test]
    fn integral_floats_collapse_to_integers() {
        assert_eq!(to_canonical_string(&json!(1.0)), "1");
        assert_eq!(to_canonical_string(&json!(-0.0)), "0");
        assert_eq!(to_canonical_string(&json!(2.5)), "2.5");
    }

    #[test]
    fn large_integral_floats_match_their_integers() {
        let two_53 = 9_007_199_254_740_992u64;
        assert_eq!(
            to_canonical_string(&json!(two_53 as f64)),
            to_canonical_string(&json!(two_53))
        );
        assert_eq!(
            to_canonical_string(&json!(-9_223_372_036_854_775_808.0f64)),
            i64::MIN.to_string()
        );
        // 2^63 no longer fits an i64 but still fits a u64.
        assert_eq!(
            to_canonical_string(&json!(9_223_372_036_854_775_808.0f64)),
            "9223372036854775808"
        );
        // 2^64 fits neither and stays a float.
        assert_ne!(
            to_canonical_string(&json!(18_446_744_073_709_551_616.0f64)),
            "18446744073709551616"
        );
    }

    #[test]
    fn array_order_is_preserved() {
        assert_ne!(
            to_canonical_string(&json!([1, 2])),
            to_canonical_string(&json!([2, 1]))
        );
    }

    #[test]
    fn preimage_has_no_concatenation_ambiguity() {
        let prev = Digest::from_hex_unchecked("23");
        let prev_short = Digest::from_hex_unchecked("3");
        let ts = Timestamp::from("t");
        let p = Payload::from("x");
        assert_ne!(
            record_preimage(1, &prev, &ts, &p),
            record_preimage(12, &prev_short, &ts, &p)
        );
    }

    #[test]
    fn preimage_distinguishes_text_and_numeric_timestamps() {
        let prev = Digest::sentinel();
        let p = Payload::from("x");
        assert_ne!(
            record_preimage(1, &prev, &Timestamp::from("5"), &p),
            record_preimage(1, &prev, &Timestamp::from(5i64), &p)
        );
    }

    #[test]
    fn preimage_layout() {
        let pre = record_preimage(
            2,
            &Digest::sentinel(),
            &Timestamp::from("03/10/2024"),
            &Payload::from(json!({"amount": 10})),
        );
        assert_eq!(
            String::from_utf8(pre).unwrap(),
            r#"[2,"0","03/10/2024",{"amount":10}]"#
        );
    }
}
