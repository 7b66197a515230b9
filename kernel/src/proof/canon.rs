//! Canonical JSON bytes: the single serialization-for-hashing implementation.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (byte order), at every depth.
//! 2. Compact form, no whitespace (`{"a":1,"b":[2,3]}`).
//! 3. Strings use `serde_json`'s RFC 8259 escaping.
//! 4. Numbers must be integers (`i64` or `u64`). Floats are rejected so that
//!    digests never depend on float formatting.
//!
//! Key order is enforced here rather than relying on `serde_json::Map`
//! iteration order, which changes if any crate in the build enables
//! `preserve_order`.

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// A JSON number was not an integer.
    NonIntegerNumber { raw: String },
    /// A string could not be encoded (never expected for valid UTF-8).
    StringEncoding { detail: String },
}

impl std::fmt::Display for CanonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonIntegerNumber { raw } => {
                write!(f, "non-integer number in canonical JSON: {raw}")
            }
            Self::StringEncoding { detail } => {
                write!(f, "string encoding failed in canonical JSON: {detail}")
            }
        }
    }
}

impl std::error::Error for CanonError {}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number in `value` is not
/// representable as `i64` or `u64`.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    let mut out = Vec::with_capacity(256);
    emit(&mut out, value)?;
    Ok(out)
}

fn emit(out: &mut Vec<u8>, value: &serde_json::Value) -> Result<(), CanonError> {
    use serde_json::Value;

    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => {
            if n.is_f64() {
                return Err(CanonError::NonIntegerNumber { raw: n.to_string() });
            }
            out.extend_from_slice(n.to_string().as_bytes());
        }
        Value::String(s) => emit_str(out, s)?,
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                emit(out, item)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                emit_str(out, key)?;
                out.push(b':');
                emit(out, item)?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}

fn emit_str(out: &mut Vec<u8>, s: &str) -> Result<(), CanonError> {
    serde_json::to_writer(&mut *out, s).map_err(|e| CanonError::StringEncoding {
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_sorted_at_every_depth() {
        let v = json!({"open": {"size": 2, "keys": ["b", "a"]}, "closed": 1});
        let bytes = canonical_json_bytes(&v).unwrap();
        assert_eq!(bytes, br#"{"closed":1,"open":{"keys":["b","a"],"size":2}}"#);
    }

    #[test]
    fn parse_whitespace_does_not_leak() {
        let spaced: serde_json::Value =
            serde_json::from_str("{ \"g\" : 1 ,\n \"f\" : [ 2 , 3 ] }").unwrap();
        assert_eq!(canonical_json_bytes(&spaced).unwrap(), br#"{"f":[2,3],"g":1}"#);
    }

    #[test]
    fn rejects_float() {
        let err = canonical_json_bytes(&json!({"h": 0.5})).unwrap_err();
        assert!(matches!(err, CanonError::NonIntegerNumber { .. }));
    }

    #[test]
    fn integers_and_literals() {
        let v = json!({"a": -3, "b": u64::MAX, "c": null, "d": true, "e": false});
        let expected = format!(r#"{{"a":-3,"b":{},"c":null,"d":true,"e":false}}"#, u64::MAX);
        assert_eq!(canonical_json_bytes(&v).unwrap(), expected.as_bytes());
    }

    #[test]
    fn strings_are_escaped() {
        let v = json!({"msg": "ON(B,A)\n\"held\"\u{0001}"});
        assert_eq!(
            canonical_json_bytes(&v).unwrap(),
            br#"{"msg":"ON(B,A)\n\"held\"\u0001"}"#
        );
    }

    #[test]
    fn unicode_passes_through() {
        let v = json!(["Expanding → right"]);
        let bytes = canonical_json_bytes(&v).unwrap();
        assert_eq!(std::str::from_utf8(&bytes).unwrap(), r#"["Expanding → right"]"#);
    }
}
