//! Scalar value coercion for untyped query parameter operands.

use serde_json::Value;

/// Infer a typed value from a raw string operand.
///
/// The literal strings `"true"` and `"false"` become booleans, `"null"`
/// becomes an explicit null (distinguished from an absent key), a string that
/// parses fully as a number becomes a number, and anything else passes
/// through unchanged.
pub fn coerce(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => {
            if let Ok(int) = raw.parse::<i64>() {
                return Value::from(int);
            }
            if let Ok(float) = raw.parse::<f64>() {
                if float.is_finite() {
                    return Value::from(float);
                }
            }
            Value::from(raw)
        }
    }
}

/// Coerce each element of a pre-split multi-valued operand.
pub fn coerce_all<'a>(parts: impl Iterator<Item = &'a str>) -> Value {
    Value::Array(parts.map(coerce).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use similar_asserts::assert_eq;

    #[test]
    fn coerces_booleans_and_null() {
        assert_eq!(coerce("true"), json!(true));
        assert_eq!(coerce("false"), json!(false));
        assert_eq!(coerce("null"), json!(null));
    }

    #[test]
    fn coerces_numbers() {
        assert_eq!(coerce("1"), json!(1));
        assert_eq!(coerce("-12"), json!(-12));
        assert_eq!(coerce("1.5"), json!(1.5));
    }

    #[test]
    fn passes_plain_strings_through() {
        assert_eq!(coerce("%3%"), json!("%3%"));
        assert_eq!(coerce("12abc"), json!("12abc"));
        assert_eq!(coerce("NaN"), json!("NaN"));
    }

    #[test]
    fn coerces_each_list_element() {
        assert_eq!(
            coerce_all("1:true:x".split(':')),
            json!([1, true, "x"])
        );
    }
}
