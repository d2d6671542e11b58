use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of a batch quote: a provider symbol and its price in the
/// requested quote currency, if the provider returned one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchQuote {
    /// Provider symbol exactly as returned (e.g. "bitcoin")
    pub symbol: String,

    /// Price of one unit in the quote currency. `None` when the provider
    /// listed the symbol without a price.
    pub rate: Option<Decimal>,
}

/// Decodes a JSON number into a `Decimal`.
///
/// Integers are taken exactly; floats go through the shortest decimal
/// representation so `0.9` stays `0.9`. Strings, booleans and null yield `None`.
pub fn decimal_from_json(value: &Value) -> Option<Decimal> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(i) = number.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = number.as_u64() {
        return Some(Decimal::from(u));
    }
    number.as_f64().and_then(Decimal::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_decimal_from_json_float() {
        assert_eq!(decimal_from_json(&json!(0.9)), Some(dec!(0.9)));
        assert_eq!(decimal_from_json(&json!(64250.12)), Some(dec!(64250.12)));
    }

    #[test]
    fn test_decimal_from_json_integer() {
        assert_eq!(decimal_from_json(&json!(1)), Some(dec!(1)));
        assert_eq!(decimal_from_json(&json!(-3)), Some(dec!(-3)));
    }

    #[test]
    fn test_decimal_from_json_rejects_non_numbers() {
        assert_eq!(decimal_from_json(&json!("0.9")), None);
        assert_eq!(decimal_from_json(&json!(null)), None);
        assert_eq!(decimal_from_json(&json!(true)), None);
    }
}
