//! Lenient serde adapters for request payloads
//!
//! Clients send numbers either as JSON numbers or numeric strings
//! (`"19.99"`, `"5"`), and ids either as strings or integers.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

/// Trim a required string
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Trim an optional string
pub fn trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()))
}

/// Accept `"3"` or `3` as an identifier
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(n) => Ok(n.to_string()),
        NumberOrString::Float(f) if f.fract() == 0.0 => Ok(format!("{}", f as i64)),
        NumberOrString::Float(f) => Err(de::Error::invalid_value(
            Unexpected::Float(f),
            &"a string or integer id",
        )),
        NumberOrString::Str(s) => Ok(s.trim().to_string()),
    }
}

/// Accept `5`, `5.0` or `"5"` as an integer; anything else is rejected
pub fn integer_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<NumberOrString>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match raw {
        NumberOrString::Int(n) => Ok(Some(n)),
        NumberOrString::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(Some(f as i64)),
        NumberOrString::Float(f) => Err(de::Error::invalid_value(
            Unexpected::Float(f),
            &"an integer",
        )),
        NumberOrString::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(&s), &"an integer")),
    }
}

/// Accept `19.99` or `"19.99"` as a decimal amount
pub fn decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<NumberOrString>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match raw {
        NumberOrString::Int(n) => Ok(Some(Decimal::from(n))),
        NumberOrString::Float(f) => float_to_decimal(f)
            .map(Some)
            .ok_or_else(|| de::Error::invalid_value(Unexpected::Float(f), &"a decimal amount")),
        NumberOrString::Str(s) => Decimal::from_str(s.trim())
            .map(Some)
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(&s), &"a decimal amount")),
    }
}

/// Shortest decimal that prints like the float (`19.99`, not `19.989999...`)
fn float_to_decimal(f: f64) -> Option<Decimal> {
    if !f.is_finite() {
        return None;
    }
    Decimal::from_str(&f.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(f))
}

/// Money stored and sent as a JSON number
///
/// Serializing fails unless the number reads back as the same amount.
pub mod money {
    use super::*;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let f = value
            .to_f64()
            .ok_or_else(|| serde::ser::Error::custom("amount out of range"))?;
        if float_to_decimal(f) != Some(*value) {
            return Err(serde::ser::Error::custom(format!(
                "amount {value} cannot be stored exactly"
            )));
        }
        serializer.serialize_f64(f)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        decimal_opt(deserializer)?.ok_or_else(|| de::Error::custom("amount is required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[derive(Deserialize)]
    struct Lenient {
        #[serde(default, deserialize_with = "integer_opt")]
        qty: Option<i64>,
        #[serde(default, deserialize_with = "decimal_opt")]
        price: Option<Decimal>,
        #[serde(default, deserialize_with = "trimmed_opt")]
        name: Option<String>,
    }

    #[derive(Serialize, Deserialize)]
    struct Priced {
        #[serde(with = "money")]
        price: Decimal,
    }

    #[derive(Deserialize)]
    struct Line {
        #[serde(deserialize_with = "id_string")]
        product_id: String,
    }

    #[test]
    fn test_numbers_from_strings() {
        let v: Lenient =
            serde_json::from_str(r#"{"qty":"7","price":"19.99","name":"  mug "}"#).unwrap();
        assert_eq!(v.qty, Some(7));
        assert_eq!(v.price, Some(dec("19.99")));
        assert_eq!(v.name.as_deref(), Some("mug"));
    }

    #[test]
    fn test_numbers_from_numbers() {
        let v: Lenient = serde_json::from_str(r#"{"qty":3,"price":12.99}"#).unwrap();
        assert_eq!(v.qty, Some(3));
        assert_eq!(v.price, Some(dec("12.99")));
        assert!(v.name.is_none());
    }

    #[test]
    fn test_rejects_fractional_integer() {
        assert!(serde_json::from_str::<Lenient>(r#"{"qty":1.5}"#).is_err());
        assert!(serde_json::from_str::<Lenient>(r#"{"qty":"abc"}"#).is_err());
    }

    #[test]
    fn test_money_is_json_number() {
        let json = serde_json::to_string(&Priced { price: dec("59.99") }).unwrap();
        assert_eq!(json, r#"{"price":59.99}"#);
        let back: Priced = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price, dec("59.99"));
    }

    #[test]
    fn test_money_refuses_lossy_amounts() {
        assert!(serde_json::to_string(&Priced { price: Decimal::MAX }).is_err());
        assert!(serde_json::to_string(&Priced { price: dec("12345678901234567.89") }).is_err());

        let json = serde_json::to_string(&Priced { price: dec("1000000000000") }).unwrap();
        let back: Priced = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price, dec("1000000000000"));
        let json = serde_json::to_string(&Priced { price: dec("999999999999.99") }).unwrap();
        let back: Priced = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price, dec("999999999999.99"));
    }

    #[test]
    fn test_id_from_integer() {
        let line: Line = serde_json::from_str(r#"{"product_id":1}"#).unwrap();
        assert_eq!(line.product_id, "1");
        let line: Line = serde_json::from_str(r#"{"product_id":"4"}"#).unwrap();
        assert_eq!(line.product_id, "4");
    }
}
