//! Serde adapter for `f64` fields that may legitimately be infinite or NaN.
//!
//! JSON has no literal for non-finite numbers and `serde_json` writes them as
//! `null`. Fields using this adapter write finite values as numbers and the
//! others as the strings `"inf"`, `"-inf"` and `"NaN"`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Text(String),
}

pub(crate) fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let repr = if value.is_finite() {
        Repr::Number(*value)
    } else if value.is_nan() {
        Repr::Text("NaN".to_string())
    } else if value.is_sign_positive() {
        Repr::Text("inf".to_string())
    } else {
        Repr::Text("-inf".to_string())
    };
    repr.serialize(serializer)
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Repr::deserialize(deserializer)? {
        Repr::Number(value) => Ok(value),
        Repr::Text(text) => match text.as_str() {
            "inf" => Ok(f64::INFINITY),
            "-inf" => Ok(f64::NEG_INFINITY),
            "NaN" => Ok(f64::NAN),
            other => Err(serde::de::Error::custom(format!(
                "expected a number, \"inf\", \"-inf\" or \"NaN\", found \"{}\"",
                other
            ))),
        },
    }
}
