use num_bigint::{BigInt, Sign};

/// Radix used for every persisted big integer.
pub const INTEGER_SERIALIZATION_BASE: u32 = 62;

// Digits 0..9, then uppercase, then lowercase, as GMP orders them for
// bases above 36.
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

pub fn encode(value: &BigInt) -> String {
    let (sign, digits) = value.to_radix_be(INTEGER_SERIALIZATION_BASE);

    let mut repr = String::with_capacity(digits.len() + 1);
    if sign == Sign::Minus {
        repr.push('-');
    }
    for digit in digits {
        repr.push(ALPHABET[digit as usize] as char);
    }
    repr
}

pub fn decode(repr: &str) -> Option<BigInt> {
    let (sign, digits) = match repr.strip_prefix('-') {
        Some(rest) => (Sign::Minus, rest),
        None => (Sign::Plus, repr),
    };
    if digits.is_empty() {
        return None;
    }

    let mut buf = Vec::with_capacity(digits.len());
    for c in digits.bytes() {
        let digit = match c {
            b'0'..=b'9' => c - b'0',
            b'A'..=b'Z' => c - b'A' + 10,
            b'a'..=b'z' => c - b'a' + 36,
            _ => return None,
        };
        buf.push(digit);
    }

    BigInt::from_radix_be(sign, &buf, INTEGER_SERIALIZATION_BASE)
}

/// `#[serde(with = "crate::serialize::base62")]` for a [`BigInt`] field.
pub(crate) mod base62 {
    use num_bigint::BigInt;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        let repr = String::deserialize(deserializer)?;
        super::decode(&repr)
            .ok_or_else(|| D::Error::custom(format!("invalid base-62 integer: {repr:?}")))
    }
}

/// `#[serde(with = "crate::serialize::base62_vec")]` for a `Vec<BigInt>` field.
pub(crate) mod base62_vec {
    use num_bigint::BigInt;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(values: &[BigInt], serializer: S) -> Result<S::Ok, S::Error> {
        let reprs: Vec<String> = values.iter().map(super::encode).collect();
        reprs.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<BigInt>, D::Error> {
        let reprs = Vec::<String>::deserialize(deserializer)?;
        reprs
            .iter()
            .map(|repr| {
                super::decode(repr)
                    .ok_or_else(|| D::Error::custom(format!("invalid base-62 integer: {repr:?}")))
            })
            .collect()
    }
}
