use primitive_types::U256;
use serde::de::{Error as SerdeError, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Invalid amount '{0}'")]
    Invalid(String),
}

/// Unsigned 256 bits integer as emitted by contracts (token amounts, wei, timestamps).
///
/// Human readable formats (JSON) use a decimal string, binary formats use
/// the 32 bytes big-endian representation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(U256);

impl Amount {
    pub const fn zero() -> Self {
        Amount(U256::zero())
    }

    pub fn new(value: U256) -> Self {
        Amount(value)
    }

    pub fn inner(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        Amount(U256::from_big_endian(bytes))
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        // limbs are little-endian u64 words
        for (i, limb) in self.0 .0.iter().enumerate() {
            let start = (3 - i) * 8;
            bytes[start..start + 8].copy_from_slice(&limb.to_be_bytes());
        }
        bytes
    }

    /// Narrow to u64, `None` if the value does not fit.
    pub fn as_u64(&self) -> Option<u64> {
        if self.0 > U256::from(u64::MAX) {
            None
        } else {
            Some(self.0.low_u64())
        }
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(U256::from(value))
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Amount(value)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) if !hex.is_empty() => U256::from_str_radix(hex, 16).ok(),
            Some(_) => None,
            None => U256::from_dec_str(s).ok(),
        };

        parsed
            .map(Amount)
            .ok_or_else(|| AmountError::Invalid(s.to_owned()))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            self.to_be_bytes().serialize(serializer)
        }
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "a decimal string, a 0x-prefixed hex string or an unsigned integer")
    }

    fn visit_u64<E: SerdeError>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Amount::from(v))
    }

    fn visit_str<E: SerdeError>(self, v: &str) -> Result<Self::Value, E> {
        Amount::from_str(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(AmountVisitor)
        } else {
            let bytes = <[u8; 32]>::deserialize(deserializer)?;
            Ok(Amount::from_be_bytes(&bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_and_hex() {
        assert_eq!("500".parse::<Amount>().unwrap(), Amount::from(500));
        assert_eq!("0x1f4".parse::<Amount>().unwrap(), Amount::from(500));
        assert!("0x".parse::<Amount>().is_err());
        assert!("-1".parse::<Amount>().is_err());
    }

    #[test]
    fn test_json_accepts_numbers_and_strings() {
        let a: Amount = serde_json::from_str("42").unwrap();
        let b: Amount = serde_json::from_str("\"42\"").unwrap();
        let c: Amount = serde_json::from_str("\"0x2a\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"42\"");
    }

    #[test]
    fn test_bincode_uses_big_endian_bytes() {
        let value = Amount::from(0x0102u64);
        let bytes = bincode::serialize(&value).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[30..], &[0x01, 0x02]);
        let back: Amount = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_checked_arithmetic() {
        let ten = Amount::from(10);
        assert_eq!(ten.checked_sub(Amount::from(11)), None);
        assert_eq!(ten.checked_sub(Amount::from(4)), Some(Amount::from(6)));
        let max = Amount::new(U256::MAX);
        assert_eq!(max.checked_add(Amount::from(1)), None);
        assert_eq!(max.as_u64(), None);
        assert_eq!(ten.as_u64(), Some(10));
    }
}
