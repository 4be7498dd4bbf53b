use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A value read once from live contract state.
///
/// A reverted read is recorded as `Unavailable` instead of aborting the event:
/// the entity is still created and later arithmetic on this field is skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Observed<T> {
    Available(T),
    Unavailable,
}

impl<T> Observed<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Observed::Available(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Observed::Unavailable)
    }

    pub fn as_ref(&self) -> Observed<&T> {
        match self {
            Observed::Available(v) => Observed::Available(v),
            Observed::Unavailable => Observed::Unavailable,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Observed<U> {
        match self {
            Observed::Available(v) => Observed::Available(f(v)),
            Observed::Unavailable => Observed::Unavailable,
        }
    }

    /// Apply a fallible update to an available value, leave `Unavailable` untouched.
    pub fn try_map<U, E, F: FnOnce(T) -> Result<U, E>>(self, f: F) -> Result<Observed<U>, E> {
        match self {
            Observed::Available(v) => f(v).map(Observed::Available),
            Observed::Unavailable => Ok(Observed::Unavailable),
        }
    }

    pub fn available(self) -> Option<T> {
        match self {
            Observed::Available(v) => Some(v),
            Observed::Unavailable => None,
        }
    }
}

impl<T> From<Option<T>> for Observed<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Observed::Available(v),
            None => Observed::Unavailable,
        }
    }
}

impl<T: Display> Display for Observed<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Observed::Available(v) => write!(f, "{}", v),
            Observed::Unavailable => write!(f, "unavailable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_map_skips_unavailable() {
        let missing: Observed<u64> = Observed::Unavailable;
        let updated: Result<_, ()> = missing.try_map(|v| Ok(v - 1));
        assert_eq!(updated, Ok(Observed::Unavailable));

        let present = Observed::Available(5u64);
        let failed: Result<Observed<u64>, &str> = present.try_map(|_| Err("underflow"));
        assert_eq!(failed, Err("underflow"));
    }

    #[test]
    fn test_json_form() {
        let value = Observed::Available(3u8);
        assert_eq!(serde_json::to_string(&value).unwrap(), "{\"available\":3}");
        let missing: Observed<u8> = Observed::Unavailable;
        assert_eq!(serde_json::to_string(&missing).unwrap(), "\"unavailable\"");
    }
}
