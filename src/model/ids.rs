//! Typed identifiers.
//!
//! Ids are allocated by each resource actor from a `u32` counter and travel over the
//! wire as prefixed strings such as `"product_3"`. Parsing also accepts the bare number.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A string that does not name an entity of the expected kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid id: {0}")]
pub struct InvalidId(pub String);

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(into = "String", try_from = "String")]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }

        impl FromStr for $name {
            type Err = InvalidId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix(concat!($prefix, "_")).unwrap_or(s);
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(InvalidId(s.to_string()));
                }
                digits
                    .parse()
                    .map(Self)
                    .map_err(|_| InvalidId(s.to_string()))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidId;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }
    };
}

entity_id! {
    /// Identifier of an [`Account`](super::Account).
    AccountId => "account"
}

entity_id! {
    /// Identifier of a [`Product`](super::Product).
    ProductId => "product"
}

entity_id! {
    /// Identifier of an [`Order`](super::Order).
    OrderId => "order"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        assert_eq!(ProductId(3).to_string(), "product_3");
        assert_eq!("product_3".parse::<ProductId>(), Ok(ProductId(3)));
        assert_eq!("7".parse::<OrderId>(), Ok(OrderId(7)));
    }

    #[test]
    fn test_rejects_foreign_prefixes_and_garbage() {
        assert!("order_3".parse::<ProductId>().is_err());
        assert!("product_".parse::<ProductId>().is_err());
        assert!("+4".parse::<AccountId>().is_err());
        assert!("64f1c2".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&AccountId(12)).unwrap();
        assert_eq!(json, "\"account_12\"");
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AccountId(12));
    }
}
