//! Newtype IDs for type-safe identifiers.
//!
//! Catalog records carry numeric ids assigned when the dataset is authored,
//! so ids are never generated at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate numeric newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A numeric identifier.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create an ID from its raw value.
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw value.
            pub const fn get(&self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(ProductId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new(7);
        assert_eq!(id.get(), 7);
    }

    #[test]
    fn test_id_from_str() {
        let id: ProductId = " 12 ".parse().unwrap();
        assert_eq!(id, ProductId::new(12));
        assert!("twelve".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ProductId::new(789).to_string(), "789");
    }

    #[test]
    fn test_id_serializes_as_number() {
        let json = serde_json::to_string(&ProductId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
