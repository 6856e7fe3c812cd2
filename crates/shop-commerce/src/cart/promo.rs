//! Promo codes.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A recognised promo code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PromoCode {
    /// 10% off the subtotal.
    Save10,
}

impl PromoCode {
    /// Canonical code as entered by shoppers.
    pub fn code(&self) -> &'static str {
        match self {
            PromoCode::Save10 => "SAVE10",
        }
    }

    /// Percentage taken off the subtotal.
    pub fn percent_off(&self) -> f64 {
        match self {
            PromoCode::Save10 => 10.0,
        }
    }

    /// Discount this code grants on a subtotal.
    pub fn discount(&self, subtotal: &Money) -> Money {
        subtotal.percentage(self.percent_off())
    }
}

impl FromStr for PromoCode {
    type Err = CommerceError;

    /// Codes match case-insensitively; whitespace is not stripped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SAVE10" => Ok(PromoCode::Save10),
            _ => Err(CommerceError::InvalidPromoCode(s.to_string())),
        }
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
