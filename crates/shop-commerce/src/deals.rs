//! Deal sections and the sale countdown.
//!
//! Sections select from the catalog by the authored `discount` percentage,
//! never by comparing `price` with `original_price`.

use crate::catalog::{Catalog, Product};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Products shown as flash deals.
pub const FLASH_DEAL_COUNT: usize = 4;
/// Products shown as weekly deals.
pub const WEEKLY_DEAL_COUNT: usize = 6;
/// Products shown in the mega sale banner.
pub const MEGA_SALE_COUNT: usize = 3;

/// Discounts above 15%, biggest first, ties in catalog order.
pub fn flash_deals(catalog: &Catalog) -> Vec<&Product> {
    let mut deals: Vec<&Product> = catalog.products().iter().filter(|p| p.discount > 15).collect();
    deals.sort_by(|a, b| b.discount.cmp(&a.discount));
    deals.truncate(FLASH_DEAL_COUNT);
    deals
}

/// Discounts in `(10, 15]`, catalog order.
pub fn weekly_deals(catalog: &Catalog) -> Vec<&Product> {
    catalog
        .products()
        .iter()
        .filter(|p| p.discount > 10 && p.discount <= 15)
        .take(WEEKLY_DEAL_COUNT)
        .collect()
}

/// Discounts above 20%, catalog order.
pub fn mega_sale(catalog: &Catalog) -> Vec<&Product> {
    catalog
        .products()
        .iter()
        .filter(|p| p.discount > 20)
        .take(MEGA_SALE_COUNT)
        .collect()
}

/// Time left on the current sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Countdown {
    pub const fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Advance one second. Stays at zero once expired.
    pub fn tick(&mut self) {
        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = 59;
        } else if self.hours > 0 {
            self.hours -= 1;
            self.minutes = 59;
            self.seconds = 59;
        }
    }

    pub fn is_expired(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// Remaining time in seconds.
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(23, 45, 30)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: &[&Product]) -> Vec<u32> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_sections_over_shipped_catalog() {
        let catalog = Catalog::shipped().unwrap();
        assert_eq!(ids(&flash_deals(&catalog)), vec![6, 3, 9, 2]);
        assert_eq!(ids(&weekly_deals(&catalog)), vec![1, 5, 7, 8, 10, 11]);
        assert_eq!(ids(&mega_sale(&catalog)), vec![6]);
    }

    #[test]
    fn test_countdown_borrows() {
        let mut countdown = Countdown::new(1, 0, 0);
        countdown.tick();
        assert_eq!(countdown, Countdown::new(0, 59, 59));

        let mut countdown = Countdown::new(0, 2, 0);
        countdown.tick();
        assert_eq!(countdown, Countdown::new(0, 1, 59));
    }

    #[test]
    fn test_countdown_stops_at_zero() {
        let mut countdown = Countdown::new(0, 0, 1);
        countdown.tick();
        assert!(countdown.is_expired());
        countdown.tick();
        assert_eq!(countdown, Countdown::new(0, 0, 0));
    }

    #[test]
    fn test_default_countdown() {
        let countdown = Countdown::default();
        assert_eq!(countdown.to_string(), "23:45:30");
        assert_eq!(countdown.total_seconds(), 85530);
    }
}
