//! CLI configuration.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use shop_commerce::search::{ResetBounds, DEFAULT_PER_PAGE};
use shop_commerce::session::SessionTimings;
use shop_commerce::{cart::PricingRules, Money};

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["shophub.toml", ".shophub.toml", "shophub.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Shop listing settings.
    #[serde(default)]
    pub shop: ShopConfig,

    /// Cart pricing and promo settings.
    #[serde(default)]
    pub cart: CartConfig,

    /// Simulated sign-in settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Shipping and tax rules for the cart page.
    pub fn pricing_rules(&self) -> Result<PricingRules> {
        Ok(PricingRules {
            free_shipping_threshold: parse_money(
                "cart.free_shipping_threshold",
                &self.cart.free_shipping_threshold,
            )?,
            flat_shipping: parse_money("cart.flat_shipping", &self.cart.flat_shipping)?,
            tax_rate: self.cart.tax_rate,
        })
    }

    /// Latencies of the simulated requests.
    pub fn session_timings(&self) -> SessionTimings {
        SessionTimings {
            sign_in: Duration::from_millis(self.auth.sign_in_delay_ms),
            google: Duration::from_millis(self.auth.google_delay_ms),
            promo: Duration::from_millis(self.cart.promo_delay_ms),
        }
    }

    /// The interval both the default listing and a reset use.
    pub fn reset_bounds(&self) -> Result<ResetBounds> {
        let ceiling = parse_money("shop.price_ceiling", &self.shop.price_ceiling)?;
        Ok(match self.shop.price_bounds {
            PriceBounds::Fixed => ResetBounds::fixed(ceiling),
            PriceBounds::Catalog => ResetBounds::Catalog,
        })
    }
}

fn parse_money(key: &str, value: &str) -> Result<Money> {
    Money::parse(value, shop_commerce::Currency::USD)
        .with_context(|| format!("{} must be a non-negative amount, got {:?}", key, value))
}

/// Shop listing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Products per page.
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Interval restored by a reset: "fixed" or "catalog".
    #[serde(default)]
    pub price_bounds: PriceBounds,

    /// Upper bound of the fixed interval.
    #[serde(default = "default_price_ceiling")]
    pub price_ceiling: String,
}

/// How `shop.price_bounds` picks the reset interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceBounds {
    /// `[0, shop.price_ceiling]`.
    #[default]
    Fixed,
    /// Cheapest to dearest product.
    Catalog,
}

impl PriceBounds {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBounds::Fixed => "fixed",
            PriceBounds::Catalog => "catalog",
        }
    }
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

fn default_price_ceiling() -> String {
    "3000".to_string()
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            price_bounds: PriceBounds::default(),
            price_ceiling: default_price_ceiling(),
        }
    }
}

/// Cart pricing and promo settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// Subtotals above this ship free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: String,

    /// Shipping charged below the threshold.
    #[serde(default = "default_flat_shipping")]
    pub flat_shipping: String,

    /// Tax rate as a fraction.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// Simulated promo validation latency.
    #[serde(default = "default_promo_delay_ms")]
    pub promo_delay_ms: u64,
}

fn default_free_shipping_threshold() -> String {
    "99".to_string()
}

fn default_flat_shipping() -> String {
    "9.99".to_string()
}

fn default_tax_rate() -> f64 {
    0.08
}

fn default_promo_delay_ms() -> u64 {
    1000
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: default_free_shipping_threshold(),
            flat_shipping: default_flat_shipping(),
            tax_rate: default_tax_rate(),
            promo_delay_ms: default_promo_delay_ms(),
        }
    }
}

/// Simulated sign-in settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_sign_in_delay_ms")]
    pub sign_in_delay_ms: u64,

    #[serde(default = "default_google_delay_ms")]
    pub google_delay_ms: u64,
}

fn default_sign_in_delay_ms() -> u64 {
    1500
}

fn default_google_delay_ms() -> u64 {
    2000
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            sign_in_delay_ms: default_sign_in_delay_ms(),
            google_delay_ms: default_google_delay_ms(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Check a config for values the commands would reject.
pub fn validate(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.shop.per_page == 0 {
        errors.push("shop.per_page must be at least 1".to_string());
    }
    if let Err(e) = config.reset_bounds() {
        errors.push(format!("{:#}", e));
    }
    if let Err(e) = config.pricing_rules() {
        errors.push(format!("{:#}", e));
    }
    if !(0.0..=1.0).contains(&config.cart.tax_rate) {
        errors.push("cart.tax_rate must be a fraction between 0 and 1".to_string());
    }
    if config.auth.sign_in_delay_ms > 10_000 || config.auth.google_delay_ms > 10_000 {
        warnings.push("auth delays above 10s make the dialog feel stuck".to_string());
    }

    (errors, warnings)
}

/// Fail unless the config is usable.
pub fn ensure_valid(config: &CliConfig) -> Result<()> {
    let (errors, _) = validate(config);
    if let Some(first) = errors.first() {
        bail!("Invalid configuration: {}", first);
    }
    Ok(())
}

/// Generate a default shophub.toml config file.
pub fn generate_default_config() -> String {
    r#"# ShopHub storefront configuration

[shop]
per_page = 12
# "fixed" resets the price filter to [0, price_ceiling];
# "catalog" resets it to the cheapest and dearest product.
price_bounds = "fixed"
price_ceiling = "3000"

[cart]
free_shipping_threshold = "99"
flat_shipping = "9.99"
tax_rate = 0.08
promo_delay_ms = 1000

[auth]
sign_in_delay_ms = 1500
google_delay_ms = 2000

[log]
level = "warn"
"#
    .to_string()
}
