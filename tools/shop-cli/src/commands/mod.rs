//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod categories;
pub mod config;
pub mod deals;
pub mod home;
pub mod shop;

use clap::{Args, Subcommand};

/// Arguments for the home command.
#[derive(Args)]
pub struct HomeArgs {
    /// Featured products to show.
    #[arg(long, default_value = "4")]
    pub featured: usize,

    /// Sign up for the newsletter with this email.
    #[arg(long, value_name = "EMAIL")]
    pub subscribe: Option<String>,
}

/// Arguments for the shop command.
#[derive(Args, Default)]
pub struct ShopArgs {
    /// Category filter ("All" for none).
    #[arg(long)]
    pub category: Option<String>,

    /// Brand filter ("All" for none).
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Lowest price, inclusive.
    #[arg(long)]
    pub min: Option<String>,

    /// Highest price, inclusive.
    #[arg(long)]
    pub max: Option<String>,

    /// Sort key: featured, price-low, price-high, rating, newest.
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Navigation query string to seed the category from (e.g. "category=Mobile").
    #[arg(short, long)]
    pub query: Option<String>,

    /// Page to show.
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Products per page (default: shop.per_page).
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Ignore filter flags and show the default listing.
    #[arg(long)]
    pub reset: bool,

    /// One product per block instead of a table.
    #[arg(long)]
    pub list: bool,

    /// Show category and brand counts.
    #[arg(long)]
    pub facets: bool,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Show only this category.
    pub name: Option<String>,

    /// Top-rated products shown per category.
    #[arg(short, long, default_value = "3")]
    pub top: usize,
}

/// Arguments for the deals command.
#[derive(Args)]
pub struct DealsArgs {
    /// Seconds to advance the sale countdown before printing it.
    #[arg(long, default_value = "0")]
    pub elapsed: u64,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    /// Promo code to apply.
    #[arg(long)]
    pub promo: Option<String>,

    /// Catalog product ids to add.
    #[arg(short, long)]
    pub add: Vec<u32>,

    /// Start from an empty cart instead of the sample one.
    #[arg(long)]
    pub empty: bool,

    /// Skip the simulated request latency.
    #[arg(long)]
    pub no_delay: bool,
}

/// Arguments for the auth command.
#[derive(Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,

    /// Skip the simulated request latency.
    #[arg(long, global = true)]
    pub no_delay: bool,
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Sign in with email and password.
    SignIn {
        /// Email address.
        #[arg(short, long)]
        email: String,
        /// Password (prompted for when omitted).
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account.
    SignUp {
        /// Full name.
        #[arg(short, long)]
        name: String,
        /// Email address.
        #[arg(short, long)]
        email: String,
        /// Password (prompted for, with confirmation, when omitted).
        #[arg(short, long)]
        password: Option<String>,
        /// Password confirmation.
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Continue with Google.
    Google,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
