//! ShopHub CLI - a terminal storefront over the shipped catalog.
//!
//! Commands:
//! - `shophub home` - Category navigation, featured products, newsletter signup
//! - `shophub shop` - Browse the listing with filters, sort and paging
//! - `shophub categories` - Category overview with top-rated picks
//! - `shophub deals` - Flash deals, weekly deals and the mega sale
//! - `shophub cart` - The sample cart, with an optional promo code
//! - `shophub auth` - Simulated sign-in, sign-up and Google sign-in
//! - `shophub config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AuthArgs, CartArgs, CategoriesArgs, ConfigArgs, DealsArgs, HomeArgs, ShopArgs};

/// ShopHub CLI - Browse the storefront from a terminal
#[derive(Parser)]
#[command(name = "shophub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the home page
    Home(HomeArgs),

    /// Browse the product listing
    Shop(ShopArgs),

    /// Show categories and their top-rated products
    Categories(CategoriesArgs),

    /// Show current deals
    Deals(DealsArgs),

    /// Show the cart and its totals
    Cart(CartArgs),

    /// Simulate the sign-in dialog
    Auth(AuthArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    init_tracing(&ctx);

    // Execute command
    let result = match cli.command {
        Commands::Home(args) => commands::home::run(args, &ctx).await,
        Commands::Shop(args) => commands::shop::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Deals(args) => commands::deals::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Auth(args) => commands::auth::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`,
/// which wins over `log.level`.
fn init_tracing(ctx: &context::Context) {
    let fallback = if ctx.output.is_verbose() {
        "debug"
    } else {
        ctx.config.log.level.as_str()
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
