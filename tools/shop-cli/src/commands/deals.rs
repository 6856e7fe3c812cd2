//! Deals command.

use anyhow::Result;
use serde::Serialize;
use shop_commerce::catalog::Product;
use shop_commerce::deals::{flash_deals, mega_sale, weekly_deals, Countdown};

use super::DealsArgs;
use crate::context::Context;
use crate::output::format_duration;

#[derive(Serialize)]
struct DealsJson<'a> {
    countdown: Countdown,
    flash: Vec<&'a Product>,
    weekly: Vec<&'a Product>,
    mega: Vec<&'a Product>,
}

/// Run the deals command.
pub async fn run(args: DealsArgs, ctx: &Context) -> Result<()> {
    let mut countdown = Countdown::default();
    for _ in 0..args.elapsed.min(countdown.total_seconds()) {
        countdown.tick();
    }

    let deals = DealsJson {
        countdown,
        flash: flash_deals(&ctx.catalog),
        weekly: weekly_deals(&ctx.catalog),
        mega: mega_sale(&ctx.catalog),
    };

    if ctx.output.is_json() {
        ctx.output.json(&deals);
        return Ok(());
    }

    ctx.output.header("Flash Deals");
    if countdown.is_expired() {
        ctx.output.warn("This sale has ended");
    } else {
        ctx.output.kv("ends in", &countdown.to_string());
    }
    print_section(&deals.flash, ctx);

    ctx.output.header("Weekly Deals");
    print_section(&deals.weekly, ctx);

    ctx.output.header("Mega Sale");
    if !countdown.is_expired() {
        ctx.output.kv(
            "ends in",
            &format_duration(countdown.total_seconds()),
        );
    }
    print_section(&deals.mega, ctx);

    Ok(())
}

fn print_section(products: &[&Product], ctx: &Context) {
    if products.is_empty() {
        ctx.output.info("No deals right now");
        return;
    }
    for product in products {
        let was = product
            .original_price
            .map(|p| format!(" (was {})", p.display()))
            .unwrap_or_default();
        ctx.output.list_item(&format!(
            "-{}% {} · {}{}",
            product.discount,
            product.name,
            product.price.display(),
            was
        ));
    }
}
