//! Cart command.

use anyhow::{Context as _, Result};
use serde::Serialize;
use shop_commerce::cart::{Cart, CartPricing, LineItem, PromoCode};
use shop_commerce::session::{Delay, NoDelay, PromoEntry, TaskState, TokioDelay};
use shop_commerce::{CommerceError, ProductId};

use super::CartArgs;
use crate::context::Context;
use crate::output::task_badge;

#[derive(Serialize)]
struct CartJson<'a> {
    items: &'a [LineItem],
    #[serde(skip_serializing_if = "Option::is_none")]
    promo: Option<&'a TaskState<PromoCode, String>>,
    pricing: CartPricing,
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    ctx.require_valid_config()?;
    let rules = ctx.config.pricing_rules()?;
    let timings = ctx.config.session_timings();

    let mut cart = if args.empty { Cart::new() } else { Cart::demo() };
    for id in &args.add {
        let product = ctx.catalog.require(ProductId::new(*id))?;
        cart.add_product(product, 1)
            .with_context(|| format!("Failed to add {}", product.name))?;
    }

    let promo_state = match &args.promo {
        Some(code) => {
            let delay: &dyn Delay = if args.no_delay { &NoDelay } else { &TokioDelay };
            let mut entry = PromoEntry::new(timings.promo).with_input(code.clone());

            let spinner = ctx.output.spinner("Applying promo code...");
            let state = entry.apply(&mut cart, delay).await.clone();
            spinner.finish_and_clear();
            Some(state)
        }
        None => None,
    };

    let pricing = cart.calculate_pricing(&rules)?;

    if ctx.output.is_json() {
        let promo = promo_state.as_ref().map(stringify_error);
        ctx.output.json(&CartJson {
            items: &cart.items,
            promo: promo.as_ref(),
            pricing,
        });
        return Ok(());
    }

    ctx.output.header(&format!("Shopping Cart ({} items)", cart.item_count()));

    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        ctx.output.info("Browse products with `shophub shop`.");
        return Ok(());
    }

    for item in &cart.items {
        let variant: Vec<&str> = [item.color.as_deref(), item.size.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        let line_total = item.total_price()?;
        ctx.output.list_item(&format!(
            "{} x{} · {}{}",
            item.name,
            item.quantity,
            line_total.display(),
            if variant.is_empty() {
                String::new()
            } else {
                format!(" ({})", variant.join(", "))
            }
        ));
    }

    if let Some(state) = &promo_state {
        ctx.output.kv("promo", &task_badge(state));
        match state {
            TaskState::Resolved(promo) => ctx
                .output
                .success(&format!("Promo code {} applied", promo)),
            TaskState::Rejected(err) => ctx.output.warn(&err.to_string()),
            TaskState::Idle | TaskState::Pending => {}
        }
    }

    ctx.output.header("Order Summary");
    ctx.output.kv("subtotal", &pricing.subtotal.display());
    if pricing.savings.is_positive() {
        ctx.output.kv("you save", &pricing.savings.display());
    }
    if pricing.has_promo() {
        ctx.output
            .kv("promo discount", &format!("-{}", pricing.promo_discount.display()));
    }
    ctx.output.kv(
        "shipping",
        &if pricing.has_free_shipping() {
            "FREE".to_string()
        } else {
            pricing.shipping.display()
        },
    );
    ctx.output.kv("tax", &pricing.tax.display());
    ctx.output.kv("total", &pricing.grand_total.display());

    if !pricing.has_free_shipping() {
        ctx.output.info(&format!(
            "Free shipping on orders over {}",
            rules.free_shipping_threshold.display()
        ));
    }

    Ok(())
}

fn stringify_error(state: &TaskState<PromoCode, CommerceError>) -> TaskState<PromoCode, String> {
    match state {
        TaskState::Idle => TaskState::Idle,
        TaskState::Pending => TaskState::Pending,
        TaskState::Resolved(promo) => TaskState::Resolved(*promo),
        TaskState::Rejected(err) => TaskState::Rejected(err.to_string()),
    }
}
