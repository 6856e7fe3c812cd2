//! Category overview command.

use anyhow::{bail, Result};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;
use shop_commerce::catalog::{CategoryInfo, Product};

use super::CategoriesArgs;
use crate::context::Context;
use crate::output::stars;

#[derive(Serialize)]
struct CategoryJson<'a> {
    #[serde(flatten)]
    info: &'a CategoryInfo,
    count: usize,
    top_rated: Vec<&'a Product>,
}

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let catalog = &ctx.catalog;

    let categories: Vec<&CategoryInfo> = match &args.name {
        Some(name) => match catalog.category(name) {
            Some(category) => vec![category],
            None => bail!(
                "Unknown category: {} (known: {})",
                name,
                catalog.category_names().collect::<Vec<_>>().join(", ")
            ),
        },
        None => catalog.categories().iter().collect(),
    };

    let summaries: Vec<CategoryJson> = categories
        .into_iter()
        .map(|info| CategoryJson {
            info,
            count: catalog.category_count(&info.name),
            top_rated: catalog.top_rated_in(&info.name, args.top),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&summaries);
        return Ok(());
    }

    ctx.output.header("Shop by Category");
    for summary in &summaries {
        println!();
        ctx.output.info(&format!(
            "{} {} · {} products",
            summary.info.icon, summary.info.name, summary.count
        ));
        ctx.output.kv("about", &summary.info.description);
        ctx.output.kv(
            "browse",
            &format!("shophub shop --query {}", browse_query(&summary.info.name)),
        );

        if summary.top_rated.is_empty() {
            continue;
        }
        ctx.output.kv("best", "");
        for product in &summary.top_rated {
            ctx.output.list_item(&format!(
                "{} · {} · {}",
                product.name,
                product.price.display(),
                stars(product)
            ));
        }
    }

    Ok(())
}

/// Query string that seeds the shop listing with `category`.
pub(super) fn browse_query(category: &str) -> String {
    format!("category={}", utf8_percent_encode(category, NON_ALPHANUMERIC))
}
