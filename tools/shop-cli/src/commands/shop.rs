//! Shop listing command.

use anyhow::{Context as _, Result};
use serde::Serialize;
use shop_commerce::catalog::{Catalog, Product};
use shop_commerce::search::{
    Facet, Pagination, PriceRange, SearchResults, Selection, ShopQuery, SortOption,
};
use shop_commerce::view::{ShopView, ViewMode};
use shop_commerce::{Currency, Money};

use super::ShopArgs;
use crate::config::CliConfig;
use crate::context::Context;
use crate::output::stars;

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    ctx.require_valid_config()?;
    let view = build_view(&args, &ctx.config, &ctx.catalog)?;
    let results = view.results(&ctx.catalog);
    let facets = args.facets.then(|| view.facets(&ctx.catalog));

    if ctx.output.is_json() {
        ctx.output.json(&ListingJson {
            query: &view.query,
            products: &results.items,
            pagination: results.pagination,
            facets: facets.as_ref().map(|f| [&f.categories, &f.brands]),
        });
        return Ok(());
    }

    print_listing(&view, &results, ctx);

    if let Some(facets) = facets {
        print_facet(&facets.categories, ctx);
        print_facet(&facets.brands, ctx);
    }

    Ok(())
}

#[derive(Serialize)]
struct ListingJson<'a> {
    query: &'a ShopQuery,
    products: &'a [&'a Product],
    pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    facets: Option<[&'a Facet; 2]>,
}

/// Turn the flags into view state.
fn build_view(args: &ShopArgs, config: &CliConfig, catalog: &Catalog) -> Result<ShopView> {
    let bounds = config.reset_bounds()?;
    let per_page = args.per_page.unwrap_or(config.shop.per_page);

    let mut view = match &args.query {
        Some(qs) => ShopView::from_query_string(qs, bounds, catalog),
        None => ShopView::new(bounds, catalog),
    }
    .with_per_page(per_page);

    if args.list {
        view.view_mode = ViewMode::List;
    }

    if args.reset {
        tracing::debug!("--reset given, ignoring filter flags");
        view.clear_filters(catalog);
        return Ok(view);
    }

    if let Some(category) = &args.category {
        view.select_category(category);
    }
    if let Some(brand) = &args.brand {
        view.select_brand(brand);
    }
    if args.min.is_some() || args.max.is_some() {
        let current = view.query.price_range;
        let min = match &args.min {
            Some(raw) => Money::parse(raw, Currency::USD).context("Invalid --min")?,
            None => current.min(),
        };
        let max = match &args.max {
            Some(raw) => Money::parse(raw, Currency::USD).context("Invalid --max")?,
            None => current.max(),
        };
        view.set_price_range(PriceRange::new(min, max)?);
    }
    if let Some(sort) = &args.sort {
        view.set_sort(sort.parse::<SortOption>()?);
    }
    view.page = args.page;

    Ok(view)
}

fn print_listing(view: &ShopView, results: &SearchResults<&Product>, ctx: &Context) {
    let out = &ctx.output;
    out.header(&format!(
        "Shop · {} · {}",
        describe_filters(view),
        view.query.sort.display_name()
    ));

    if results.is_empty() {
        out.info("No products found");
        out.info("Try adjusting your filters, or run `shophub shop --reset` to clear them.");
        return;
    }

    let p = &results.pagination;
    out.info(&format!(
        "Showing {}-{} of {} products",
        p.start_item(),
        p.end_item(),
        p.total
    ));
    println!();

    match view.view_mode {
        ViewMode::Grid => {
            for product in &results.items {
                out.product_row(product);
            }
        }
        ViewMode::List => {
            for product in &results.items {
                print_block(product, ctx);
            }
        }
    }

    if p.total_pages > 1 {
        let pages: Vec<String> = p
            .page_numbers(5)
            .into_iter()
            .map(|n| {
                if n == p.page {
                    format!("[{}]", n)
                } else {
                    n.to_string()
                }
            })
            .collect();
        println!();
        out.kv("pages", &pages.join(" "));
    }
}

fn print_block(product: &Product, ctx: &Context) {
    let out = &ctx.output;
    out.list_item(&format!("{} (#{})", product.name, product.id));
    out.kv("price", &product.price.display());
    if let Some(savings) = product.savings() {
        out.kv("save", &format!("{} ({}% off)", savings.display(), product.discount));
    }
    out.kv("rating", &format!("{} ({} reviews)", stars(product), product.reviews));
    out.kv("brand", &product.brand);
    out.kv("category", &product.category);
    if !product.is_in_stock() {
        out.kv("stock", "out of stock");
    }
    println!();
}

fn print_facet(facet: &Facet, ctx: &Context) {
    ctx.output.header(&facet.name);
    for value in &facet.values {
        let marker = if value.selected { "●" } else { " " };
        ctx.output
            .list_item(&format!("{} {} ({})", marker, value.value, value.count));
    }
}

fn describe_filters(view: &ShopView) -> String {
    let describe = |label: &str, selection: &Selection| match selection {
        Selection::All => format!("all {}", label),
        Selection::Exact(value) => value.clone(),
    };
    format!(
        "{} · {} · {}",
        describe("categories", &view.query.category),
        describe("brands", &view.query.brand),
        view.query.price_range
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_commerce::search::ResetBounds;

    fn args() -> ShopArgs {
        ShopArgs {
            page: 1,
            ..ShopArgs::default()
        }
    }

    fn catalog() -> Catalog {
        Catalog::shipped().unwrap()
    }

    fn ids(view: &ShopView, catalog: &Catalog) -> Vec<u32> {
        view.results(catalog).items.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_reset_discards_seed_and_flags() {
        let catalog = catalog();
        let args = ShopArgs {
            query: Some("category=Mobile".to_string()),
            brand: Some("Apple".to_string()),
            sort: Some("rating".to_string()),
            page: 3,
            reset: true,
            ..self::args()
        };

        let view = build_view(&args, &CliConfig::default(), &catalog).unwrap();
        assert_eq!(view.query, ShopQuery::new());
        assert_eq!(view.page, 1);
        assert_eq!(ids(&view, &catalog), (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_flags_apply_on_top_of_seed() {
        let catalog = catalog();
        let args = ShopArgs {
            query: Some("category=Mobile".to_string()),
            brand: Some("Samsung".to_string()),
            ..self::args()
        };

        let view = build_view(&args, &CliConfig::default(), &catalog).unwrap();
        assert_eq!(view.query.category, Selection::Exact("Mobile".to_string()));
        assert_eq!(ids(&view, &catalog), vec![8]);
    }

    #[test]
    fn test_price_flags_keep_the_other_bound() {
        let catalog = catalog();
        let args = ShopArgs {
            max: Some("200".to_string()),
            ..self::args()
        };

        let view = build_view(&args, &CliConfig::default(), &catalog).unwrap();
        assert_eq!(view.query.price_range, PriceRange::parse("0", "200").unwrap());
        assert_eq!(ids(&view, &catalog), vec![5, 6]);

        let inverted = ShopArgs {
            min: Some("500".to_string()),
            max: Some("100".to_string()),
            ..self::args()
        };
        assert!(build_view(&inverted, &CliConfig::default(), &catalog).is_err());
    }

    #[test]
    fn test_configured_ceiling_survives_reset() {
        let catalog = catalog();
        let mut config = CliConfig::default();
        config.shop.price_ceiling = "500".to_string();
        let ceiling = PriceRange::parse("0", "500").unwrap();

        let fresh = build_view(&args(), &config, &catalog).unwrap();
        assert_eq!(fresh.query.price_range, ceiling);
        assert_eq!(fresh.reset_bounds, ResetBounds::fixed(Money::usd(50000)));

        let reset = ShopArgs {
            max: Some("100".to_string()),
            reset: true,
            ..self::args()
        };
        let view = build_view(&reset, &config, &catalog).unwrap();
        assert_eq!(view.query.price_range, ceiling);

        let mut cleared = build_view(
            &ShopArgs {
                brand: Some("Sony".to_string()),
                ..self::args()
            },
            &config,
            &catalog,
        )
        .unwrap();
        cleared.clear_filters(&catalog);
        assert_eq!(cleared.query, fresh.query);
    }
}
