//! Home page command.

use anyhow::{Context as _, Result};
use serde::Serialize;
use shop_commerce::catalog::{Catalog, Product};
use shop_commerce::view::NewsletterForm;

use super::categories::browse_query;
use super::HomeArgs;
use crate::context::Context;

#[derive(Serialize)]
struct HomeJson<'a> {
    categories: Vec<CategoryLink<'a>>,
    featured: &'a [Product],
    #[serde(skip_serializing_if = "Option::is_none")]
    newsletter: Option<String>,
}

/// One entry of the category navigation.
#[derive(Debug, Serialize)]
struct CategoryLink<'a> {
    name: &'a str,
    icon: &'a str,
    count: usize,
    query: String,
}

/// Run the home command.
pub async fn run(args: HomeArgs, ctx: &Context) -> Result<()> {
    let catalog = &ctx.catalog;

    let newsletter = match &args.subscribe {
        Some(email) => {
            let mut form = NewsletterForm::new(email.clone());
            Some(form.subscribe().context("Newsletter signup failed")?)
        }
        None => None,
    };

    let home = HomeJson {
        categories: category_links(catalog),
        featured: featured(catalog, args.featured),
        newsletter,
    };

    if ctx.output.is_json() {
        ctx.output.json(&home);
        return Ok(());
    }

    ctx.output.header("Shop by Category");
    for link in &home.categories {
        ctx.output.list_item(&format!(
            "{} {} · {} items · shophub shop --query {}",
            link.icon, link.name, link.count, link.query
        ));
    }

    ctx.output.header("Featured Products");
    if home.featured.is_empty() {
        ctx.output.info("Nothing featured right now");
    }
    for product in home.featured {
        ctx.output.product_row(product);
    }

    println!();
    match &home.newsletter {
        Some(message) => ctx.output.success(message),
        None => ctx
            .output
            .info("Stay updated: shophub home --subscribe you@example.com"),
    }

    Ok(())
}

fn category_links(catalog: &Catalog) -> Vec<CategoryLink<'_>> {
    catalog
        .categories()
        .iter()
        .map(|info| CategoryLink {
            name: &info.name,
            icon: &info.icon,
            count: catalog.category_count(&info.name),
            query: browse_query(&info.name),
        })
        .collect()
}

/// The first `limit` featured products.
fn featured(catalog: &Catalog, limit: usize) -> &[Product] {
    let all = catalog.featured();
    &all[..limit.min(all.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_links_count_products() {
        let catalog = Catalog::shipped().unwrap();
        let links = category_links(&catalog);

        assert_eq!(links.len(), 6);
        assert_eq!(links.iter().map(|l| l.count).sum::<usize>(), 12);

        let mobile = links.iter().find(|l| l.name == "Mobile").unwrap();
        assert_eq!(mobile.count, 4);
        assert_eq!(mobile.query, "category=Mobile");
    }

    #[test]
    fn test_featured_is_clamped() {
        let catalog = Catalog::shipped().unwrap();
        let ids: Vec<u32> = featured(&catalog, 4).iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(featured(&catalog, 50).len(), 10);
        assert!(featured(&catalog, 0).is_empty());
    }
}
