//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, validate, CliConfig, PriceBounds, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    for section in ["shop", "cart", "auth", "log"] {
        ctx.output.info("");
        ctx.output.info(&format!("[{}]", section));
        for key in keys_in(section) {
            ctx.output.kv(key, &get_config_value(&ctx.config, &format!("{}.{}", section, key))?);
        }
    }

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = find_config_file(ctx)?;
    let path = config_path.to_string_lossy().to_string();

    let mut config = CliConfig::load(&path)?;
    set_config_value(&mut config, key, value)?;

    let (errors, _) = validate(&config);
    if let Some(error) = errors.first() {
        bail!("Refusing to save: {}", error);
    }

    config.save(&path)?;
    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.resolve_path(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            ctx.output.info("Left the existing config untouched.");
            return Ok(());
        }
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = validate(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn keys_in(section: &str) -> &'static [&'static str] {
    match section {
        "shop" => &["per_page", "price_bounds", "price_ceiling"],
        "cart" => &["free_shipping_threshold", "flat_shipping", "tax_rate", "promo_delay_ms"],
        "auth" => &["sign_in_delay_ms", "google_delay_ms"],
        "log" => &["level"],
        _ => &[],
    }
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["shop", "per_page"] => Ok(config.shop.per_page.to_string()),
        ["shop", "price_bounds"] => Ok(format!("\"{}\"", config.shop.price_bounds.as_str())),
        ["shop", "price_ceiling"] => Ok(format!("\"{}\"", config.shop.price_ceiling)),
        ["cart", "free_shipping_threshold"] => {
            Ok(format!("\"{}\"", config.cart.free_shipping_threshold))
        }
        ["cart", "flat_shipping"] => Ok(format!("\"{}\"", config.cart.flat_shipping)),
        ["cart", "tax_rate"] => Ok(config.cart.tax_rate.to_string()),
        ["cart", "promo_delay_ms"] => Ok(config.cart.promo_delay_ms.to_string()),
        ["auth", "sign_in_delay_ms"] => Ok(config.auth.sign_in_delay_ms.to_string()),
        ["auth", "google_delay_ms"] => Ok(config.auth.google_delay_ms.to_string()),
        ["log", "level"] => Ok(format!("\"{}\"", config.log.level)),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["shop", "per_page"] => config.shop.per_page = value.parse()?,
        ["shop", "price_bounds"] => {
            config.shop.price_bounds = match value {
                "fixed" => PriceBounds::Fixed,
                "catalog" => PriceBounds::Catalog,
                other => bail!("shop.price_bounds must be \"fixed\" or \"catalog\", got {:?}", other),
            }
        }
        ["shop", "price_ceiling"] => config.shop.price_ceiling = value.to_string(),
        ["cart", "free_shipping_threshold"] => {
            config.cart.free_shipping_threshold = value.to_string()
        }
        ["cart", "flat_shipping"] => config.cart.flat_shipping = value.to_string(),
        ["cart", "tax_rate"] => config.cart.tax_rate = value.parse()?,
        ["cart", "promo_delay_ms"] => config.cart.promo_delay_ms = value.parse()?,
        ["auth", "sign_in_delay_ms"] => config.auth.sign_in_delay_ms = value.parse()?,
        ["auth", "google_delay_ms"] => config.auth.google_delay_ms = value.parse()?,
        ["log", "level"] => config.log.level = value.to_string(),
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn find_config_file(ctx: &Context) -> Result<PathBuf> {
    if let Some(path) = &ctx.config_path {
        return Ok(path.clone());
    }
    for name in &CONFIG_NAMES {
        let path = ctx.cwd.join(name);
        if path.exists() {
            return Ok(path);
        }
    }
    bail!("No config file found. Run `shophub config init` to create one.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_key_round_trips() {
        let mut config = CliConfig::default();
        for section in ["shop", "cart", "auth", "log"] {
            for key in keys_in(section) {
                let full = format!("{}.{}", section, key);
                let value = get_config_value(&config, &full).unwrap();
                set_config_value(&mut config, &full, value.trim_matches('"')).unwrap();
            }
        }
        assert_eq!(
            toml::to_string(&config).unwrap(),
            toml::to_string(&CliConfig::default()).unwrap()
        );
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let mut config = CliConfig::default();
        assert!(get_config_value(&config, "shop.colour").is_err());
        assert!(set_config_value(&mut config, "deploy.canary", "true").is_err());
        assert!(set_config_value(&mut config, "shop.price_bounds", "computed").is_err());
    }
}
