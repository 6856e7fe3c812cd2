//! Output formatting for the CLI.

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use shop_commerce::catalog::Product;
use shop_commerce::session::TaskState;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stdout(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Print one product as a listing row.
    pub fn product_row(&self, product: &Product) {
        let name = truncate(&product.name, self.name_width());
        let price = product.price.display();
        let was = product
            .original_price
            .map(|p| style(p.display()).dim().strikethrough().to_string())
            .unwrap_or_default();
        let badge = if product.is_new {
            style("NEW").cyan().bold().to_string()
        } else {
            String::new()
        };
        let id = format!("#{}", product.id);
        let stars = stars(product);
        self.table_row(
            &[&id, &name, &price, &was, &stars, &product.brand, &badge],
            &[4, self.name_width(), 10, 10, 10, 9, 3],
        );
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Get terminal width.
    pub fn term_width(&self) -> usize {
        self.term.size().1 as usize
    }

    fn name_width(&self) -> usize {
        // Room left after the fixed columns, within sane limits.
        self.term_width().saturating_sub(64).clamp(18, 40)
    }
}

/// Coloured label for a simulated request's state.
pub fn task_badge<T, E>(state: &TaskState<T, E>) -> String {
    match state {
        TaskState::Idle => style("idle").dim().to_string(),
        TaskState::Pending => style("pending").yellow().to_string(),
        TaskState::Resolved(_) => style("resolved").green().to_string(),
        TaskState::Rejected(_) => style("rejected").red().to_string(),
    }
}

/// Five-star rating bar, e.g. `★★★★☆ 4.6`.
pub fn stars(product: &Product) -> String {
    let filled = product.filled_stars();
    format!(
        "{}{} {:.1}",
        "★".repeat(filled),
        "☆".repeat(5 - filled),
        product.rating
    )
}

/// Format duration as human-readable string.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_commerce::Money;

    #[test]
    fn test_stars() {
        let rated = |rating| Product::new(1, "Headphones", Money::usd(19999)).with_rating(rating);
        assert_eq!(stars(&rated(4.6)), "★★★★☆ 4.6");
        assert_eq!(stars(&rated(5.0)), "★★★★★ 5.0");
        assert_eq!(stars(&rated(-1.0)), "☆☆☆☆☆ -1.0");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(85530), "23h 45m");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("AirPods", 10), "AirPods");
        assert_eq!(truncate("iPhone 15 Pro Max", 8), "iPhone …");
    }
}
