use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use console::style;
use tabled::{
    settings::{Alignment, Style},
    Table, Tabled,
};

use crate::models::{cart::Cart, product::Product, receipt::Receipt};

const NO_BREAK_SPACE: char = '\u{a0}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyStyle {
    /// `270 SEK`
    Plain,
    /// Swedish locale: `1 299,00 kr`
    Locale,
}

impl fmt::Display for CurrencyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyStyle::Plain => write!(f, "plain"),
            CurrencyStyle::Locale => write!(f, "locale"),
        }
    }
}

impl FromStr for CurrencyStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(CurrencyStyle::Plain),
            "locale" => Ok(CurrencyStyle::Locale),
            other => Err(anyhow::anyhow!(
                "Unknown currency style '{}', expected 'plain' or 'locale'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub style: CurrencyStyle,
    pub code: String,
}

impl CurrencyFormat {
    pub fn new(style: CurrencyStyle, code: impl Into<String>) -> Self {
        Self {
            style,
            code: code.into(),
        }
    }

    fn symbol(&self) -> &str {
        match self.code.as_str() {
            "SEK" => "kr",
            other => other,
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new(CurrencyStyle::Plain, "SEK")
    }
}

pub fn format_currency(amount: f64, format: &CurrencyFormat) -> String {
    match format.style {
        CurrencyStyle::Plain => {
            if amount.fract() == 0.0 {
                format!("{:.0} {}", amount, format.code)
            } else {
                format!("{:.2} {}", amount, format.code)
            }
        }
        CurrencyStyle::Locale => {
            let cents = (amount.abs() * 100.0).round() as u64;
            let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
            format!(
                "{}{},{:02}{}{}",
                sign,
                group_thousands(cents / 100),
                cents % 100,
                NO_BREAK_SPACE,
                format.symbol()
            )
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(NO_BREAK_SPACE);
        }
        grouped.push(digit);
    }
    grouped
}

pub fn format_total(total: f64, format: &CurrencyFormat) -> String {
    format!("{}: {}", style("Total").bold(), style(format_currency(total, format)).green())
}

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Price")]
    price: String,
}

/// One row per distinct product. Empty string for an empty cart.
pub fn format_cart_table(cart: &Cart, format: &CurrencyFormat) -> String {
    if cart.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = cart
        .grouped_view()
        .map(|line| CartTableRow {
            name: line.item.name.clone(),
            quantity: format!("x{}", line.quantity),
            price: format!("- {}", format_currency(line.subtotal(), format)),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    table.to_string()
}

#[derive(Tabled)]
struct ProductTableRow {
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Image")]
    image: String,
    #[tabled(rename = "In cart")]
    in_cart: usize,
}

pub fn format_product_table<F>(products: &[&Product], quantity: F, format: &CurrencyFormat) -> String
where
    F: Fn(&Product) -> usize,
{
    if products.is_empty() {
        return String::new();
    }

    let rows: Vec<ProductTableRow> = products
        .iter()
        .map(|product| ProductTableRow {
            name: if product.name.chars().count() > 30 {
                format!("{}...", product.name.chars().take(27).collect::<String>())
            } else {
                product.name.clone()
            },
            price: format_currency(product.price, format),
            image: product.image.clone().unwrap_or_else(|| "-".to_string()),
            in_cart: quantity(*product),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    table.to_string()
}

pub fn format_receipt(receipt: &Receipt, format: &CurrencyFormat) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", style("Order").bold(), style(receipt.id).cyan()));
    output.push_str(&format!(
        "{}: {}\n",
        style("Paid").bold(),
        style(format_date(&receipt.paid_at)).dim()
    ));
    for line in &receipt.lines {
        output.push_str(&format!(
            "  {} x{} - {}\n",
            line.name,
            line.quantity,
            format_currency(line.subtotal, format)
        ));
    }
    output.push_str(&format_total(receipt.total, format));
    output.push('\n');

    output
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
