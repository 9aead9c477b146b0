use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use tracing::{error, info, warn};

use crate::{
    catalog::{CatalogRepository, EmbeddedCatalogRepository, JsonFileCatalogRepository},
    cli::args::*,
    services::{CatalogService, EventOutcome, ShopEvent, Storefront},
    utils::{
        formatting::{
            format_cart_table, format_currency, format_product_table, format_receipt, format_total,
            CurrencyFormat,
        },
        Config,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

const SHOP_MENU: [&str; 8] = [
    "Search products",
    "Clear search",
    "Add product",
    "Remove product",
    "View cart",
    "Pay",
    "Reset cart",
    "Quit",
];

pub struct CliApp {
    config: Config,
    currency: CurrencyFormat,
}

impl CliApp {
    pub fn new(config: Config) -> Self {
        let currency = config.currency_format();
        Self { config, currency }
    }

    pub fn run(&self, args: Args) -> Result<()> {
        match args.command {
            Commands::Products { search } => self.handle_products(search),
            Commands::Order { add, remove, pay, json } => self.handle_order(add, remove, pay, json),
            Commands::Shop => self.handle_shop(),
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    /// A fresh session over the configured catalog.
    fn open_storefront(&self) -> Result<Storefront> {
        let catalog = match &self.config.catalog_path {
            Some(path) => self.load_catalog(&JsonFileCatalogRepository::new(path)),
            None => self.load_catalog(&EmbeddedCatalogRepository::new()),
        }?;
        Ok(Storefront::new(catalog))
    }

    fn load_catalog(&self, repository: &dyn CatalogRepository) -> Result<CatalogService> {
        CatalogService::load(repository).context("Failed to load product catalog")
    }

    fn handle_products(&self, search: Option<String>) -> Result<()> {
        let mut shop = self.open_storefront()?;
        if let Some(query) = search {
            shop.handle(ShopEvent::Search(query))?;
        }

        self.print_products(&shop);
        Ok(())
    }

    fn handle_order(&self, add: Vec<String>, remove: Vec<String>, pay: bool, json: bool) -> Result<()> {
        let mut shop = self.open_storefront()?;

        for name in add {
            if let Err(e) = shop.handle(ShopEvent::Increase(name.clone())) {
                println!("{} Could not add '{}': {}", CROSS, name, style(&e).red());
                error!("Failed to add '{}': {}", name, e);
                return Err(e.into());
            }
        }

        for name in remove {
            match shop.handle(ShopEvent::Decrease(name.clone())) {
                Ok(EventOutcome::Ignored) => {
                    println!("{} '{}' is not in the cart", WARNING, style(&name).yellow());
                }
                Ok(_) => {}
                Err(e) => {
                    println!("{} Could not remove '{}': {}", CROSS, name, style(&e).red());
                    error!("Failed to remove '{}': {}", name, e);
                    return Err(e.into());
                }
            }
        }

        if !pay {
            self.print_cart(&shop);
            return Ok(());
        }

        match shop.handle(ShopEvent::Pay)? {
            EventOutcome::Paid(receipt) if json => {
                println!("{}", serde_json::to_string_pretty(&receipt)?);
            }
            EventOutcome::Paid(receipt) => {
                println!("{} Payment accepted!", CHECKMARK);
                print!("{}", format_receipt(&receipt, &self.currency));
            }
            _ => {
                warn!("Pay on an empty cart, no receipt issued");
                println!("{} Your cart is empty, nothing to pay", WARNING);
            }
        }
        Ok(())
    }

    fn handle_shop(&self) -> Result<()> {
        let mut shop = self.open_storefront()?;
        let theme = ColorfulTheme::default();

        println!("{} {}", CART, style("Storefront").bold().cyan());
        self.print_products(&shop);

        loop {
            let choice = Select::with_theme(&theme)
                .with_prompt("What next?")
                .items(&SHOP_MENU)
                .default(0)
                .interact()?;

            let event = match choice {
                0 => {
                    let query: String = Input::with_theme(&theme)
                        .with_prompt("Search")
                        .allow_empty(true)
                        .interact_text()?;
                    ShopEvent::Search(query)
                }
                1 => ShopEvent::ClearSearch,
                2 => match self.pick_product(&shop, &theme)? {
                    Some(name) => ShopEvent::Increase(name),
                    None => continue,
                },
                3 => match self.pick_cart_line(&shop, &theme)? {
                    Some(name) => ShopEvent::Decrease(name),
                    None => continue,
                },
                4 => {
                    self.print_cart(&shop);
                    continue;
                }
                5 => {
                    let confirm = Confirm::with_theme(&theme)
                        .with_prompt(format!(
                            "Pay {}?",
                            format_currency(shop.cart().total(), &self.currency)
                        ))
                        .default(true)
                        .interact()?;
                    if !confirm {
                        continue;
                    }
                    ShopEvent::Pay
                }
                6 => ShopEvent::Reset,
                _ => break,
            };

            self.apply_event(&mut shop, event);
        }

        info!("Shopping session ended");
        Ok(())
    }

    fn apply_event(&self, shop: &mut Storefront, event: ShopEvent) {
        let refresh_products = matches!(event, ShopEvent::Search(_) | ShopEvent::ClearSearch);
        let paying = matches!(event, ShopEvent::Pay);

        match shop.handle(event) {
            Ok(EventOutcome::Paid(receipt)) => {
                println!("{} Payment accepted!", CHECKMARK);
                print!("{}", format_receipt(&receipt, &self.currency));
            }
            Ok(EventOutcome::Ignored) if paying => {
                println!("{} Your cart is empty, nothing to pay", WARNING);
            }
            Ok(EventOutcome::Ignored) => {
                println!("{} Nothing to remove", WARNING);
            }
            Ok(EventOutcome::Updated) if refresh_products => self.print_products(shop),
            Ok(EventOutcome::Updated) => self.print_cart(shop),
            Err(e) => {
                println!("{} {}", CROSS, style(&e).red());
                error!("Shop event failed: {}", e);
            }
        }
    }

    fn pick_product(&self, shop: &Storefront, theme: &ColorfulTheme) -> Result<Option<String>> {
        let names: Vec<String> = shop
            .visible_products()
            .iter()
            .map(|product| product.name.clone())
            .collect();
        if names.is_empty() {
            println!("{} No products match '{}'", INFO, shop.query());
            return Ok(None);
        }

        let index = Select::with_theme(theme)
            .with_prompt("Add which product?")
            .items(&names)
            .default(0)
            .interact_opt()?;
        Ok(index.map(|i| names[i].clone()))
    }

    fn pick_cart_line(&self, shop: &Storefront, theme: &ColorfulTheme) -> Result<Option<String>> {
        let names: Vec<String> = shop
            .cart()
            .grouped_view()
            .map(|line| line.item.name.clone())
            .collect();
        if names.is_empty() {
            println!("{} Your cart is empty", INFO);
            return Ok(None);
        }

        let index = Select::with_theme(theme)
            .with_prompt("Remove one unit of?")
            .items(&names)
            .default(0)
            .interact_opt()?;
        Ok(index.map(|i| names[i].clone()))
    }

    fn print_products(&self, shop: &Storefront) {
        let products = shop.visible_products();
        if products.is_empty() {
            println!("{} No products found", INFO);
            return;
        }

        println!("{} {}", INFO, style(format!("{} products", products.len())).bold());
        let table = format_product_table(
            &products,
            |product| shop.product_quantity(&product.name),
            &self.currency,
        );
        println!("{}", table);
    }

    fn print_cart(&self, shop: &Storefront) {
        let cart = shop.cart();
        if cart.is_empty() {
            println!("{} Your cart is empty", CART);
        } else {
            println!("{} {}", CART, style(format!("{} items", cart.len())).bold());
            println!("{}", format_cart_table(cart, &self.currency));
        }
        println!("{}", format_total(cart.total(), &self.currency));
    }

    fn handle_config_command(&self, command: ConfigCommands) -> Result<()> {
        match command {
            ConfigCommands::Show => {
                println!("{} {}", INFO, style("Configuration").bold().cyan());
                println!("{}", self.config);
            }
        }
        Ok(())
    }
}
