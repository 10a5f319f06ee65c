//! Shopledger CLI
//!
//! Command-line interface over the local ledger:
//! - Manage the item registry
//! - Show today's summary and record the investment
//! - Write the daily report
//! - Export the whole collection

use anyhow::Context;
use clap::{Parser, Subcommand};
use shopledger::clock::{Clock, SystemClock};
use shopledger::config::Config;
use shopledger::ledger::report::amount as money;
use shopledger::ledger::{export_items, DailySummary, ExportFormat, ItemForm, ItemRegistry};
use shopledger::storage::{Item, ItemId, LedgerStore};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "shopledger")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Shop ledger for inventory items and daily profit/loss")]
#[command(long_about = "Shopledger records the items a shop buys and sells.\nTrack today's investment, see the day's profit and write a summary report.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json; export also accepts csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the item registry
    Items {
        #[command(subcommand)]
        action: ItemsCommand,
    },

    /// Today's summary
    Summary {
        #[command(subcommand)]
        action: SummaryCommand,
    },

    /// Export every item (csv unless --format json)
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ItemsCommand {
    /// List items
    List {
        /// Only items recorded on this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<chrono::NaiveDate>,
    },

    /// Add an item dated today
    Add {
        name: String,
        cost: String,
        sell: String,
        qty: String,
    },

    /// Edit an item; omitted fields keep their values
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        cost: Option<String>,
        #[arg(long)]
        sell: Option<String>,
        #[arg(long)]
        qty: Option<String>,
    },

    /// Delete an item
    Delete { id: i64 },

    /// Clear every item
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum SummaryCommand {
    /// Today's items and totals
    Show,

    /// Save today's investment
    Invest { amount: String },

    /// Add an item to today
    Add {
        name: String,
        qty: String,
        cost: String,
        sell: String,
    },

    /// Write Summary-<date>.txt
    Report {
        /// Directory to write into (default: shop.report_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the report instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Remove every item and the investment
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => Config::load_default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }

    let mut logging = config.logging.clone();
    logging.level = log_level(cli.verbose, &config.logging.level);
    shopledger::logging::init_tracing(&logging, &[]);

    let json = cli.format.eq_ignore_ascii_case("json");
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.shop.local_dates));

    match cli.command {
        Commands::Items { action } => {
            let store = open_store(&config).await?;
            let mut registry = ItemRegistry::new(Arc::clone(&store), clock);
            run_items(&mut registry, &store, action, json).await?;
        }

        Commands::Summary { action } => {
            let store = open_store(&config).await?;
            let mut summary = DailySummary::load(store, clock).await;
            run_summary(&mut summary, &config, action, json).await?;
        }

        Commands::Export { output } => {
            let format = match cli.format.to_lowercase().as_str() {
                "table" => ExportFormat::Csv,
                other => other.parse()?,
            };
            let store = open_store(&config).await?;
            let data = export_items(&store.items().await, format)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &data)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Exported to {:?}", path);
                }
                None => {
                    print!("{}", data);
                }
            }
        }

        Commands::Config { output } => {
            write_default_config(output.as_ref())?;
        }
    }

    Ok(())
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<LedgerStore>> {
    let store_config = config.storage.to_store_config();
    let data_dir = store_config.data_dir.clone();
    let store = LedgerStore::open(store_config)
        .await
        .with_context(|| format!("Failed to open ledger at {:?}", data_dir))?;
    Ok(Arc::new(store))
}

async fn run_items(
    registry: &mut ItemRegistry,
    store: &LedgerStore,
    action: ItemsCommand,
    json: bool,
) -> anyhow::Result<()> {
    match action {
        ItemsCommand::List { date } => {
            let items = match date {
                Some(date) => store.items_on(date).await,
                None => registry.items().await,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if items.is_empty() {
                println!("No items recorded yet.");
                println!();
                println!("Add your first item with:");
                println!("  shopledger items add Pen 5 8 10");
            } else {
                print_items(&items);
            }
        }

        ItemsCommand::Add {
            name,
            cost,
            sell,
            qty,
        } => {
            let mut form = ItemForm::new(name, cost, sell, qty);
            let item = registry.submit(&mut form).await?;
            print_item_result("Added", &item, json)?;
        }

        ItemsCommand::Edit {
            id,
            name,
            cost,
            sell,
            qty,
        } => {
            let form = registry.begin_edit(ItemId(id)).await?;
            if let Some(name) = name {
                form.item_name = name;
            }
            if let Some(cost) = cost {
                form.cost_price = cost;
            }
            if let Some(sell) = sell {
                form.sell_price = sell;
            }
            if let Some(qty) = qty {
                form.quantity = qty;
            }

            let item = registry.save_edit().await?;
            print_item_result("Updated", &item, json)?;
        }

        ItemsCommand::Delete { id } => {
            let item = registry.delete(ItemId(id)).await?;
            print_item_result("Deleted", &item, json)?;
        }

        ItemsCommand::Reset { yes } => {
            let cleared = registry
                .reset_all(|prompt| yes || confirm_on_stdin(prompt))
                .await?;
            println!("{}", if cleared { "All items cleared" } else { "Cancelled" });
        }
    }

    Ok(())
}

async fn run_summary(
    summary: &mut DailySummary,
    config: &Config,
    action: SummaryCommand,
    json: bool,
) -> anyhow::Result<()> {
    match action {
        SummaryCommand::Show => {
            let totals = summary.totals();

            if json {
                let body = serde_json::json!({
                    "date": summary.date(),
                    "investment": summary.investment(),
                    "items": summary.items(),
                    "totals": totals,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
                return Ok(());
            }

            println!("{} - {}", config.shop.name, summary.date().format("%Y-%m-%d"));
            println!();

            if summary.items().is_empty() {
                println!("No items recorded today.");
            } else {
                println!(
                    "{:<20} {:>5} {:>10} {:>10} {:>10} {:>10} {:>10}",
                    "Item", "Qty", "Cost", "Sell", "Total Cost", "Sales", "Profit"
                );
                println!("{}", "-".repeat(81));
                for item in summary.items() {
                    println!(
                        "{:<20} {:>5} {:>10} {:>10} {:>10} {:>10} {:>10}",
                        item.item_name,
                        item.quantity,
                        money(item.cost_price),
                        money(item.sell_price),
                        money(item.line_cost()),
                        money(item.line_sales()),
                        money(item.line_profit())
                    );
                }
            }

            let cur = &config.shop.currency;
            println!();
            println!("Investment:    {} {}", cur, money(totals.investment));
            println!("Total Cost:    {} {}", cur, money(totals.total_cost));
            println!("Total Sales:   {} {}", cur, money(totals.total_sales));
            println!("Total Profit:  {} {}", cur, money(totals.total_profit));
            println!("Units Sold:    {}", totals.total_units);
            println!("Final Balance: {} {}", cur, money(totals.final_balance));
        }

        SummaryCommand::Invest { amount } => match summary.set_investment(&amount).await? {
            Some(value) => println!(
                "Investment for {}: {} {}",
                summary.date(),
                config.shop.currency,
                money(value)
            ),
            None => println!("Nothing saved (empty amount)"),
        },

        SummaryCommand::Add {
            name,
            qty,
            cost,
            sell,
        } => {
            let mut form = ItemForm::new(name, cost, sell, qty);
            let item = summary.submit(&mut form).await?;
            print_item_result("Added", &item, json)?;
        }

        SummaryCommand::Report { output, stdout } => {
            let report = summary.report(&config.shop.currency);

            if stdout {
                println!("{}", report.content);
            } else {
                let dir = output.unwrap_or_else(|| config.shop.report_dir());
                let path = report
                    .write_to(&dir)
                    .with_context(|| format!("Failed to write report into {:?}", dir))?;
                println!("Report written to {:?}", path);
            }
        }

        SummaryCommand::Reset { yes } => {
            let cleared = summary
                .reset_all(|prompt| yes || confirm_on_stdin(prompt))
                .await?;
            println!("{}", if cleared { "All data reset" } else { "Cancelled" });
        }
    }

    Ok(())
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = shopledger::config::generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}

/// `--verbose` forces debug; otherwise the configured level applies
fn log_level(verbose: bool, configured: &str) -> String {
    if verbose {
        "debug".to_string()
    } else {
        configured.to_string()
    }
}

/// Ask on stderr, read the answer from stdin
fn confirm_on_stdin(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    if std::io::stderr().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => is_affirmative(&answer),
        Err(_) => false,
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_item_result(action: &str, item: &Item, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
        return Ok(());
    }

    match item.id {
        Some(id) => println!("{} {} (id {})", action, item.item_name, id),
        None => println!("{} {}", action, item.item_name),
    }
    Ok(())
}

fn print_items(items: &[Item]) {
    println!(
        "{:<15} {:<20} {:>10} {:>10} {:>5} {:<10}",
        "ID", "Item", "Cost", "Sell", "Qty", "Date"
    );
    println!("{}", "-".repeat(75));

    for item in items {
        let id = item
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<15} {:<20} {:>10} {:>10} {:>5} {:<10}",
            id,
            item.item_name,
            money(item.cost_price),
            money(item.sell_price),
            item.quantity,
            item.date.format("%Y-%m-%d")
        );
    }
}
