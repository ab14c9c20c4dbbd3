//! AMIS command-line front end.
//!
//! Every invocation loads the data directory, runs one command and saves
//! again only if the command changed something.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::debug;

use amis::config::Config;
use amis::inventory::{CustomerUpdate, DrugUpdate, Inventory, SupplierUpdate};
use amis::types::money::parse_money;
use amis::types::{Customer, Drug, Supplier, TIMESTAMP_FORMAT};

#[derive(Parser)]
#[command(name = "amis")]
#[command(about = "Pharmacy inventory management", long_about = None, version)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drug records
    Drug {
        #[command(subcommand)]
        cmd: DrugCmd,
    },

    /// Supplier records
    Supplier {
        #[command(subcommand)]
        cmd: SupplierCmd,
    },

    /// Customer records
    Customer {
        #[command(subcommand)]
        cmd: CustomerCmd,
    },

    /// Log stock bought from a supplier
    Purchase {
        #[arg(long)]
        drug: String,

        #[arg(long)]
        supplier: String,

        #[arg(long)]
        quantity: u32,

        /// Timestamp (YYYY-MM-DDTHH:MM:SS), defaults to now
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<NaiveDateTime>,
    },

    /// Log stock sold to a customer
    Sale {
        #[arg(long)]
        drug: String,

        #[arg(long)]
        customer: String,

        #[arg(long)]
        quantity: u32,

        /// Timestamp (YYYY-MM-DDTHH:MM:SS), defaults to now
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<NaiveDateTime>,
    },

    /// List drugs at or below the stock threshold, lowest first
    LowStock,

    /// Show the threshold, or preview alerts at another one
    ///
    /// The threshold itself comes from --stock-threshold or
    /// AMIS_STOCK_THRESHOLD and is not stored.
    Threshold { value: Option<u32> },

    /// Print a report
    Report {
        #[command(subcommand)]
        kind: ReportCmd,
    },
}

#[derive(Subcommand)]
enum DrugCmd {
    Add {
        code: String,
        name: String,

        #[arg(long, value_parser = parse_price)]
        price: Decimal,

        #[arg(long, default_value_t = 0)]
        stock: u32,

        /// Expiration date (YYYY-MM-DD)
        #[arg(long)]
        expires: Option<NaiveDate>,

        /// Supplier id, repeatable
        #[arg(long = "supplier")]
        suppliers: Vec<String>,
    },

    Update {
        code: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_parser = parse_price)]
        price: Option<Decimal>,

        #[arg(long)]
        stock: Option<u32>,

        #[arg(long)]
        expires: Option<NaiveDate>,

        /// Replace the supplier list, repeatable
        #[arg(long = "supplier")]
        suppliers: Vec<String>,

        /// Empty the supplier list
        #[arg(long, conflicts_with = "suppliers")]
        clear_suppliers: bool,
    },

    Remove { code: String },

    List {
        #[arg(long, value_enum, default_value_t = DrugOrder::Code)]
        sort: DrugOrder,
    },

    /// Search by exact code, name fragment or supplier
    Search {
        #[arg(long, group = "by")]
        code: Option<String>,

        #[arg(long, group = "by")]
        name: Option<String>,

        #[arg(long, group = "by")]
        supplier: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DrugOrder {
    Code,
    Name,
    Price,
}

#[derive(Subcommand)]
enum SupplierCmd {
    Add {
        id: String,
        name: String,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long, default_value_t = 0)]
        delivery_days: u32,
    },

    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        delivery_days: Option<u32>,
    },

    Remove { id: String },

    List,
}

#[derive(Subcommand)]
enum CustomerCmd {
    Add {
        id: String,
        name: String,

        #[arg(long, default_value = "")]
        contact: String,
    },

    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        contact: Option<String>,
    },

    Remove { id: String },

    List,
}

#[derive(Subcommand)]
enum ReportCmd {
    Sales,
    Purchases,
    Inventory,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let store = cli.config.store();
    let mut inventory = store
        .load(cli.config.stock_threshold)
        .with_context(|| format!("failed to load inventory from {}", store.dir().display()))?;

    if execute(&mut inventory, cli.cmd)? {
        store
            .save(&inventory)
            .with_context(|| format!("failed to save inventory to {}", store.dir().display()))?;
    } else {
        debug!("nothing changed, skipping save");
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run one command; returns whether the inventory changed
fn execute(inventory: &mut Inventory, cmd: Commands) -> Result<bool> {
    match cmd {
        Commands::Drug { cmd } => drug_command(inventory, cmd),
        Commands::Supplier { cmd } => supplier_command(inventory, cmd),
        Commands::Customer { cmd } => customer_command(inventory, cmd),

        Commands::Purchase {
            drug,
            supplier,
            quantity,
            at,
        } => {
            let at = at.unwrap_or_else(now);
            let purchase = inventory
                .log_purchase(&drug, &supplier, quantity, at)
                .context("purchase rejected")?;
            println!("{}", purchase);
            Ok(true)
        }

        Commands::Sale {
            drug,
            customer,
            quantity,
            at,
        } => {
            let at = at.unwrap_or_else(now);
            let sale = inventory
                .log_sale(&drug, &customer, quantity, at)
                .context("sale rejected")?;
            println!("{}", sale);
            Ok(true)
        }

        Commands::LowStock => {
            print_alerts(inventory);
            Ok(false)
        }

        Commands::Threshold { value } => {
            match value {
                None => println!("Stock threshold: {}", inventory.stock_threshold()),
                Some(threshold) => {
                    inventory.set_stock_threshold(threshold);
                    print_alerts(inventory);
                }
            }
            Ok(false)
        }

        Commands::Report { kind } => {
            match kind {
                ReportCmd::Sales => print!("{}", inventory.sales_report()?),
                ReportCmd::Purchases => print!("{}", inventory.purchase_report()?),
                ReportCmd::Inventory => print!("{}", inventory.inventory_report()?),
            }
            Ok(false)
        }
    }
}

fn drug_command(inventory: &mut Inventory, cmd: DrugCmd) -> Result<bool> {
    match cmd {
        DrugCmd::Add {
            code,
            name,
            price,
            stock,
            expires,
            suppliers,
        } => {
            let mut drug = Drug::new(code, name, price).with_stock(stock);
            drug.expiration_date = expires;
            for supplier_id in suppliers {
                drug.add_supplier(supplier_id);
            }
            let line = drug.to_string();
            inventory.add_drug(drug)?;
            println!("Added {}", line);
            Ok(true)
        }

        DrugCmd::Update {
            code,
            name,
            price,
            stock,
            expires,
            suppliers,
            clear_suppliers,
        } => {
            let update = DrugUpdate {
                name,
                price,
                stock_level: stock,
                expiration_date: expires,
                suppliers: supplier_replacement(suppliers, clear_suppliers),
            };
            inventory.update_drug(&code, update)?;
            if let Some(drug) = inventory.drug(&code) {
                println!("Updated {}", drug);
            }
            Ok(true)
        }

        DrugCmd::Remove { code } => {
            let drug = inventory.remove_drug(&code)?;
            println!("Removed {}", drug);
            Ok(true)
        }

        DrugCmd::List { sort } => {
            let drugs = match sort {
                DrugOrder::Code => inventory.drugs(),
                DrugOrder::Name => inventory.drugs_sorted_by_name(),
                DrugOrder::Price => inventory.drugs_sorted_by_price(),
            };
            for drug in drugs {
                println!("{}", drug);
            }
            Ok(false)
        }

        DrugCmd::Search {
            code,
            name,
            supplier,
        } => {
            let found: Vec<&Drug> = if let Some(code) = code {
                inventory.search_by_code(&code).into_iter().collect()
            } else if let Some(name) = name {
                inventory.search_by_name(&name)
            } else if let Some(supplier) = supplier {
                inventory.search_by_supplier(&supplier)?
            } else {
                anyhow::bail!("pass one of --code, --name or --supplier");
            };

            if found.is_empty() {
                println!("No matching drugs");
            }
            for drug in found {
                println!("{}", drug);
            }
            Ok(false)
        }
    }
}

fn supplier_command(inventory: &mut Inventory, cmd: SupplierCmd) -> Result<bool> {
    match cmd {
        SupplierCmd::Add {
            id,
            name,
            location,
            delivery_days,
        } => {
            let supplier = Supplier::new(id, name, location, delivery_days);
            let line = supplier.to_string();
            inventory.add_supplier(supplier)?;
            println!("Added {}", line);
            Ok(true)
        }

        SupplierCmd::Update {
            id,
            name,
            location,
            delivery_days,
        } => {
            let update = SupplierUpdate {
                name,
                location,
                delivery_days,
            };
            let supplier = inventory.update_supplier(&id, update)?;
            println!("Updated {}", supplier);
            Ok(true)
        }

        SupplierCmd::Remove { id } => {
            let supplier = inventory.remove_supplier(&id)?;
            println!("Removed {}", supplier);
            Ok(true)
        }

        SupplierCmd::List => {
            for supplier in inventory.suppliers() {
                println!("{}", supplier);
            }
            Ok(false)
        }
    }
}

fn customer_command(inventory: &mut Inventory, cmd: CustomerCmd) -> Result<bool> {
    match cmd {
        CustomerCmd::Add { id, name, contact } => {
            let customer = Customer::new(id, name, contact);
            let line = customer.to_string();
            inventory.add_customer(customer)?;
            println!("Added {}", line);
            Ok(true)
        }

        CustomerCmd::Update { id, name, contact } => {
            let customer = inventory.update_customer(&id, CustomerUpdate { name, contact })?;
            println!("Updated {}", customer);
            Ok(true)
        }

        CustomerCmd::Remove { id } => {
            let customer = inventory.remove_customer(&id)?;
            println!("Removed {}", customer);
            Ok(true)
        }

        CustomerCmd::List => {
            for customer in inventory.customers() {
                println!("{}", customer);
            }
            Ok(false)
        }
    }
}

fn print_alerts(inventory: &Inventory) {
    let alerts = inventory.low_stock_alerts();
    if alerts.is_empty() {
        println!(
            "No drugs at or below the threshold of {}",
            inventory.stock_threshold()
        );
        return;
    }

    println!("Low stock (threshold {}):", inventory.stock_threshold());
    for alert in alerts {
        println!("  {}", alert);
    }
}

/// No ids and no `--clear-suppliers` leaves the list untouched
fn supplier_replacement(suppliers: Vec<String>, clear: bool) -> Option<Vec<String>> {
    if clear || !suppliers.is_empty() {
        Some(suppliers)
    } else {
        None
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn parse_price(s: &str) -> Result<Decimal, String> {
    parse_money(s).ok_or_else(|| format!("invalid price: {s:?}"))
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map_err(|e| format!("{s:?}: {e}"))
}
