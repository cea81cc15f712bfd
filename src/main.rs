//! Staybook CLI - Command-line interface for the rental marketplace schema

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use staybook::config::{self, StaybookConfig};
use staybook::storage::{schema, seed, SqliteStore};
use staybook::ui::{self, Icons};
use staybook::AmenityCategory;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "staybook")]
#[command(version)]
#[command(about = "Normalized rental marketplace schema on SQLite")]
#[command(long_about = r#"
Staybook materializes the rental marketplace schema in a SQLite database:
  • Location hierarchy (countries, states, cities)
  • Listing lookups (property types, categories, amenities)
  • Properties, bookings and payments with enforced foreign keys

Example usage:
  staybook init
  staybook schema --seed > schema.sql
  staybook add state --country "United States" --name California
  staybook list amenities --format json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Entity {
    Countries,
    States,
    Cities,
    PropertyTypes,
    PropertyCategories,
    Amenities,
    PaymentStatuses,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file, create the database and seed reference data
    Init {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Skip seeding the reference tables
        #[arg(long)]
        no_seed: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the schema as a SQL script
    Schema {
        /// Append the seed INSERT statements
        #[arg(long)]
        seed: bool,
    },

    /// Insert the example reference data (idempotent)
    Seed {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show row counts per table
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List rows of a reference table
    List {
        #[arg(value_enum)]
        entity: Entity,

        /// Restrict states to a country id, or cities to a state id
        #[arg(short, long)]
        parent: Option<i64>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a row to a reference table
    Add {
        /// Path to the database file
        #[arg(short, long, global = true)]
        database: Option<PathBuf>,

        #[command(subcommand)]
        entity: AddCommand,
    },

    /// Delete a property together with its amenity links
    DeleteProperty {
        /// Property id
        #[arg(long)]
        id: i64,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum AddCommand {
    /// Add a user by opaque identifier
    User {
        #[arg(long)]
        id: String,
    },
    /// Add a country
    Country {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
    },
    /// Add a state under a country (by country name)
    State {
        #[arg(long)]
        country: String,
        #[arg(long)]
        name: String,
    },
    /// Add a city under a state
    City {
        #[arg(long)]
        state_id: i64,
        #[arg(long)]
        name: String,
    },
    /// Add a property type
    PropertyType {
        #[arg(long)]
        name: String,
    },
    /// Add a property category
    PropertyCategory {
        #[arg(long)]
        name: String,
    },
    /// Add an amenity (basic, luxury, safety, accessibility)
    Amenity {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
    },
    /// Add a payment status
    PaymentStatus {
        #[arg(long)]
        name: String,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        ui::error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let loaded = config::load_config(Some(&config_path))?;

    match cli.command {
        Commands::Init { database, no_seed, force } => {
            let base = std::env::current_dir()?;
            let db_path = config::resolve_database_path(database, loaded.as_ref(), &base);
            let new_config = StaybookConfig {
                database: Some(db_path.to_string_lossy().to_string()),
                seed: Some(!no_seed),
            };
            config::write_config(&config_path, &new_config, force)?;
            tracing::info!("Wrote config {}", config_path.display());

            let store = open_store(&db_path)?;
            ui::header("Initialized Staybook database");
            ui::info("Config", &config_path.display().to_string());
            ui::info("Database", &db_path.display().to_string());

            if new_config.seed_enabled() {
                let report = store.seed_reference_data()?;
                ui::summary_row(Icons::SEED, &format!("{} reference rows seeded", report.total()));
            }
            ui::success("Schema ready");
        }

        Commands::Schema { seed: with_seed } => {
            print!("{}", schema::ddl_script());
            if with_seed {
                print!("{}", seed::seed_script());
            }
        }

        Commands::Seed { database } => {
            let db_path = database_path(database, loaded.as_ref())?;
            let store = open_store(&db_path)?;
            let report = store.seed_reference_data()?;

            if report.total() == 0 {
                ui::success("Reference data already present, nothing to seed");
            } else {
                ui::section("Seeded");
                for (table, count) in &report.inserted {
                    ui::summary_row(table, &count.to_string());
                }
                ui::success(&format!("{} rows inserted", report.total()));
            }
        }

        Commands::Stats { database, format } => {
            let db_path = database_path(database, loaded.as_ref())?;
            let store = open_store(&db_path)?;
            let stats = store.stats()?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                OutputFormat::Text => {
                    println!("{} Staybook Statistics ({})", Icons::STATS, db_path.display());
                    println!("{}", ui::stats_table(&stats.tables));
                }
            }
        }

        Commands::List { entity, parent, database, format } => {
            let db_path = database_path(database, loaded.as_ref())?;
            let store = open_store(&db_path)?;
            let listing = list_entity(&store, entity, parent)?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listing.json)?),
                OutputFormat::Text => {
                    if listing.rows.is_empty() {
                        println!("∅ No rows found.");
                    } else {
                        println!("{}", ui::records_table(listing.headers, listing.rows));
                    }
                }
            }
        }

        Commands::Add { database, entity } => {
            let db_path = database_path(database, loaded.as_ref())?;
            let store = open_store(&db_path)?;
            add_entity(&store, entity)?;
        }

        Commands::DeleteProperty { id, database } => {
            let db_path = database_path(database, loaded.as_ref())?;
            let store = open_store(&db_path)?;

            let links = store.count_property_amenities(id)?;
            let deleted = store
                .delete_property(id)
                .with_context(|| format!("deleting property {}", id))?;

            if deleted {
                ui::success(&format!("Deleted property {} ({} amenity links removed)", id, links));
            } else {
                ui::warn(&format!("Property {} does not exist", id));
            }
        }
    }

    Ok(())
}

fn database_path(flag: Option<PathBuf>, loaded: Option<&StaybookConfig>) -> anyhow::Result<PathBuf> {
    let base = std::env::current_dir()?;
    Ok(config::resolve_database_path(flag, loaded, &base))
}

fn open_store(db_path: &Path) -> anyhow::Result<SqliteStore> {
    config::ensure_db_dir(db_path)?;
    let store = SqliteStore::open(db_path)
        .with_context(|| format!("opening database {}", db_path.display()))?;
    tracing::debug!("Using database {}", db_path.display());
    Ok(store)
}

struct Listing {
    headers: &'static [&'static str],
    rows: Vec<Vec<String>>,
    json: serde_json::Value,
}

fn list_entity(store: &SqliteStore, entity: Entity, parent: Option<i64>) -> anyhow::Result<Listing> {
    if parent.is_some() && !matches!(entity, Entity::States | Entity::Cities) {
        anyhow::bail!("--parent only applies to states and cities");
    }
    let listing = match entity {
        Entity::Countries => {
            let countries = store.list_countries()?;
            Listing {
                headers: &["ID", "Name", "Code"],
                rows: countries
                    .iter()
                    .map(|c| vec![c.country_id.to_string(), c.country_name.clone(), c.country_code.clone()])
                    .collect(),
                json: serde_json::to_value(&countries)?,
            }
        }
        Entity::States => {
            let states = store.list_states(parent)?;
            Listing {
                headers: &["ID", "Country", "Name"],
                rows: states
                    .iter()
                    .map(|s| vec![s.state_id.to_string(), s.country_id.to_string(), s.state_name.clone()])
                    .collect(),
                json: serde_json::to_value(&states)?,
            }
        }
        Entity::Cities => {
            let cities = store.list_cities(parent)?;
            Listing {
                headers: &["ID", "State", "Name"],
                rows: cities
                    .iter()
                    .map(|c| vec![c.city_id.to_string(), c.state_id.to_string(), c.city_name.clone()])
                    .collect(),
                json: serde_json::to_value(&cities)?,
            }
        }
        Entity::PropertyTypes => {
            let types = store.list_property_types()?;
            Listing {
                headers: &["ID", "Type"],
                rows: types
                    .iter()
                    .map(|t| vec![t.property_type_id.to_string(), t.type_name.clone()])
                    .collect(),
                json: serde_json::to_value(&types)?,
            }
        }
        Entity::PropertyCategories => {
            let categories = store.list_property_categories()?;
            Listing {
                headers: &["ID", "Category"],
                rows: categories
                    .iter()
                    .map(|c| vec![c.property_category_id.to_string(), c.category_name.clone()])
                    .collect(),
                json: serde_json::to_value(&categories)?,
            }
        }
        Entity::Amenities => {
            let amenities = store.list_amenities()?;
            Listing {
                headers: &["ID", "Amenity", "Category"],
                rows: amenities
                    .iter()
                    .map(|a| {
                        vec![
                            a.amenity_id.to_string(),
                            a.amenity_name.clone(),
                            a.amenity_category.to_string(),
                        ]
                    })
                    .collect(),
                json: serde_json::to_value(&amenities)?,
            }
        }
        Entity::PaymentStatuses => {
            let statuses = store.list_payment_statuses()?;
            Listing {
                headers: &["ID", "Status"],
                rows: statuses
                    .iter()
                    .map(|s| vec![s.payment_status_id.to_string(), s.status_name.clone()])
                    .collect(),
                json: serde_json::to_value(&statuses)?,
            }
        }
    };
    Ok(listing)
}

fn add_entity(store: &SqliteStore, entity: AddCommand) -> anyhow::Result<()> {
    match entity {
        AddCommand::User { id } => {
            store.insert_user(&id).with_context(|| format!("adding user {}", id))?;
            ui::success(&format!("Added user {}", id));
        }
        AddCommand::Country { name, code } => {
            let country_id = store
                .insert_country(&name, &code)
                .with_context(|| format!("adding country {}", name))?;
            ui::success(&format!("Added country {} ({}) with id {}", name, code, country_id));
        }
        AddCommand::State { country, name } => {
            let Some(parent) = store.find_country_by_name(&country)? else {
                anyhow::bail!("unknown country: {}", country);
            };
            let state_id = store
                .insert_state(parent.country_id, &name)
                .with_context(|| format!("adding state {} to {}", name, country))?;
            ui::success(&format!("Added state {} with id {}", name, state_id));
        }
        AddCommand::City { state_id, name } => {
            let city_id = store
                .insert_city(state_id, &name)
                .with_context(|| format!("adding city {} to state {}", name, state_id))?;
            ui::success(&format!("Added city {} with id {}", name, city_id));
        }
        AddCommand::PropertyType { name } => {
            let id = store
                .insert_property_type(&name)
                .with_context(|| format!("adding property type {}", name))?;
            ui::success(&format!("Added property type {} with id {}", name, id));
        }
        AddCommand::PropertyCategory { name } => {
            let id = store
                .insert_property_category(&name)
                .with_context(|| format!("adding property category {}", name))?;
            ui::success(&format!("Added property category {} with id {}", name, id));
        }
        AddCommand::Amenity { name, category } => {
            let category: AmenityCategory = category.parse()?;
            let id = store
                .insert_amenity(&name, category)
                .with_context(|| format!("adding amenity {}", name))?;
            ui::success(&format!("Added {} amenity {} with id {}", category, name, id));
        }
        AddCommand::PaymentStatus { name } => {
            let id = store
                .insert_payment_status(&name)
                .with_context(|| format!("adding payment status {}", name))?;
            ui::success(&format!("Added payment status {} with id {}", name, id));
        }
    }
    Ok(())
}
