use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plant_care::api::{self, AppState};
use plant_care::care::{self, CareStatus, ScheduleState};
use plant_care::catalog::Catalog;
use plant_care::config::{get_config_path, AppConfig, StorageKind};
use plant_care::identify::{Identifier, MockIdentifier};
use plant_care::models::*;
use plant_care::store::{self, CollectionStore, JsonFileStorage, KeyValueRepository, SqliteStorage};

#[derive(Parser)]
#[command(name = "plantcare")]
#[command(about = "Identify houseplants and keep track of their care")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Port for HTTP API (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List the plants in your collection
    List,
    /// Show plants that need water or fertilizer today
    Due,
    /// Search the species catalog
    Species {
        /// Matches common or scientific name, ignoring case
        query: Option<String>,
        /// easy, moderate or hard
        #[arg(short, long)]
        difficulty: Option<String>,
    },
    /// Browse care tips
    Tips {
        /// watering, light, soil, fertilizing, propagation, pests or general
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add a catalog species to your collection
    Adopt {
        species_id: String,
        #[arg(short, long)]
        nickname: Option<String>,
    },
    /// Record a watering
    Water { id: String },
    /// Record a fertilizer application
    Fertilize { id: String },
    /// Remove a plant from your collection
    Remove { id: String },
    /// Set the notes on a plant
    Note { id: String, text: String },
    /// Identify the plant in a photo
    Identify { image: String },
    /// Show the effective configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

/// Initialize tracing with output to stdout (server) or stderr (commands)
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| {
            if use_stderr {
                "plant_care=warn".into()
            } else {
                "plant_care=info,tower_http=info".into()
            }
        }),
    );

    if use_stderr {
        // Commands print their results on stdout
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn open_store(config: &AppConfig) -> anyhow::Result<CollectionStore> {
    match config.storage {
        StorageKind::Sqlite => {
            let storage = match &config.data_path {
                Some(path) => SqliteStorage::open(path.clone()),
                None => SqliteStorage::open_default(),
            }
            .context("Failed to open database")?;
            storage.migrate().context("Failed to run migrations")?;
            Ok(CollectionStore::open(KeyValueRepository::new(storage)))
        }
        StorageKind::Json => {
            let dir = match &config.data_path {
                Some(path) => path.clone(),
                None => store::default_data_dir()?,
            };
            tracing::info!("Using JSON storage in {}", dir.display());
            Ok(CollectionStore::open(KeyValueRepository::new(
                JsonFileStorage::new(dir),
            )))
        }
    }
}

fn describe(state: ScheduleState) -> String {
    match state {
        ScheduleState::NotScheduled => "not scheduled".to_string(),
        ScheduleState::Due { days_since } => format!("due ({} days since)", days_since),
        ScheduleState::Upcoming { days_left, .. } => format!("in {} days", days_left),
    }
}

fn print_plant(plant: &TrackedPlant, now: chrono::DateTime<Utc>) {
    let status = CareStatus::evaluate(plant, now);
    println!(
        "{:<4} {:<24} water: {:<22} fertilize: {}",
        plant.id(),
        plant.display_name(),
        describe(status.water),
        describe(status.fertilize)
    );
}

/// Warn when an id-keyed command will have nothing to act on.
fn check_tracked(store: &CollectionStore, id: &str) -> bool {
    if store.contains(id) {
        true
    } else {
        println!("No plant with id {} in your collection", id);
        false
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, Commands::Serve { .. });
    init_tracing(use_stderr);

    let config = AppConfig::load();
    let catalog = Arc::new(Catalog::builtin().context("Built-in catalog is invalid")?);

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.port);
            let store = open_store(&config)?;
            let identifier = Arc::new(MockIdentifier::new(
                catalog.clone(),
                config.identify_delay(),
            ));
            let app = api::create_router(AppState::new(catalog, store, identifier));

            let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
            tracing::info!("PlantCare API listening on http://127.0.0.1:{}", port);

            axum::serve(listener, app).await?;
        }
        Commands::List => {
            let store = open_store(&config)?;
            let plants = store.list();
            if plants.is_empty() {
                println!("Your collection is empty. Try `plantcare species` or `plantcare identify`.");
            }
            let now = Utc::now();
            for plant in &plants {
                print_plant(plant, now);
            }
        }
        Commands::Due => {
            let store = open_store(&config)?;
            let plants = store.list();
            let now = Utc::now();

            let thirsty = care::plants_needing_water(&plants, now);
            let hungry = care::plants_needing_fertilizer(&plants, now);
            if thirsty.is_empty() && hungry.is_empty() {
                println!("Nothing needs care today");
            }
            for plant in thirsty {
                println!("water      {} ({})", plant.display_name(), plant.id());
            }
            for plant in hungry {
                println!("fertilize  {} ({})", plant.display_name(), plant.id());
            }
        }
        Commands::Species { query, difficulty } => {
            let difficulty = match difficulty {
                Some(d) => Some(
                    Difficulty::from_str(&d)
                        .ok_or_else(|| anyhow::anyhow!("Invalid difficulty: {}", d))?,
                ),
                None => None,
            };
            let found = catalog.filter_species(query.as_deref().unwrap_or(""), difficulty);
            if found.is_empty() {
                println!("No species found");
            }
            for s in found {
                println!(
                    "{:<4} {:<22} {:<28} {:<9} water every {} days",
                    s.id,
                    s.name,
                    s.scientific_name,
                    s.difficulty.as_str(),
                    s.water_frequency
                );
            }
        }
        Commands::Tips { category } => {
            let category = match category.as_deref() {
                None | Some("all") => None,
                Some(c) => Some(
                    TipCategory::from_str(c)
                        .ok_or_else(|| anyhow::anyhow!("Invalid category: {}", c))?,
                ),
            };
            for tip in catalog.filter_tips(category) {
                println!("[{}] {}\n{}\n", tip.category.as_str(), tip.title, tip.content);
            }
        }
        Commands::Adopt {
            species_id,
            nickname,
        } => {
            let store = open_store(&config)?;
            let plant = store.adopt(&catalog, &species_id, nickname, Utc::now())?;
            println!("Added {} to your collection (id {})", plant.display_name(), plant.id());
        }
        Commands::Water { id } => {
            let store = open_store(&config)?;
            if check_tracked(&store, &id) {
                store.water(&id);
                println!("Watered {}", id);
            }
        }
        Commands::Fertilize { id } => {
            let store = open_store(&config)?;
            if check_tracked(&store, &id) {
                store.fertilize(&id);
                println!("Fertilized {}", id);
            }
        }
        Commands::Remove { id } => {
            let store = open_store(&config)?;
            if check_tracked(&store, &id) {
                store.remove(&id);
                println!("Removed {}", id);
            }
        }
        Commands::Note { id, text } => {
            let store = open_store(&config)?;
            if check_tracked(&store, &id) {
                store.update(
                    &id,
                    PlantUpdate {
                        notes: Some(text),
                        ..Default::default()
                    },
                );
                println!("Updated notes for {}", id);
            }
        }
        Commands::Identify { image } => {
            let identifier = MockIdentifier::new(catalog.clone(), config.identify_delay());
            match identifier.identify(&image).await {
                Some(species) => println!(
                    "Looks like {} ({}). Add it with `plantcare adopt {}`",
                    species.name, species.scientific_name, species.id
                ),
                None => println!("Could not identify a plant in {}", image),
            }
        }
        Commands::Config { init } => {
            if init {
                let path = AppConfig::default().save()?;
                println!("Wrote default configuration to {}", path.display());
            } else {
                println!("# {}", get_config_path()?.display());
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}
