//! Pets CLI - catalog and editor for the shelter database

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use pets::config::{self, PetsConfig};
use pets::contract::content_uri;
use pets::ui::{self, Change, Icons};
use pets::uri::resolve;
use pets::{ContentUri, ContentValues, Gender, Pet, PetDbHelper, PetEntry, PetForm, PetProvider, Resource};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pets")]
#[command(version)]
#[command(about = "Shelter record store - list, add, edit and remove pets")]
#[command(long_about = r#"
Pets keeps a catalog of shelter animals in a local SQLite database and
exposes it through content URIs:
  content://com.example.android.pets/pets      every pet
  content://com.example.android.pets/pets/<id> one pet

Example usage:
  pets init
  pets add --name Totto --breed Terrier --gender male --weight 7
  pets list
  pets put content://com.example.android.pets/pets/1 '{"weight": 8}'
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (overrides pets.toml)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    fn is_human(self) -> bool {
        self == OutputMode::Text
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write pets.toml and create the database
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// List every pet
    List {
        /// Sort order, e.g. "name ASC"
        #[arg(short, long, default_value = "_id ASC")]
        sort: String,
    },

    /// Show one pet
    Show {
        /// Pet id
        id: i64,
    },

    /// Add a pet
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        breed: Option<String>,

        /// male, female or unknown
        #[arg(short, long)]
        gender: Option<String>,

        /// Weight in kg (defaults to 0)
        #[arg(short, long)]
        weight: Option<i64>,
    },

    /// Change some fields of a pet
    Edit {
        /// Pet id
        id: i64,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        breed: Option<String>,

        /// male, female or unknown
        #[arg(short, long)]
        gender: Option<String>,

        #[arg(short, long)]
        weight: Option<i64>,
    },

    /// Remove one pet
    Remove {
        /// Pet id
        id: i64,
    },

    /// Remove every pet
    Clear,

    /// Insert the sample pet (Totto, Terrier, male, 7 kg)
    Seed,

    /// Insert into or update a content URI with a JSON object of column values
    Put {
        /// Collection URI to insert into, or row URI to update
        uri: String,

        /// Column values, e.g. '{"name": "Rex", "weight": 5}'
        values: String,
    },

    /// Print the MIME type of a content URI
    Type {
        uri: String,
    },

    /// Show statistics about the database
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

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

    if let Err(err) = run(&cli) {
        if cli.format.is_human() {
            ui::error(&format!("{:#}", err));
        } else {
            emit(OutputMode::Json, "error", serde_json::json!({ "message": format!("{:#}", err) }))?;
        }
        std::process::exit(1);
    }
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let output = cli.format;

    match &cli.command {
        Commands::Init { force } => {
            let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
            let database = cli
                .database
                .clone()
                .unwrap_or_else(|| config::default_database_path_in(Path::new(".")));
            let pets_config = PetsConfig {
                database: Some(database.to_string_lossy().into_owned()),
                version: None,
            };
            config::write_config(&config_path, &pets_config, *force)?;

            config::ensure_db_dir(&database)?;
            let helper = PetDbHelper::new(&database, pets_config.schema_version());
            helper.ensure_schema()?;

            if output.is_human() {
                ui::success(&format!("Wrote {}", config_path.display()));
                ui::detail("Database", &database.display().to_string());
            } else {
                emit(output, "init", serde_json::json!({
                    "config": config_path,
                    "database": database,
                }))?;
            }
        }

        Commands::List { sort } => {
            let provider = open_provider(cli)?;
            let cursor = provider.query(&content_uri(), Some(&PetEntry::ALL_COLUMNS[..]), None, &[], Some(sort.as_str()))?;
            let pets = cursor.rows().map(|row| Pet::from_row(&row)).collect::<pets::Result<Vec<_>>>()?;

            if output.is_human() {
                ui::catalog_header(pets.len());
                if !pets.is_empty() {
                    println!("{}", ui::pets_table(&pets));
                }
            } else {
                emit(output, "list", serde_json::to_value(&pets)?)?;
            }
        }

        Commands::Show { id } => {
            let provider = open_provider(cli)?;
            let pet = find_pet(&provider, *id)?;

            if output.is_human() {
                ui::pet_card(&pet);
            } else {
                emit(output, "show", serde_json::to_value(&pet)?)?;
            }
        }

        Commands::Add { name, breed, gender, weight } => {
            let provider = open_provider(cli)?;
            let form = PetForm {
                name: Some(name.clone()),
                breed: breed.clone(),
                gender: gender.as_deref().map(Gender::from_label),
                weight: *weight,
            };
            let uri = provider.insert(&content_uri(), &form.to_insert_values())?;
            report_saved(output, &uri)?;
        }

        Commands::Edit { id, name, breed, gender, weight } => {
            let provider = open_provider(cli)?;
            let form = PetForm {
                name: name.clone(),
                breed: breed.clone(),
                gender: gender.as_deref().map(Gender::from_label),
                weight: *weight,
            };
            let values = form.to_update_values();
            let uri = content_uri().with_appended_id(*id);
            if values.is_empty() {
                if output.is_human() {
                    ui::warn("Nothing to change: pass at least one of --name, --breed, --gender, --weight");
                } else {
                    report_count(output, "edit", &uri, 0, Change::Updated)?;
                }
                return Ok(());
            }

            let updated = provider.update(&uri, &values, None, &[])?;
            report_count(output, "edit", &uri, updated, Change::Updated)?;
        }

        Commands::Remove { id } => {
            let provider = open_provider(cli)?;
            let uri = content_uri().with_appended_id(*id);
            let deleted = provider.delete(&uri, None, &[])?;
            report_count(output, "remove", &uri, deleted, Change::Deleted)?;
        }

        Commands::Clear => {
            let provider = open_provider(cli)?;
            let deleted = provider.delete(&content_uri(), None, &[])?;
            report_count(output, "clear", &content_uri(), deleted, Change::Deleted)?;
        }

        Commands::Seed => {
            let provider = open_provider(cli)?;
            let uri = provider.insert(&content_uri(), &PetForm::dummy().to_insert_values())?;
            report_saved(output, &uri)?;
        }

        Commands::Put { uri, values } => {
            let provider = open_provider(cli)?;
            let uri = ContentUri::parse(uri)?;
            let json: serde_json::Value = serde_json::from_str(values)?;
            let values = ContentValues::try_from(&json)?;

            match resolve(&uri)? {
                Resource::Collection => {
                    let new_uri = provider.insert(&uri, &values)?;
                    report_saved(output, &new_uri)?;
                }
                Resource::Item(_) => {
                    let updated = provider.update(&uri, &values, None, &[])?;
                    report_count(output, "put", &uri, updated, Change::Updated)?;
                }
            }
        }

        Commands::Type { uri } => {
            let provider = open_provider(cli)?;
            let uri = ContentUri::parse(uri)?;
            let mime = provider.get_type(&uri)?;

            if output.is_human() {
                println!("{}", mime);
            } else {
                emit(output, "type", serde_json::json!({ "uri": uri, "type": mime }))?;
            }
        }

        Commands::Stats => {
            let provider = open_provider(cli)?;
            let stats = provider.db().stats()?;

            if output.is_human() {
                println!("{} Pets Statistics", Icons::STATS);
                let path = stats
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(in memory)".to_string());
                let version = stats.version.to_string();
                let count = stats.pets.to_string();
                println!(
                    "{}",
                    ui::stats_table(&[("Database", &path), ("Schema version", &version), ("Pets", &count)])
                );
            } else {
                emit(output, "stats", serde_json::json!({
                    "database": stats.path,
                    "version": stats.version,
                    "pets": stats.pets,
                }))?;
            }
        }
    }

    Ok(())
}

fn open_provider(cli: &Cli) -> anyhow::Result<PetProvider> {
    let pets_config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let database = pets_config.database_path(cli.database.as_deref(), Path::new("."));
    config::ensure_db_dir(&database)?;

    tracing::debug!("Opening {} at schema version {}", database.display(), pets_config.schema_version());
    Ok(PetProvider::new(PetDbHelper::new(database, pets_config.schema_version())))
}

fn find_pet(provider: &PetProvider, id: i64) -> anyhow::Result<Pet> {
    let uri = content_uri().with_appended_id(id);
    let cursor = provider.query(&uri, Some(&PetEntry::ALL_COLUMNS[..]), None, &[], None)?;
    match cursor.rows().next() {
        Some(row) => Ok(Pet::from_row(&row)?),
        None => anyhow::bail!("no pet with id {}", id),
    }
}

fn report_saved(output: OutputMode, uri: &ContentUri) -> anyhow::Result<()> {
    if output.is_human() {
        ui::pet_saved(uri);
        Ok(())
    } else {
        emit(output, "saved", serde_json::json!({ "uri": uri, "id": uri.parse_id() }))
    }
}

fn report_count(
    output: OutputMode,
    command: &str,
    uri: &ContentUri,
    count: usize,
    change: Change,
) -> anyhow::Result<()> {
    if output.is_human() {
        ui::pets_changed(change, count, uri);
        Ok(())
    } else {
        emit(output, command, count_data(uri, count))
    }
}

fn count_data(uri: &ContentUri, count: usize) -> serde_json::Value {
    serde_json::json!({ "uri": uri, "rows": count })
}

fn emit(output: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    debug_assert!(!output.is_human());
    println!("{}", serde_json::to_string_pretty(&envelope(command, data))?);
    Ok(())
}

fn envelope(command: &str, data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "command": command,
        "data": data,
    })
}
