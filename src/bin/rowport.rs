use clap::{Parser, Subcommand};
use rowport::cli as prog_cli;
use rowport::store::{JsonFileStore, MemoryStore, RecordStore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct AppConfig {
    store_path: Option<PathBuf>,
    log_config: Option<PathBuf>,
    default_collection: Option<String>,
}

fn load_config(cli_cfg: Option<PathBuf>) -> AppConfig {
    // Precedence: CLI > env > config files > defaults
    let mut cfg = AppConfig::default();
    let mut paths: Vec<PathBuf> = vec![];
    if let Some(p) = cli_cfg {
        paths.push(p);
    }
    if let Ok(p) = std::env::var("ROWPORT_CONFIG") {
        paths.push(PathBuf::from(p));
    }
    if let Some(dir) = dirs_next::config_dir() {
        paths.push(dir.join("rowport.toml"));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join("rowport.toml"));
    }
    for p in paths {
        if p.exists()
            && let Ok(s) = std::fs::read_to_string(&p)
            && let Ok(file_cfg) = toml::from_str::<AppConfig>(&s)
        {
            if cfg.store_path.is_none() {
                cfg.store_path = file_cfg.store_path;
            }
            if cfg.log_config.is_none() {
                cfg.log_config = file_cfg.log_config;
            }
            if cfg.default_collection.is_none() {
                cfg.default_collection = file_cfg.default_collection;
            }
        }
    }
    if cfg.store_path.is_none()
        && let Ok(s) = std::env::var("ROWPORT_STORE")
    {
        cfg.store_path = Some(PathBuf::from(s));
    }
    if cfg.log_config.is_none()
        && let Ok(s) = std::env::var("ROWPORT_LOG_CONFIG")
    {
        cfg.log_config = Some(PathBuf::from(s));
    }
    if cfg.default_collection.is_none()
        && let Ok(s) = std::env::var("ROWPORT_DEFAULT_COLLECTION")
    {
        cfg.default_collection = Some(s);
    }
    cfg
}

#[derive(Parser, Debug)]
#[command(name = "rowport", version, about = "CSV import/export for record collections", long_about = None)]
struct Cli {
    /// Path to a config file (TOML)
    #[arg(long, help = "Path to a config file (TOML). If omitted, defaults are used.")]
    config: Option<PathBuf>,
    /// Override the store file (takes precedence over config)
    #[arg(long, help = "Path to the JSON store file. An in-memory store is used when omitted.")]
    store: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Import a CSV file into a collection")]
    Import {
        #[arg(help = "Path to the CSV file to import")]
        file: PathBuf,
        #[arg(long, help = "Target collection; falls back to the profile or default_collection")]
        collection: Option<String>,
        #[arg(long, help = "Entity profile: contacts|events|documents")]
        profile: Option<String>,
        #[arg(long, value_delimiter = ',', help = "Comma-separated fields that must be present and non-empty")]
        required: Option<Vec<String>>,
        #[arg(long, help = "Field used for duplicate detection")]
        unique_field: Option<String>,
        #[arg(long, help = "Skip the duplicate check against the store before inserting")]
        no_store_check: bool,
        #[arg(long, help = "Field delimiter: a single character, or 'tab'")]
        delimiter: Option<String>,
        #[arg(long, help = "Infer integers, floats and booleans from field text")]
        infer_types: bool,
    },
    #[command(about = "Export a collection to CSV")]
    Export {
        #[arg(long, help = "Collection to export; falls back to the profile or default_collection")]
        collection: Option<String>,
        #[arg(long, help = "Output file, or directory for a date-stamped filename")]
        out: Option<PathBuf>,
        #[arg(long, help = "Entity profile: contacts|events|documents")]
        profile: Option<String>,
        #[arg(long, value_delimiter = ',', help = "Comma-separated fields to leave out of the export")]
        exclude: Option<Vec<String>>,
        #[arg(long, help = "Filename stem for the date-stamped output name")]
        filename: Option<String>,
    },
    #[command(name = "list-collections", about = "List collection names in the store")]
    ListCollections,
    #[command(about = "Count records in a collection")]
    Count {
        #[arg(help = "Collection name")]
        collection: String,
    },
}

fn build_store(
    cli_store: Option<PathBuf>,
    cfg: &AppConfig,
) -> Result<Box<dyn RecordStore>, Box<dyn std::error::Error>> {
    match cli_store.or_else(|| cfg.store_path.clone()) {
        Some(path) => Ok(Box::new(JsonFileStore::open(path)?)),
        None => Ok(Box::new(MemoryStore::new())),
    }
}

fn main() {
    let cli = Cli::parse();
    let cfg = load_config(cli.config.clone());
    if let Err(e) = rowport::logger::init(cfg.log_config.as_deref()) {
        eprintln!("warning: logging not initialized: {e}");
    }
    let store = match build_store(cli.store.clone(), &cfg) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let def_col = cfg.default_collection.clone();

    let cmd = match cli.command {
        Commands::Import {
            file,
            collection,
            profile,
            required,
            unique_field,
            no_store_check,
            delimiter,
            infer_types,
        } => prog_cli::Command::Import {
            file,
            collection: collection.or_else(|| def_col.clone()),
            profile,
            required_fields: required,
            unique_field,
            check_store_duplicates: !no_store_check,
            delimiter,
            infer_types,
        },
        Commands::Export { collection, out, profile, exclude, filename } => {
            prog_cli::Command::Export {
                collection: collection.or_else(|| def_col.clone()),
                out,
                profile,
                exclude_fields: exclude,
                filename,
            }
        }
        Commands::ListCollections => prog_cli::Command::ColList,
        Commands::Count { collection } => prog_cli::Command::Count { collection },
    };

    if let Err(e) = prog_cli::run(store.as_ref(), cmd) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
