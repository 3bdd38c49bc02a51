//! lectern CLI entry point

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use lectern::{
    api::ApiClient,
    commands::{
        cmd_acquire, cmd_collection_add, cmd_collection_create, cmd_collection_delete,
        cmd_collection_items, cmd_collection_list, cmd_collection_remove, cmd_fixtures, cmd_ingest,
        cmd_init, cmd_search, cmd_show, cmd_status, print_acquire_result, print_collection_items,
        print_collections, print_document, print_fixture_stats, print_ingest_report,
        print_search_results, print_status,
    },
    config::Config,
    error::{Error, Result},
    fixtures::FixtureKind,
    progress::LogWriterFactory,
    store::CollectionStore,
};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "lectern")]
#[command(version, about = "Personal research library CLI", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize lectern configuration and database
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Ingest a local path or URL via the API service
    Ingest {
        /// File, directory, or URL to ingest
        source: String,
    },

    /// Search the document index
    Search {
        /// The search query
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show a document's details
    Show {
        /// Document ID
        document_id: i64,
    },

    /// Show system status
    Status,

    /// Acquire a text from a remote catalog
    Acquire {
        /// Title to look for
        title: String,

        /// Author name to disambiguate
        #[arg(short, long)]
        author: Option<String>,

        /// Catalog to search (e.g. gutenberg)
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Manage collections
    Collection {
        #[command(subcommand)]
        action: CollectionAction,
    },

    /// Generate the synthetic fixture corpus
    Fixtures {
        /// Output directory (defaults to the configured fixtures dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only generate these formats
        #[arg(long, value_enum)]
        only: Option<Vec<FixtureFormat>>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Collection management actions
#[derive(Subcommand)]
enum CollectionAction {
    /// Create a new collection
    Create {
        /// Collection name
        name: String,
    },

    /// Add an item to a collection (duplicate additions are no-ops)
    Add {
        /// Collection ID
        collection_id: i64,

        /// Item ID
        item_id: i64,

        /// Item type discriminator
        #[arg(short = 't', long, default_value = "document")]
        item_type: String,
    },

    /// List collections, or a collection's items when an ID is given
    List {
        /// Collection ID
        collection_id: Option<i64>,
    },

    /// Remove an item from a collection
    Remove {
        /// Collection ID
        collection_id: i64,

        /// Item ID
        item_id: i64,

        /// Item type discriminator
        #[arg(short = 't', long, default_value = "document")]
        item_type: String,
    },

    /// Delete a collection and its memberships
    Delete {
        /// Collection ID
        collection_id: i64,
    },
}

/// Fixture format filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FixtureFormat {
    Epub,
    Pdf,
    Markdown,
}

impl From<FixtureFormat> for FixtureKind {
    fn from(format: FixtureFormat) -> Self {
        match format {
            FixtureFormat::Epub => FixtureKind::Epub,
            FixtureFormat::Pdf => FixtureKind::Pdf,
            FixtureFormat::Markdown => FixtureKind::Markdown,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(LogWriterFactory::default()))
        .with(filter)
        .init();

    // Handle init command specially (doesn't need existing config)
    if let Commands::Init { force } = cli.command {
        return handle_init(cli.config, force).await;
    }

    // Handle completions command (doesn't need config/db)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "lectern", &mut std::io::stdout());
        return Ok(());
    }

    // Load configuration
    let config = load_config(cli.config.as_deref())?;

    // Initialize components
    let store = CollectionStore::new(&config.paths.db_file).await?;
    let api = ApiClient::new(&config)?;

    // Handle commands
    match cli.command {
        Commands::Init { .. } | Commands::Completions { .. } => unreachable!(),

        Commands::Ingest { source } => {
            let report = cmd_ingest(&api, &source).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_ingest_report(&report);
            }
        }

        Commands::Search { query, limit } => {
            let response = cmd_search(&config, &api, &query, limit).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_search_results(&response);
            }
        }

        Commands::Show { document_id } => {
            let doc = cmd_show(&api, document_id).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print_document(&doc);
            }
        }

        Commands::Status => {
            let status = cmd_status(&config, &store, &api).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }

        Commands::Acquire {
            title,
            author,
            source,
        } => {
            let result = cmd_acquire(&api, &title, author, source).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_acquire_result(&result);
            }
        }

        Commands::Collection { action } => {
            handle_collection(&store, action, cli.json).await?;
        }

        Commands::Fixtures { output, only } => {
            let root = output.unwrap_or_else(|| config.fixtures_dir());
            let kinds: Vec<FixtureKind> = match only {
                Some(formats) => formats.into_iter().map(FixtureKind::from).collect(),
                None => vec![FixtureKind::Epub, FixtureKind::Pdf, FixtureKind::Markdown],
            };

            let stats = cmd_fixtures(&root, &kinds).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_fixture_stats(&stats);
            }
        }
    }

    Ok(())
}

async fn handle_init(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    // If the user points at a config file, use its parent as the base dir
    let (base_dir, config_file) = if let Some(path) = config_path {
        let base = path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(Config::default_base_dir);
        let config = if path.extension().map_or(false, |e| e == "toml") {
            path
        } else {
            path.join("config.toml")
        };
        (base, config)
    } else {
        let base = Config::default_base_dir();
        (base.clone(), base.join("config.toml"))
    };

    if config_file.exists() && !force {
        eprintln!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            config_file.display()
        );
        std::process::exit(1);
    }

    cmd_init(Some(base_dir), force).await?;

    println!("✓ lectern initialized successfully");
    println!("  Config: {}", config_file.display());
    println!("\nNext steps:");
    println!("  1. Edit the config file to point at your lectern API service");
    println!("  2. Ingest documents: lectern ingest /path/to/books");
    println!("  3. Group them: lectern collection create \"Ethics Readings\"");

    Ok(())
}

async fn handle_collection(
    store: &CollectionStore,
    action: CollectionAction,
    json: bool,
) -> Result<()> {
    match action {
        CollectionAction::Create { name } => {
            let created = cmd_collection_create(store, &name).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&created)?);
            } else {
                println!("✓ Created collection '{}' (id {})", created.name, created.id);
            }
        }

        CollectionAction::Add {
            collection_id,
            item_id,
            item_type,
        } => {
            cmd_collection_add(store, collection_id, &item_type, item_id).await?;
            if json {
                println!(r#"{{"status": "ok"}}"#);
            } else {
                println!(
                    "✓ Added {} {} to collection {}",
                    item_type, item_id, collection_id
                );
            }
        }

        CollectionAction::List {
            collection_id: Some(id),
        } => {
            let items = cmd_collection_items(store, id)
                .await?
                .ok_or(Error::CollectionNotFound(id))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                print_collection_items(id, &items);
            }
        }

        CollectionAction::List {
            collection_id: None,
        } => {
            let collections = cmd_collection_list(store).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&collections)?);
            } else {
                print_collections(&collections);
            }
        }

        CollectionAction::Remove {
            collection_id,
            item_id,
            item_type,
        } => {
            let removed = cmd_collection_remove(store, collection_id, &item_type, item_id).await?;
            if json {
                println!(r#"{{"removed": {}}}"#, removed);
            } else if removed {
                println!(
                    "✓ Removed {} {} from collection {}",
                    item_type, item_id, collection_id
                );
            } else {
                println!(
                    "Nothing to remove: {} {} is not in collection {}",
                    item_type, item_id, collection_id
                );
            }
        }

        CollectionAction::Delete { collection_id } => {
            let deleted = cmd_collection_delete(store, collection_id).await?;
            if json {
                println!(r#"{{"deleted": {}}}"#, deleted);
            } else if deleted {
                println!("✓ Deleted collection {}", collection_id);
            } else {
                println!("Collection {} does not exist", collection_id);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(Config::default_config_path);

    if !config_path.exists() {
        eprintln!(
            "Config file not found: {}\nRun 'lectern init' first.",
            config_path.display()
        );
        std::process::exit(1);
    }

    Config::load(&config_path)
}
