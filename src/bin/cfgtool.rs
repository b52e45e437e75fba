//! cfgtool
//!
//! Command-line interface for reading and editing configuration files.

use std::path::PathBuf;
use std::process::ExitCode;

use cfgstore::{Config, Result, Store};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// cfgtool CLI
#[derive(Parser, Debug)]
#[command(name = "cfgtool")]
#[command(about = "Read and surgically edit INI-style configuration files")]
#[command(version)]
struct Args {
    /// Configuration file
    #[arg(short, long)]
    file: PathBuf,

    /// Directory for rewrite staging files
    #[arg(long)]
    temp_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create (or overwrite) an empty file
    Create {
        /// Comment lines written at the top
        #[arg(short, long)]
        comment: Vec<String>,
    },

    /// Print the values of a key, one per line
    Get {
        section: String,
        key: String,
    },

    /// Set a key to one or more values
    Set {
        section: String,
        key: String,
        values: Vec<String>,
    },

    /// List all sections
    Sections,

    /// List the keys of a section
    Keys {
        section: String,
    },

    /// Exit with status 0 if the section (or key) exists
    Exists {
        section: String,
        key: Option<String>,
    },

    /// Print one section without loading the whole file
    Read {
        section: String,
    },

    /// Dump the whole file as JSON
    Dump,
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,cfgstore=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let mut config = Config::builder();
    if let Some(dir) = &args.temp_dir {
        config = config.temp_dir(dir);
    }
    let config = config.build();

    match args.command {
        Commands::Create { comment } => {
            Store::create_with(&args.file, comment.as_slice(), config)?;
            tracing::info!("Created {}", args.file.display());
        }
        Commands::Get { section, key } => {
            let store = Store::load_with(&args.file, config)?;
            for value in store.get(&section, &key) {
                println!("{}", value);
            }
        }
        Commands::Set {
            section,
            key,
            values,
        } => {
            let store = Store::load_with(&args.file, config)?;
            store.set(&section, &key, values.as_slice())?;
            tracing::info!("Updated [{}] {} in {}", section, key, args.file.display());
        }
        Commands::Sections => {
            let store = Store::load_with(&args.file, config)?;
            let mut sections = store.list_sections();
            sections.sort();
            for section in sections {
                println!("{}", section);
            }
        }
        Commands::Keys { section } => {
            let store = Store::load_with(&args.file, config)?;
            match store.list_keys(&section) {
                Some(mut keys) => {
                    keys.sort();
                    for key in keys {
                        println!("{}", key);
                    }
                }
                None => {
                    tracing::warn!("No section [{}] in {}", section, args.file.display());
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Exists { section, key } => {
            let store = Store::load_with(&args.file, config)?;
            let found = match &key {
                Some(key) => store.exists(&[section.as_str(), key.as_str()]),
                None => store.exists(&[section.as_str()]),
            };
            if !found {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Read { section } => {
            let keys = cfgstore::read_section(&args.file, &section)?;
            let mut keys: Vec<_> = keys.into_iter().collect();
            keys.sort();
            for (key, values) in keys {
                println!("{} = {}", key, values.join(", "));
            }
        }
        Commands::Dump => {
            let store = Store::load_with(&args.file, config)?;
            println!("{}", store.to_json()?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
