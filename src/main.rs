use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use clientbook::config::{
    config_dir, load_clients, load_settings, save_clients, CLIENTS_TEMPLATE, SETTINGS_TEMPLATE,
};
use clientbook::{Client, ClientError, OutputFormat, Result, Settings};

#[derive(Parser)]
#[command(name = "clientbook")]
#[command(version, about = "Validated client records from delimited text and JSON", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.clientbook or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// Parse delimited records and print them
    Parse {
        /// Records in format "surname,name,patronymic,address,phone"
        #[arg(required = true, value_name = "RECORD")]
        records: Vec<String>,

        /// Field delimiter (default: from settings.toml, else ',')
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output format (default: from settings.toml)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Parse a JSON object and print it
    FromJson {
        /// JSON object with surname, name, patronymic, address and phone keys
        json: String,

        /// Output format (default: from settings.toml)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Validate every record in a file
    Check {
        /// File with one record per line; blank lines and '#' comments are skipped
        file: PathBuf,

        /// Field delimiter (default: from settings.toml, else ',')
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Treat each line as a JSON object instead of a delimited record
        #[arg(long)]
        json: bool,
    },

    /// Store a client in clients.toml
    Add {
        /// Identifier for the stored client
        id: String,

        /// Record in format "surname,name,patronymic,address,phone"
        record: String,

        /// Field delimiter (default: from settings.toml, else ',')
        #[arg(short, long)]
        delimiter: Option<char>,
    },

    /// Remove a stored client
    Remove {
        /// Client identifier from clients.toml
        id: String,
    },

    /// List stored clients
    List,

    /// Show a stored client
    Show {
        /// Client identifier from clients.toml
        id: String,

        /// Output format (default: from settings.toml)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print every stored client
    Export {
        /// Output format (default: from settings.toml)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Field delimiter for delimited output
        #[arg(short, long)]
        delimiter: Option<char>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };
    debug!(config_dir = %cfg_dir.display(), "resolved config directory");

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Parse {
            records,
            delimiter,
            format,
        } => cmd_parse(&cfg_dir, &records, delimiter, format),
        Commands::FromJson { json, format } => cmd_from_json(&cfg_dir, &json, format),
        Commands::Check {
            file,
            delimiter,
            json,
        } => cmd_check(&cfg_dir, &file, delimiter, json),
        Commands::Add {
            id,
            record,
            delimiter,
        } => cmd_add(&cfg_dir, &id, &record, delimiter),
        Commands::Remove { id } => cmd_remove(&cfg_dir, &id),
        Commands::List => cmd_list(&cfg_dir),
        Commands::Show { id, format } => cmd_show(&cfg_dir, &id, format),
        Commands::Export { format, delimiter } => cmd_export(&cfg_dir, format, delimiter),
    }
}

/// Delimiter and output format, with command-line values taking precedence
struct Effective {
    delimiter: char,
    format: OutputFormat,
}

fn effective(
    cfg_dir: &Path,
    delimiter: Option<char>,
    format: Option<OutputFormat>,
) -> Result<Effective> {
    let settings: Settings = load_settings(cfg_dir)?;
    Ok(Effective {
        delimiter: delimiter.unwrap_or(settings.records.delimiter),
        format: format.unwrap_or(settings.output.format),
    })
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    if cfg_dir.exists() {
        return Err(ClientError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("settings.toml"), SETTINGS_TEMPLATE)?;
    fs::write(cfg_dir.join("clients.toml"), CLIENTS_TEMPLATE)?;
    info!(config_dir = %cfg_dir.display(), "initialized config directory");

    println!("Initialized clientbook config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Adjust delimiter and output format:  $EDITOR {}/settings.toml",
        cfg_dir.display()
    );
    println!("  2. Add a client:");
    println!("     clientbook add <id> \"Surname,Name,Patronymic,Address,+1-555-123-4567\"");

    Ok(())
}

/// Print clients separated by a blank line for text output
fn print_clients<'a>(
    clients: impl IntoIterator<Item = &'a Client>,
    settings: &Effective,
) -> Result<()> {
    for (idx, client) in clients.into_iter().enumerate() {
        if idx > 0 && settings.format == OutputFormat::Text {
            println!();
        }
        println!("{}", settings.format.render(client, settings.delimiter)?);
    }
    Ok(())
}

fn cmd_parse(
    cfg_dir: &Path,
    records: &[String],
    delimiter: Option<char>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let settings = effective(cfg_dir, delimiter, format)?;

    let clients = records
        .iter()
        .map(|record| Client::from_delimited(record, settings.delimiter))
        .collect::<Result<Vec<_>>>()?;
    debug!(count = clients.len(), "parsed records");

    print_clients(&clients, &settings)
}

fn cmd_from_json(cfg_dir: &Path, json: &str, format: Option<OutputFormat>) -> Result<()> {
    let settings = effective(cfg_dir, None, format)?;
    let client = Client::from_json(json)?;
    debug!(client = %client.summary(), "parsed JSON record");

    print_clients([&client], &settings)
}

#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "LINE")]
    line: usize,
    #[tabled(rename = "STATUS")]
    status: &'static str,
    #[tabled(rename = "DETAIL")]
    detail: String,
}

/// Validate each record line of a file
fn cmd_check(cfg_dir: &Path, file: &Path, delimiter: Option<char>, json: bool) -> Result<()> {
    let settings = effective(cfg_dir, delimiter, None)?;
    let content = fs::read_to_string(file)?;

    let mut rows = Vec::new();
    let mut invalid = 0;

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parsed = if json {
            Client::from_json(trimmed)
        } else {
            Client::from_delimited(line, settings.delimiter)
        };

        let (status, detail) = match parsed {
            Ok(client) => ("ok", client.summary().to_string()),
            Err(e) => {
                invalid += 1;
                debug!(line = idx + 1, error = %e, "rejected record");
                ("invalid", e.to_string())
            }
        };
        rows.push(CheckRow {
            line: idx + 1,
            status,
            detail,
        });
    }

    if rows.is_empty() {
        println!("No records found in {}", file.display());
        return Ok(());
    }

    let total = rows.len();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!("{} of {} record(s) valid", total - invalid, total);

    if invalid > 0 {
        return Err(ClientError::InvalidRecords {
            path: file.to_path_buf(),
            count: invalid,
        });
    }
    Ok(())
}

fn cmd_add(cfg_dir: &Path, id: &str, record: &str, delimiter: Option<char>) -> Result<()> {
    let settings = effective(cfg_dir, delimiter, None)?;
    let mut clients = load_clients(cfg_dir)?;

    if clients.contains_key(id) {
        return Err(ClientError::DuplicateClient(id.to_string()));
    }

    let client = Client::from_delimited(record, settings.delimiter)?;
    let summary = client.summary().to_string();
    clients.insert(id.to_string(), client);
    save_clients(cfg_dir, &clients)?;
    info!(id, client = %summary, "stored client");

    println!("Added {summary} as '{id}'");
    Ok(())
}

fn cmd_remove(cfg_dir: &Path, id: &str) -> Result<()> {
    let mut clients = load_clients(cfg_dir)?;
    let client = clients
        .remove(id)
        .ok_or_else(|| ClientError::ClientNotFound(id.to_string()))?;
    save_clients(cfg_dir, &clients)?;
    println!("Removed {} ('{}')", client.summary(), id);
    Ok(())
}

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "SURNAME")]
    surname: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PATRONYMIC")]
    patronymic: String,
    #[tabled(rename = "PHONE")]
    phone: String,
}

/// List stored clients
fn cmd_list(cfg_dir: &Path) -> Result<()> {
    let clients = load_clients(cfg_dir)?;

    if clients.is_empty() {
        println!("No clients stored.");
        println!("Add clients with: clientbook add <id> <record>");
        return Ok(());
    }

    let rows: Vec<ClientRow> = clients
        .iter()
        .map(|(id, client)| ClientRow {
            id: id.clone(),
            surname: client.surname().to_string(),
            name: client.name().to_string(),
            patronymic: client.patronymic().to_string(),
            phone: client.phone().to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

fn cmd_show(cfg_dir: &Path, id: &str, format: Option<OutputFormat>) -> Result<()> {
    let settings = effective(cfg_dir, None, format)?;
    let clients = load_clients(cfg_dir)?;
    let client = clients
        .get(id)
        .ok_or_else(|| ClientError::ClientNotFound(id.to_string()))?;

    print_clients([client], &settings)
}

fn cmd_export(cfg_dir: &Path, format: Option<OutputFormat>, delimiter: Option<char>) -> Result<()> {
    let settings = effective(cfg_dir, delimiter, format)?;
    let clients = load_clients(cfg_dir)?;

    print_clients(clients.values(), &settings)
}
