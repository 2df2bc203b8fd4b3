//! `albumfilter` command-line entry point.
//!
//! # Responsibility
//! - Expose fragment building/parsing and the album library to the shell.
//! - Keep output plain and line-oriented for scripting.

use albumfilter_core::db::open_db;
use albumfilter_core::{
    core_version, init_logging, parse_album_type, parse_tab, parse_type_query,
    type_query_fragment, AlbumService, AlbumType, AppConfig, SqliteAlbumRepository, TabKind,
    TypeFilterControl,
};
use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "albumfilter")]
#[command(about = "Build and apply album type query fragments", long_about = None)]
struct Cli {
    /// Album database path (overrides ALBUMFILTER_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a fragment from checkbox states
    Query {
        /// Controls as NAME=on|off, in display order
        #[arg(value_parser = parse_control)]
        controls: Vec<TypeFilterControl>,

        /// Read controls as a JSON array from FILE (`-` for stdin)
        #[arg(long, conflicts_with = "controls")]
        json: Option<PathBuf>,
    },

    /// Show the include/exclude lists of a fragment
    Parse {
        fragment: String,
    },

    /// Add an album to the library
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        artist: String,

        /// Album type id (lp, ep, compilation, live, various, demo, single)
        #[arg(long = "type", value_parser = parse_type_arg, default_value = "lp")]
        kind: AlbumType,

        #[arg(long)]
        year: Option<i32>,
    },

    /// List albums matching a fragment
    List {
        #[arg(long, default_value = "")]
        query: String,

        #[arg(long)]
        artist: Option<String>,
    },

    /// Show browsing tabs (All, then each type) with album counts
    Tabs {
        /// Tab to mark active: `all` or a type id (default: first populated tab)
        #[arg(long, value_parser = parse_tab_arg)]
        active: Option<TabKind>,

        #[arg(long)]
        artist: Option<String>,
    },

    /// Print the core version
    Version,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = AppConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    match cli.command {
        Commands::Query { controls, json } => {
            let controls = match json {
                Some(path) => read_json_controls(&path)?,
                None => controls,
            };
            println!("{}", type_query_fragment(&controls));
        }
        Commands::Parse { fragment } => {
            let filter = parse_type_query(&fragment)?;
            println!("include: {}", filter.included().collect::<Vec<_>>().join(","));
            println!("exclude: {}", filter.excluded().collect::<Vec<_>>().join(","));
        }
        Commands::Add {
            title,
            artist,
            kind,
            year,
        } => {
            let conn = open_db(&config.db_path)?;
            let service = AlbumService::new(SqliteAlbumRepository::new(&conn));
            let id = service.add_album(title, artist, kind, year)?;
            info!("event=cli_add module=cli status=ok type={kind}");
            println!("{id}");
        }
        Commands::List { query, artist } => {
            let conn = open_db(&config.db_path)?;
            let service = AlbumService::new(SqliteAlbumRepository::new(&conn));
            for album in service.albums_for_query(&query, artist.as_deref())? {
                let year = album
                    .release_year
                    .map_or_else(|| "-".to_string(), |year| year.to_string());
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    album.uuid, album.kind, year, album.artist, album.title
                );
            }
        }
        Commands::Tabs { active, artist } => {
            let conn = open_db(&config.db_path)?;
            let service = AlbumService::new(SqliteAlbumRepository::new(&conn));
            let active = match active {
                Some(kind) => Some(kind),
                None => service.default_tab(artist.as_deref())?,
            };
            for tab in service.type_tabs(active, artist.as_deref())? {
                let marker = if tab.active { "*" } else { " " };
                println!("{marker} {:<16}{}", tab.display_name, tab.count);
            }
        }
        Commands::Version => println!("albumfilter {}", core_version()),
    }

    Ok(())
}

fn read_json_controls(path: &Path) -> Result<Vec<TypeFilterControl>, Box<dyn Error>> {
    let mut raw = String::new();
    if path.as_os_str() == "-" {
        std::io::stdin().read_to_string(&mut raw)?;
    } else {
        raw = std::fs::read_to_string(path)?;
    }
    Ok(serde_json::from_str(&raw)?)
}

fn parse_control(value: &str) -> Result<TypeFilterControl, String> {
    let (name, state) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=on|off, got `{value}`"))?;
    let checked = match state {
        "on" | "true" | "1" => true,
        "off" | "false" | "0" => false,
        other => return Err(format!("unknown state `{other}`; expected on|off")),
    };
    Ok(TypeFilterControl::new(name, checked))
}

fn parse_type_arg(value: &str) -> Result<AlbumType, String> {
    parse_album_type(value).map_err(|err| err.to_string())
}

fn parse_tab_arg(value: &str) -> Result<TabKind, String> {
    parse_tab(value).map_err(|err| err.to_string())
}
