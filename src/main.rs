//! Item value catalog terminal viewer

use std::path::PathBuf;
use std::sync::atomic::Ordering;

use anyhow::Context as _;
use clap::{Arg, ArgMatches, Command};

mod calc;
mod catalog;
mod chart;
mod config;
mod fmt;
mod table;
mod view;

use crate::calc::CalcSummary;
use crate::catalog::{Catalog, SortKey, SortOrder};
use crate::chart::HistoryChart;
use crate::table::CatalogTable;
use crate::view::{TERM_COLUMNS, ViewData};

/// Fallback terminal column count (width)
const DEFAULT_TERM_COLUMNS: usize = 80;

/// Output a section title
fn output_title(title: &str) {
    let term_columns = TERM_COLUMNS.load(Ordering::SeqCst);
    println!("\n{:─^width$}", format!(" {title} "), width = term_columns);
}

/// Command line interface
fn cli() -> Command<'static> {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal viewer for a collectible item value catalog")
        .arg(
            Arg::new("catalog")
                .short('c')
                .long("catalog")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Catalog directory holding item TOML files"),
        )
        .subcommand(
            Command::new("list")
                .about("List catalog items")
                .arg(
                    Arg::new("search")
                        .short('s')
                        .long("search")
                        .value_name("TERM")
                        .value_parser(clap::value_parser!(String))
                        .help("Only show items whose name contains this term"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_name("KEY")
                        .value_parser(["name", "value"])
                        .default_value("value")
                        .help("Sort key"),
                )
                .arg(
                    Arg::new("order")
                        .long("order")
                        .value_name("ORDER")
                        .value_parser(["asc", "desc"])
                        .default_value("desc")
                        .help("Sort order"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show item details and value history")
                .arg(
                    Arg::new("item")
                        .value_name("ITEM")
                        .required(true)
                        .value_parser(clap::value_parser!(String))
                        .help("Item name, case-insensitive"),
                ),
        )
        .subcommand(
            Command::new("calc")
                .about("Compute the total value of a selection")
                .arg(
                    Arg::new("selection")
                        .value_name("NAME=QUANTITY")
                        .required(true)
                        .multiple_values(true)
                        .value_parser(clap::value_parser!(String))
                        .help("Selected items with quantities"),
                ),
        )
}

/// Pick the catalog directory from command line, config or XDG data dir
fn catalog_dir(matches: &ArgMatches, cfg: &config::Config) -> anyhow::Result<PathBuf> {
    if let Some(dir) = matches.get_one::<PathBuf>("catalog") {
        return Ok(dir.clone());
    }
    if let Some(dir) = &cfg.catalog.dir {
        return Ok(dir.clone());
    }
    config::default_catalog_dir()?.ok_or_else(|| {
        anyhow::anyhow!(
            "No catalog directory, pass --catalog or set catalog.dir in the configuration file"
        )
    })
}

/// Sort key from list subcommand arguments
fn sort_key(args: &ArgMatches) -> SortKey {
    match args.get_one::<String>("sort").map(String::as_str) {
        Some("name") => SortKey::Name,
        _ => SortKey::Value,
    }
}

/// Sort order from list subcommand arguments
fn sort_order(args: &ArgMatches) -> SortOrder {
    match args.get_one::<String>("order").map(String::as_str) {
        Some("asc") => SortOrder::Ascending,
        _ => SortOrder::Descending,
    }
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    // Get terminal width
    let term_columns = termsize::get().map_or(DEFAULT_TERM_COLUMNS, |s| s.cols.into());
    TERM_COLUMNS.store(term_columns, Ordering::SeqCst);

    // Parse local configuration
    let cfg = config::parse_config().context("Failed to read local configuration")?;

    // Load catalog
    let dir = catalog_dir(&matches, &cfg)?;
    let catalog = Catalog::load(&dir, &cfg.catalog)
        .with_context(|| format!("Failed to load catalog from {dir:?}"))?;

    match matches.subcommand() {
        Some(("show", args)) => {
            let item = catalog
                .find(args.get_one::<String>("item").map_or("", String::as_str))?
                .clone();
            let history = item.history.clone();
            output_title(&item.name);
            print!("{}", ViewData::Detail(item));
            output_title("Value history");
            print!("{}", ViewData::History(HistoryChart { points: history }));
        }
        Some(("calc", args)) => {
            let specs: Vec<String> = args
                .get_many::<String>("selection")
                .map(|v| v.cloned().collect())
                .unwrap_or_default();
            let summary = CalcSummary::build(&catalog, &specs)?;
            output_title("Value calculator");
            print!("{}", ViewData::Calc(summary));
        }
        _ => {
            // No subcommand defaults to the listing
            let (search, key, order) = match matches.subcommand() {
                Some(("list", args)) => (
                    args.get_one::<String>("search").cloned(),
                    sort_key(args),
                    sort_order(args),
                ),
                _ => (None, SortKey::Value, SortOrder::Descending),
            };
            let items = catalog.select(search.as_deref(), key, order);
            output_title("Item values");
            print!("{}", ViewData::Table(CatalogTable { items }));
        }
    }

    Ok(())
}
