//! Command-line viewer for JSON tables.
//!
//! Loads an array of JSON objects, applies sort, filter, selection and
//! pagination from the command line and prints the visible page.

mod error;
mod render;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, debug, info};
use simplelog::{ConfigBuilder, WriteLogger};
use tabula_lib::model::{Record, TableRow};
use tabula_lib::query::{MatchMode, SortState};
use tabula_lib::{Align, Column, DataTable, TableConfig};

use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "tabula", about = "Sort, filter and page through a JSON table")]
struct Args {
    /// JSON file holding an array of objects
    file: PathBuf,

    /// Field used as the row identity
    #[arg(long, default_value = "id")]
    id_field: String,

    /// Comma-separated columns to show (default: all fields of the first row)
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Sort as `column` or `column:asc` / `column:desc`
    #[arg(long)]
    sort: Option<SortState>,

    /// Global search across all columns
    #[arg(long)]
    search: Option<String>,

    /// Use fuzzy matching for --search
    #[arg(long)]
    fuzzy: bool,

    /// Column filter as `column=value` (repeatable)
    #[arg(long = "filter")]
    filters: Vec<String>,

    /// Select a row by key (repeatable, combines with --select-all)
    #[arg(long = "select")]
    selected: Vec<String>,

    /// Select every row matching the filters
    #[arg(long)]
    select_all: bool,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page (overrides the config)
    #[arg(long)]
    page_size: Option<usize>,

    /// JSON table config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(path) = &args.log_file
        && let Err(e) = init_logger(path, args.verbose)
    {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logger(path: &Path, verbose: u8) -> Result<(), CliError> {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let log_file = File::create(path).map_err(|source| CliError::io(path, source))?;
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    WriteLogger::init(level, config, log_file)?;
    Ok(())
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::io(path, source))
}

fn run(args: &Args) -> Result<String, CliError> {
    let mut config = match &args.config {
        Some(path) => TableConfig::from_json(&read(path)?)?,
        None => TableConfig::default(),
    };
    if let Some(size) = args.page_size {
        config = config.default_page_size(size);
    }
    if args.fuzzy {
        config = config.global_match(MatchMode::Fuzzy);
    }

    let rows = Record::parse_array(&read(&args.file)?, &args.id_field)?;
    info!("Loaded {} rows from {}", rows.len(), args.file.display());

    let columns = build_columns(&args.columns, &rows);
    debug!(
        "Columns: {:?}",
        columns.iter().map(|c| c.id.as_str()).collect::<Vec<_>>()
    );

    let mut table = DataTable::with_config(columns, rows, config)?.default_sort(args.sort.clone());

    if let Some(query) = &args.search {
        table.set_global_filter(query.as_str());
    }
    for filter in &args.filters {
        let (column, value) = filter
            .split_once('=')
            .ok_or_else(|| CliError::InvalidFilter(filter.clone()))?;
        if table.columns().get(column).is_none() {
            return Err(CliError::UnknownColumn(column.to_string()));
        }
        table.set_column_filter(column, value);
    }

    apply_selection(&mut table, args.select_all, &args.selected)?;

    table.go_to_page(args.page.saturating_sub(1));

    let view = table.view();
    Ok(render::render(&view, table.columns().as_slice()))
}

/// Select the filtered rows and then each named key; named keys are only ever added.
fn apply_selection(
    table: &mut DataTable<Record>,
    select_all: bool,
    keys: &[String],
) -> Result<(), CliError> {
    if select_all {
        table.select_all();
    }
    for key in keys {
        if !table.rows().iter().any(|r| TableRow::key(r) == *key) {
            return Err(CliError::UnknownRow(key.clone()));
        }
        if !table.is_selected(key) {
            table.toggle_row(key.clone());
        }
    }
    Ok(())
}

/// Use the requested columns, or every field of the first row.
///
/// Columns whose first value is a number are right-aligned.
fn build_columns(requested: &[String], rows: &[Record]) -> Vec<Column<Record>> {
    let ids: Vec<String> = if requested.is_empty() {
        rows.first()
            .map(|r| r.field_names().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    } else {
        requested.to_vec()
    };

    ids.into_iter()
        .map(|id| {
            let numeric = rows
                .first()
                .and_then(|r| r.get(&id))
                .is_some_and(|v| v.is_number());
            let column = Column::new(id.as_str(), id.as_str());
            if numeric {
                column.align(Align::Right)
            } else {
                column
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Record> {
        Record::parse_array(
            r#"[
                {"id": 1, "name": "Bob", "age": 31},
                {"id": 2, "name": "Amy", "age": 27},
                {"id": 3, "name": "Cid", "age": 45}
            ]"#,
            "id",
        )
        .unwrap()
    }

    #[test]
    fn test_build_columns_infers_and_aligns() {
        let columns = build_columns(&[], &rows());
        let ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["age", "id", "name"]);
        assert_eq!(columns[0].align, Align::Right);
        assert_eq!(columns[2].align, Align::Left);
    }

    #[test]
    fn test_build_columns_requested_order() {
        let requested = vec!["name".to_string(), "age".to_string()];
        let columns = build_columns(&requested, &rows());
        assert_eq!(columns[0].id, "name");
        assert_eq!(columns[1].id, "age");
    }

    fn table() -> DataTable<Record> {
        let columns = build_columns(&[], &rows());
        DataTable::new(columns, rows()).unwrap()
    }

    #[test]
    fn test_select_after_select_all_keeps_row() {
        let mut table = table();
        apply_selection(&mut table, true, &["2".to_string(), "2".to_string()]).unwrap();
        assert!(table.is_selected(&"2".to_string()));
        assert_eq!(table.selection().len(), 3);
    }

    #[test]
    fn test_select_unknown_row() {
        let mut table = table();
        let err = apply_selection(&mut table, false, &["9".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::UnknownRow(key) if key == "9"));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "tabula",
            "data.json",
            "--sort",
            "name:desc",
            "--filter",
            "name=a",
            "--filter",
            "age=2",
            "--columns",
            "name,age",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.sort, Some(SortState::desc("name")));
        assert_eq!(args.filters, vec!["name=a", "age=2"]);
        assert_eq!(args.columns, vec!["name", "age"]);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.page, 1);
    }

    #[test]
    fn test_args_reject_bad_sort() {
        assert!(Args::try_parse_from(["tabula", "data.json", "--sort", "name:sideways"]).is_err());
    }
}
