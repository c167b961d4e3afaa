//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use serde_json::Value as Json;
use tabled::builder::Builder;

use unidesk_core::types::{Paginator, Record, WriteResult};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a page of records in the selected format
pub fn print_page(page: &Paginator<Record>, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if page.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", render_table(&page.response_list));
            }
            println!("{}", page_summary(page));
        }
        OutputFormat::Json => print_json(page),
    }
}

/// Print one record in the selected format
pub fn print_record(record: &Record, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            for field in record.leaf_fields() {
                print_kv(&field, &cell(record, &field));
            }
        }
        OutputFormat::Json => print_json(record),
    }
}

/// Print the id and guid returned by a write
pub fn print_write(result: &WriteResult, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            print_kv("id", &result.id.to_string());
            print_kv("guid", &result.guid);
        }
        OutputFormat::Json => print_json(result),
    }
}

/// Print any serializable item as pretty JSON
pub fn print_json<T: Serialize>(item: &T) {
    let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
    println!("{}", json);
}

/// Print a success message
pub fn print_success(msg: &str) {
    eprintln!("✓ {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    eprintln!("⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<28} {}", format!("{}:", key), value);
}

/// Records of one page share a projection; the first one names the columns.
fn render_table(records: &[Record]) -> String {
    let headers = records
        .first()
        .map(Record::leaf_fields)
        .unwrap_or_default();

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for record in records {
        builder.push_record(headers.iter().map(|field| cell(record, field)));
    }
    builder.build().to_string()
}

fn page_summary(page: &Paginator<Record>) -> String {
    match (page.total, page.total_pages) {
        (Some(total), Some(pages)) => {
            format!("Page {} of {} ({} total, size {})", page.page, pages, total, page.size)
        }
        _ => format!("Page {} (size {})", page.page, page.size),
    }
}

/// Display text for a dotted field; nulls and missing joins render empty.
fn cell(record: &Record, field: &str) -> String {
    match record.get(field) {
        None | Some(Json::Null) => String::new(),
        Some(Json::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
