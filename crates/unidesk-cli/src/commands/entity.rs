//! List, get, create, update and delete for any entity.
//!
//! Flags are collected into a camelCase JSON object and deserialized into
//! the entity's typed request, so the same validation runs as for any other
//! caller of the repository.

use clap::{Args, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as Json};

use unidesk_core::error::AppError;
use unidesk_core::traits::{Entity, Repository};
use unidesk_core::types::DeleteRequest;

use crate::output::{self, OutputFormat};

/// Arguments for an entity command
#[derive(Debug, Args)]
pub struct EntityArgs {
    /// Entity subcommand
    #[command(subcommand)]
    pub command: EntityCommand,
}

/// Entity subcommands
#[derive(Debug, Subcommand)]
pub enum EntityCommand {
    /// List rows matching filters
    List(ListArgs),
    /// Show one row by id
    Get {
        /// Row id
        id: i64,
        /// Fields to return (comma separated)
        #[arg(long, value_delimiter = ',')]
        select: Vec<String>,
    },
    /// Create a row
    Create {
        /// Field value as `field=value`
        #[arg(long = "set", value_parser = parse_pair)]
        values: Vec<(String, Json)>,
    },
    /// Update a row the caller last read with `guid`
    Update {
        /// Row id
        id: i64,
        /// Guid from the last read
        #[arg(long)]
        guid: String,
        /// Field value as `field=value`
        #[arg(long = "set", value_parser = parse_pair)]
        values: Vec<(String, Json)>,
    },
    /// Soft-delete a row the caller last read with `guid`
    Delete {
        /// Row id
        id: i64,
        /// Guid from the last read
        #[arg(long)]
        guid: String,
    },
}

/// Paging, projection, sorting and filter flags
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Entity filter as `name=value`, e.g. `nameEqual=Ann` or `roleId=2`
    #[arg(long = "filter", value_parser = parse_pair)]
    pub filters: Vec<(String, Json)>,
    /// Fields to return (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,
    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<i64>,
    /// Page size
    #[arg(long)]
    pub size: Option<i64>,
    /// Exact id
    #[arg(long)]
    pub id: Option<i64>,
    /// Id membership (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub ids: Option<Vec<i64>>,
    /// Field to sort by
    #[arg(long)]
    pub order: Option<String>,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
    /// Include soft-deleted rows
    #[arg(long)]
    pub show_deleted: bool,
    /// Only rows cascade-deleted for this reason
    #[arg(long)]
    pub cascade_deleted_by: Option<String>,
}

impl ListArgs {
    /// The get request body these flags describe.
    fn to_json(&self) -> Map<String, Json> {
        let mut body: Map<String, Json> = self.filters.iter().cloned().collect();
        if !self.select.is_empty() {
            body.insert("select".into(), Json::from(self.select.clone()));
        }
        insert_opt(&mut body, "page", self.page);
        insert_opt(&mut body, "size", self.size);
        insert_opt(&mut body, "id", self.id);
        insert_opt(&mut body, "ids", self.ids.clone());
        insert_opt(&mut body, "orderField", self.order.clone());
        insert_opt(&mut body, "cascadeDeletedBy", self.cascade_deleted_by.clone());
        if self.desc {
            body.insert("isDesc".into(), Json::Bool(true));
        }
        if self.show_deleted {
            body.insert("showDeleted".into(), Json::Bool(true));
        }
        body
    }
}

/// Execute an entity command against its repository
pub async fn execute<E, R>(repo: &R, args: &EntityArgs, format: OutputFormat) -> Result<(), AppError>
where
    E: Entity,
    R: Repository<E>,
{
    let name = E::descriptor().name;
    match &args.command {
        EntityCommand::List(list) => {
            let request: E::Get = decode(list.to_json())?;
            let page = repo.list(&request).await?;
            output::print_page(&page, format);
        }
        EntityCommand::Get { id, select } => {
            let page = repo.get_by_id(*id, select).await?;
            match page.response_list.first() {
                Some(record) => output::print_record(record, format),
                None => {
                    return Err(AppError::not_found(format!("{name} {id} not found")));
                }
            }
        }
        EntityCommand::Create { values } => {
            let request: E::Create = decode(values.iter().cloned().collect())?;
            let result = repo.create(&request).await?;
            output::print_write(&result, format);
            output::print_success(&format!("Created {name} {}", result.id));
        }
        EntityCommand::Update { id, guid, values } => {
            let mut body: Map<String, Json> = values.iter().cloned().collect();
            body.insert("id".into(), Json::from(*id));
            body.insert("guid".into(), Json::from(guid.clone()));
            let request: E::Update = decode(body)?;
            let result = repo.update(&request).await?;
            output::print_write(&result, format);
            output::print_success(&format!("Updated {name} {id}"));
        }
        EntityCommand::Delete { id, guid } => {
            let result = repo.delete(&DeleteRequest::new(*id, guid.as_str())).await?;
            output::print_write(&result, format);
            output::print_success(&format!("Deleted {name} {id}"));
        }
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(body: Map<String, Json>) -> Result<T, AppError> {
    serde_json::from_value(Json::Object(body))
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}

fn insert_opt<T: Into<Json>>(body: &mut Map<String, Json>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        body.insert(key.into(), value.into());
    }
}

/// Parse `field=value`. Values that are valid JSON keep their type
/// (`3`, `true`, `null`); anything else is taken as text.
fn parse_pair(raw: &str) -> Result<(String, Json), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Json::String(value.to_string()));
    Ok((key.to_string(), value))
}
