//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::catalog::{Catalog, CreateArgs, global_catalog};
use crate::cli::CacheCommand;
use fabrica_core::{
    Describe, Discriminant, FabricaError, FieldName, FieldValue, ProductSchema, shared_cache,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum catalog file size (1 MB).
///
/// Catalogs are small template declarations; anything larger indicates a
/// wrong file and would only waste memory on parse.
const MAX_CATALOG_FILE_SIZE: u64 = 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), FabricaError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| FabricaError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(FabricaError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate a catalog file path.
///
/// This function:
/// 1. Canonicalizes the path to resolve symlinks and ".."
/// 2. Ensures the path exists
/// 3. Ensures the path is a file (not a directory)
fn validate_catalog_path(path: &Path) -> Result<PathBuf, FabricaError> {
    // Canonicalize resolves "..", symlinks, and validates existence
    let canonical = path.canonicalize().map_err(|e| {
        FabricaError::IoError(format!("Invalid catalog path '{}': {}", path.display(), e))
    })?;

    // Ensure it's a file, not a directory
    if !canonical.is_file() {
        return Err(FabricaError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

// =============================================================================
// ARGUMENT PARSING
// =============================================================================

/// Parse repeated `name=value` flags into create arguments.
fn parse_assignments(raw: &[String]) -> Result<CreateArgs, FabricaError> {
    let mut args = CreateArgs::new();

    for assignment in raw {
        let Some((name, value)) = assignment.split_once('=') else {
            return Err(FabricaError::DeserializationError(format!(
                "malformed assignment '{}', expected name=value",
                assignment
            )));
        };

        if name.is_empty() {
            return Err(FabricaError::DeserializationError(format!(
                "assignment '{}' has an empty field name",
                assignment
            )));
        }

        args.push((FieldName::new(name), FieldValue::new(value)));
    }

    Ok(args)
}

/// Validate the path (when given) and fetch the process-wide catalog.
fn load_catalog(path: Option<&Path>) -> Result<Arc<Catalog>, FabricaError> {
    let validated = match path {
        Some(path) => {
            let canonical = validate_catalog_path(path)?;
            validate_file_size(&canonical, MAX_CATALOG_FILE_SIZE)?;
            Some(canonical)
        }
        None => None,
    };

    global_catalog(validated.as_deref())
}

/// Render one schema as indented text lines.
fn print_schema(schema: &ProductSchema) {
    println!("{}", schema.kind());
    for spec in schema.fields() {
        if spec.is_required() {
            println!("  {:<16} (required)", spec.name().as_str());
        } else {
            let default = spec.default_value().map(|v| v.as_str()).unwrap_or("");
            println!("  {:<16} (default: {})", spec.name().as_str(), default);
        }
    }
}

// =============================================================================
// CATALOG COMMAND
// =============================================================================

/// List registered product templates.
pub fn cmd_catalog(catalog_path: Option<&Path>, json_mode: bool) -> Result<(), FabricaError> {
    let catalog = load_catalog(catalog_path)?;

    if json_mode {
        let schemas: Vec<&ProductSchema> = catalog.schemas().collect();
        let output = serde_json::json!({
            "source": catalog_path.map_or("built-in".to_string(), |p| p.display().to_string()),
            "templates": catalog.len(),
            "products": schemas,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Fabrica Catalog");
    println!("===============");
    match catalog_path {
        Some(path) => println!("Source:    {}", path.display()),
        None => println!("Source:    built-in"),
    }
    println!("Templates: {}", catalog.len());
    println!();

    for schema in catalog.schemas() {
        print_schema(schema);
        println!();
    }

    Ok(())
}

// =============================================================================
// BUILD COMMAND
// =============================================================================

/// Construct a product through the staged builder.
pub fn cmd_build(
    catalog_path: Option<&Path>,
    json_mode: bool,
    kind: &str,
    assignments: &[String],
) -> Result<(), FabricaError> {
    let catalog = load_catalog(catalog_path)?;
    let args = parse_assignments(assignments)?;

    let mut builder = catalog.builder(&Discriminant::new(kind))?;
    for (name, value) in args {
        builder = builder.set(name, value);
    }
    let product = builder.build()?;

    tracing::info!(kind = kind, "product built");

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&product).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", product.describe());
    Ok(())
}

// =============================================================================
// CREATE COMMAND
// =============================================================================

/// Construct a product through the factory registry.
pub fn cmd_create(
    catalog_path: Option<&Path>,
    json_mode: bool,
    kind: &str,
    assignments: &[String],
) -> Result<(), FabricaError> {
    let catalog = load_catalog(catalog_path)?;
    let args = parse_assignments(assignments)?;

    let product = catalog.create(&Discriminant::new(kind), &args)?;

    tracing::info!(kind = kind, "product created");

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&product).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", product.describe());
    Ok(())
}

// =============================================================================
// CACHE COMMAND
// =============================================================================

/// Operate on the process-wide shared cache.
pub fn cmd_cache(json_mode: bool, op: &CacheCommand) -> Result<(), FabricaError> {
    let cache = shared_cache();

    match op {
        CacheCommand::Set { key, value } => {
            cache.set(key.clone(), value.clone());
            if json_mode {
                let output = serde_json::json!({ "key": key, "stored": true });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).unwrap_or_default()
                );
            } else {
                println!("Stored '{}'", key);
            }
        }
        CacheCommand::Get { key } => {
            let value = cache.get(key);
            if json_mode {
                let output = serde_json::json!({ "key": key, "value": value });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).unwrap_or_default()
                );
            } else {
                match value {
                    Some(value) => println!("{}", value),
                    None => println!("(absent)"),
                }
            }
        }
        CacheCommand::Clear => {
            cache.clear();
            if json_mode {
                let output = serde_json::json!({ "cleared": true });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).unwrap_or_default()
                );
            } else {
                println!("Cache cleared");
            }
        }
        CacheCommand::Status => {
            let entries = cache.entries();
            if json_mode {
                let output = serde_json::json!({
                    "entries": entries.len(),
                    "contents": entries.iter().map(|(k, v)| {
                        serde_json::json!({ "key": k, "value": v })
                    }).collect::<Vec<_>>(),
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).unwrap_or_default()
                );
            } else {
                println!("Fabrica Cache Status");
                println!("====================");
                println!("Entries: {}", entries.len());
                for (key, value) in entries {
                    println!("  {} = {}", key, value);
                }
            }
        }
    }

    Ok(())
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Parse and cross-check a catalog file.
pub fn cmd_validate(file: Option<&Path>, json_mode: bool) -> Result<(), FabricaError> {
    // Bootstrap from scratch rather than through the process-wide cell, so
    // validation sees the file as a fresh process would.
    let (source, catalog) = match file {
        Some(path) => {
            let canonical = validate_catalog_path(path)?;
            validate_file_size(&canonical, MAX_CATALOG_FILE_SIZE)?;
            (path.display().to_string(), Catalog::load(&canonical)?)
        }
        None => ("built-in".to_string(), Catalog::builtin()?),
    };

    tracing::debug!(source = %source, templates = catalog.len(), "catalog validated");

    if json_mode {
        let output = serde_json::json!({
            "source": source,
            "valid": true,
            "templates": catalog.len(),
            "discriminants": catalog
                .discriminants()
                .iter()
                .map(|d| d.as_str().to_string())
                .collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Catalog OK: {}", source);
    println!("Templates:  {}", catalog.len());
    for discriminant in catalog.discriminants() {
        println!("  {}", discriminant);
    }

    Ok(())
}
