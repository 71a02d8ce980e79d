//! # CLI Command Implementations

use fact_core::primitives::MAX_SNAPSHOT_SIZE;
use fact_core::{Fact, FactError, QueryTarget, Triple, Value, export_snapshot, import_snapshot};
use std::path::{Path, PathBuf};

// =============================================================================
// HELPERS
// =============================================================================

/// Open the fact base, creating the database's parent directory if needed.
///
/// An empty path opens an in-memory store.
pub fn open_fact(db_path: &Path) -> Result<Fact, FactError> {
    let missing_parent = db_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty() && !parent.exists());
    if let Some(parent) = missing_parent {
        std::fs::create_dir_all(parent).map_err(|e| {
            FactError::IoError(format!(
                "Cannot create database directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }
    let fact = Fact::open(db_path)?;
    tracing::debug!(
        database = %db_path.display(),
        persistent = fact.store().is_persistent(),
        "fact base opened"
    );
    Ok(fact)
}

fn backend_name(fact: &Fact) -> &'static str {
    if fact.store().is_persistent() {
        "redb"
    } else {
        "memory"
    }
}

fn print_json(output: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(output).unwrap_or_default()
    );
}

fn print_values(values: &[Value], json_mode: bool) {
    if json_mode {
        print_json(&serde_json::json!({ "values": values }));
        return;
    }
    for value in values {
        println!("{}", value);
    }
}

/// Resolve a snapshot to read: an existing regular file within the size limit.
fn resolve_input(path: &Path) -> Result<PathBuf, FactError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        FactError::IoError(format!("Cannot read '{}': {}", path.display(), e))
    })?;
    if !metadata.is_file() {
        return Err(FactError::IoError(format!(
            "'{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > MAX_SNAPSHOT_SIZE as u64 {
        return Err(FactError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_SNAPSHOT_SIZE
        )));
    }
    path.canonicalize()
        .map_err(|e| FactError::IoError(format!("Cannot resolve '{}': {}", path.display(), e)))
}

/// Resolve where a snapshot is written. The directory must already exist.
fn resolve_output(path: &Path) -> Result<PathBuf, FactError> {
    let filename = path
        .file_name()
        .ok_or_else(|| FactError::IoError("Output path has no filename".to_string()))?;
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    match dir.canonicalize() {
        Ok(dir) if dir.is_dir() => Ok(dir.join(filename)),
        Ok(_) => Err(FactError::IoError(format!(
            "'{}' is not a directory",
            dir.display()
        ))),
        Err(e) => Err(FactError::IoError(format!(
            "Invalid output directory '{}': {}",
            dir.display(),
            e
        ))),
    }
}

// =============================================================================
// DEMO COMMAND
// =============================================================================

/// Declare the example facts and print the example queries.
pub fn cmd_demo(db_path: &Path, json_mode: bool) -> Result<(), FactError> {
    let mut fact = open_fact(db_path)?;

    fact.subject("cat").has("name", "meow")?;
    fact.subject("dog").has("name", "woof")?;
    fact.subject("meow").has("color", "black")?;

    let cat_name = fact.what("cat", Some("name"))?;
    let named_meow = fact.who_has("name", "meow")?;
    let named_woof = fact.who_has("name", "woof")?;
    let cat_name_color = fact.what(cat_name.clone(), Some("color"))?;

    if json_mode {
        print_json(&serde_json::json!({
            "what(cat, name)": cat_name,
            "who_has(name, meow)": named_meow,
            "who_has(name, woof)": named_woof,
            "what(what(cat, name), color)": cat_name_color,
        }));
    } else {
        println!("what(cat, name)              = [{}]", Fact::stringify(&cat_name)?);
        println!("who_has(name, meow)          = [{}]", Fact::stringify(&named_meow)?);
        println!("who_has(name, woof)          = [{}]", Fact::stringify(&named_woof)?);
        println!(
            "what(what(cat, name), color) = [{}]",
            Fact::stringify(&cat_name_color)?
        );
    }

    fact.close()
}

// =============================================================================
// ADD COMMAND
// =============================================================================

/// Declare `subject has object via predicate`, reporting whether the fact
/// was new.
fn add_fact(
    fact: &mut Fact,
    subject: &str,
    predicate: &str,
    object: &str,
) -> Result<(Triple, bool), FactError> {
    let before = fact.store().edge_count()?;
    let triple = fact.subject(subject).has(predicate, object)?;
    let added = fact.store().edge_count()? > before;
    Ok((triple, added))
}

/// Store one fact.
pub fn cmd_add(
    db_path: &Path,
    json_mode: bool,
    subject: &str,
    predicate: &str,
    object: &str,
) -> Result<(), FactError> {
    let mut fact = open_fact(db_path)?;
    let (triple, added) = add_fact(&mut fact, subject, predicate, object)?;
    tracing::info!(%triple, added, "add");

    if json_mode {
        print_json(&serde_json::json!({
            "triple": triple,
            "added": added,
        }));
    } else if added {
        println!("Added: {}", triple);
    } else {
        println!("Already known: {}", triple);
    }

    fact.close()
}

// =============================================================================
// QUERY COMMANDS
// =============================================================================

/// Forward query over one or more subjects, or a computed fact.
pub fn cmd_what(
    db_path: &Path,
    json_mode: bool,
    subjects: Vec<String>,
    predicate: Option<&str>,
) -> Result<(), FactError> {
    let mut fact = open_fact(db_path)?;

    let target = match <[String; 1]>::try_from(subjects) {
        Ok([subject]) => QueryTarget::from(subject),
        Err(subjects) => QueryTarget::Batch(subjects.into_iter().map(Value::Text).collect()),
    };
    let values = fact.what(target, predicate)?;
    tracing::debug!(results = values.len(), "what");

    print_values(&values, json_mode);
    fact.close()
}

/// Backward query.
pub fn cmd_who_has(
    db_path: &Path,
    json_mode: bool,
    predicate: &str,
    object: &str,
) -> Result<(), FactError> {
    let mut fact = open_fact(db_path)?;
    let values = fact.who_has(predicate, object)?;
    tracing::debug!(results = values.len(), "who-has");

    print_values(&values, json_mode);
    fact.close()
}

// =============================================================================
// DUMP / STATUS COMMANDS
// =============================================================================

/// Print every stored fact.
pub fn cmd_dump(db_path: &Path, json_mode: bool) -> Result<(), FactError> {
    let mut fact = open_fact(db_path)?;
    let triples = fact.store().triples()?;

    if json_mode {
        print_json(&serde_json::json!({ "triples": triples }));
    } else {
        for triple in &triples {
            println!("{}", triple);
        }
    }

    fact.close()
}

/// Show store status.
pub fn cmd_status(db_path: &Path, json_mode: bool) -> Result<(), FactError> {
    let mut fact = open_fact(db_path)?;
    let count = fact.store().edge_count()?;
    let backend = backend_name(&fact);

    if json_mode {
        print_json(&serde_json::json!({
            "database": db_path.to_string_lossy(),
            "backend": backend,
            "triple_count": count,
        }));
    } else {
        println!("Fact Store Status");
        println!("=================");
        println!("Database: {:?}", db_path);
        println!("Backend:  {}", backend);
        println!();
        println!("Triples:  {}", count);
    }

    fact.close()
}

// =============================================================================
// EXPORT / IMPORT COMMANDS
// =============================================================================

/// Export all facts as a binary snapshot.
pub fn cmd_export(db_path: &Path, json_mode: bool, output: &Path) -> Result<(), FactError> {
    let validated_output = resolve_output(output)?;

    let mut fact = open_fact(db_path)?;
    let count = fact.store().edge_count()?;
    let data = export_snapshot(fact.store())?;
    fact.close()?;

    std::fs::write(&validated_output, &data)
        .map_err(|e| FactError::IoError(format!("Write file: {}", e)))?;
    tracing::info!(path = %validated_output.display(), bytes = data.len(), "snapshot exported");

    if json_mode {
        print_json(&serde_json::json!({
            "output": validated_output.to_string_lossy(),
            "triples": count,
            "bytes": data.len(),
        }));
    } else {
        println!(
            "Exported {} triples ({} bytes) to {:?}",
            count,
            data.len(),
            validated_output
        );
    }
    Ok(())
}

/// Import facts from a binary snapshot.
pub fn cmd_import(db_path: &Path, json_mode: bool, input: &Path) -> Result<(), FactError> {
    let validated_input = resolve_input(input)?;
    let data = std::fs::read(&validated_input)
        .map_err(|e| FactError::IoError(format!("Read file: {}", e)))?;

    let mut fact = open_fact(db_path)?;
    let added = import_snapshot(fact.store_mut(), &data)?;
    tracing::info!(path = %validated_input.display(), added, "snapshot imported");

    if json_mode {
        print_json(&serde_json::json!({ "added": added }));
    } else {
        println!("Imported {} new triples from {:?}", added, validated_input);
    }

    fact.close()
}

// =============================================================================
// TESTS
// =============================================================================
