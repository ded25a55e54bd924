//! Conversion of the Ghostty option reference into the lookup table.
//!
//! Shared with `build.rs`, so this module only depends on `std` and `rusqlite`.

use std::path::Path;

use rusqlite::{params, Connection};

/// One documented option before it is assigned a row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub title: String,
    pub description: String,
}

/// Parse a reference dump where each option starts with a ``## `name` `` header.
///
/// Consecutive headers without body text in between share the description
/// that follows them.
pub fn parse_reference(text: &str) -> Vec<CatalogEntry> {
    let mut entries = Vec::new();
    let mut pending_titles: Vec<String> = Vec::new();
    let mut body: Vec<&str> = Vec::new();
    let mut in_body = false;

    for line in text.lines() {
        if let Some(title) = header_title(line) {
            if in_body {
                flush(&mut entries, &mut pending_titles, &mut body);
            }
            pending_titles.push(title.to_string());
            in_body = false;
            continue;
        }
        if pending_titles.is_empty() {
            continue;
        }
        if !in_body && line.trim().is_empty() {
            continue;
        }
        in_body = true;
        body.push(line);
    }

    if !body.is_empty() {
        flush(&mut entries, &mut pending_titles, &mut body);
    }
    entries
}

fn header_title(line: &str) -> Option<&str> {
    let name = line.strip_prefix("## `")?.strip_suffix('`')?;
    if name.is_empty() {
        return None;
    }
    Some(name)
}

fn flush(entries: &mut Vec<CatalogEntry>, titles: &mut Vec<String>, body: &mut Vec<&str>) {
    let description = body.join("\n").trim().to_string();
    for title in titles.drain(..) {
        entries.push(CatalogEntry {
            title,
            description: description.clone(),
        });
    }
    body.clear();
}

pub type WriteResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Write `entries` into a fresh SQLite file at `path`, replacing any existing file.
pub fn write_database(path: &Path, entries: &[CatalogEntry]) -> WriteResult {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    let mut conn = Connection::open(path)?;
    conn.execute_batch(
        "CREATE TABLE configs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL
        );
        CREATE INDEX idx_configs_title ON configs(title);",
    )?;
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare("INSERT INTO configs (title, description) VALUES (?1, ?2)")?;
        for entry in entries {
            stmt.execute(params![entry.title, entry.description])?;
        }
    }
    tx.commit()?;
    Ok(())
}
