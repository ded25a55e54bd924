//! Read-only lookup over the option catalog.

use std::io::Write;
use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::StoreError;

/// Maximum number of rows returned by [`LookupStore::search`].
pub const SEARCH_LIMIT: usize = 50;

/// The catalog generated from `data/reference.md` at build time.
pub static EMBEDDED_CATALOG: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/ghofig.db"));

/// One documented configuration option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub id: i64,
    pub title: String,
    pub description: String,
}

pub struct LookupStore {
    conn: Connection,
    // Keeps the materialized catalog on disk for the lifetime of the connection.
    _backing: Option<NamedTempFile>,
}

impl std::fmt::Debug for LookupStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl LookupStore {
    /// Open an existing catalog file read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = open_read_only(path.as_ref())?;
        Ok(Self {
            conn,
            _backing: None,
        })
    }

    /// Write `bytes` to a temporary file and open it read-only.
    pub fn from_embedded(bytes: &[u8]) -> Result<Self, StoreError> {
        let mut file = tempfile::Builder::new()
            .prefix("ghofig-")
            .suffix(".db")
            .tempfile()
            .map_err(|err| StoreError::Init(format!("create temp catalog: {err}")))?;
        file.write_all(bytes)
            .and_then(|()| file.flush())
            .map_err(|err| StoreError::Init(format!("write temp catalog: {err}")))?;
        let conn = open_read_only(file.path())?;
        info!(path = %file.path().display(), "materialized option catalog");
        Ok(Self {
            conn,
            _backing: Some(file),
        })
    }

    /// Entries whose title or description contains `query`, title matches first.
    ///
    /// An empty query lists the catalog alphabetically.
    pub fn search(&self, query: &str) -> Result<Vec<ConfigEntry>, StoreError> {
        let limit = SEARCH_LIMIT as i64;
        let results = if query.is_empty() {
            let mut stmt = self.conn.prepare_cached(
                "SELECT id, title, description FROM configs ORDER BY title LIMIT ?1",
            )?;
            let rows = stmt.query_map([limit], entry_from_row)?;
            rows.collect::<Result<Vec<_>, _>>()?
        } else {
            let pattern = format!("%{}%", escape_like(query));
            let mut stmt = self.conn.prepare_cached(
                "SELECT id, title, description FROM configs
                 WHERE title LIKE ?1 ESCAPE '\\' OR description LIKE ?1 ESCAPE '\\'
                 ORDER BY CASE WHEN title LIKE ?1 ESCAPE '\\' THEN 0 ELSE 1 END, title
                 LIMIT ?2",
            )?;
            let rows = stmt.query_map(rusqlite::params![pattern, limit], entry_from_row)?;
            rows.collect::<Result<Vec<_>, _>>()?
        };
        debug!(query, count = results.len(), "catalog search");
        Ok(results)
    }

    pub fn get_by_id(&self, id: i64) -> Result<ConfigEntry, StoreError> {
        self.conn
            .query_row(
                "SELECT id, title, description FROM configs WHERE id = ?1",
                [id],
                entry_from_row,
            )
            .optional()?
            .ok_or(StoreError::NotFound(id))
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM configs", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn open_read_only(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|err| StoreError::Init(format!("open {}: {err}", path.display())))?;
    conn.query_row("SELECT COUNT(*) FROM configs", [], |row| row.get::<_, i64>(0))
        .map_err(|err| StoreError::Init(format!("verify {}: {err}", path.display())))?;
    Ok(conn)
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<ConfigEntry> {
    Ok(ConfigEntry {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
    })
}

fn escape_like(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
