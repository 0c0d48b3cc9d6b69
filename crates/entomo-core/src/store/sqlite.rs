//! SQLite record store.
//!
//! One table per category. Every operation opens its own connection and drops
//! it before returning, so no handle outlives a call on any exit path.

use super::predicate::{where_clause, Column, Predicate};
use super::RecordStore;
use crate::config::StoreConfig;
use crate::error::{CatalogError, Result};
use crate::ingest::build_record;
use crate::models::{AttributeKey, Attributes, Category, EntityRecord, NewEntity, Sex};
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, Row, ToSql};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

const RECORD_COLUMNS: &str = "id, name_common, name_scientific, size_min, size_max, \
     color, habitat, season, description, sex, attributes_json, image";

/// SQLite-backed catalogue store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Create or open a store at the given path, bootstrapping the schema.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| CatalogError::Io {
                    message: format!("Failed to create directory {}", parent.display()),
                    path: Some(parent.to_path_buf()),
                    source: Some(e),
                })?;
            }
        }

        let store = Self { db_path };
        let conn = store.connect()?;
        Self::ensure_schema(&conn)?;

        Ok(store)
    }

    /// Get the database path.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a configured connection for a single operation.
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        Self::configure_connection(&conn)?;
        Self::register_functions(&conn)?;
        Ok(conn)
    }

    /// Configure connection with optimal settings.
    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.busy_timeout(StoreConfig::BUSY_TIMEOUT)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA temp_store=MEMORY;
            ",
        )?;
        Ok(())
    }

    /// Register `fold(text)`, a Unicode-aware lowercase.
    ///
    /// SQLite's own `lower()` and `LIKE` only fold ASCII, which would make
    /// Cyrillic criteria case-sensitive.
    fn register_functions(conn: &Connection) -> Result<()> {
        conn.create_scalar_function(
            StoreConfig::FOLD_FUNCTION,
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let text: Option<String> = ctx.get(0)?;
                Ok(text.map(|t| t.to_lowercase()))
            },
        )?;
        Ok(())
    }

    /// Ensure every category table exists.
    fn ensure_schema(conn: &Connection) -> Result<()> {
        for category in Category::ALL {
            let table = category.table_name();
            conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name_common TEXT NOT NULL,
                    name_scientific TEXT,
                    size_min REAL,
                    size_max REAL,
                    color TEXT,
                    habitat TEXT,
                    season TEXT,
                    description TEXT,
                    sex TEXT,
                    attributes_json TEXT NOT NULL DEFAULT '{{}}',
                    image TEXT,
                    CHECK (size_min IS NULL OR size_max IS NULL OR size_min <= size_max)
                );
                CREATE INDEX IF NOT EXISTS idx_{table}_sizes ON {table}(size_min, size_max);"
            ))?;
        }
        Ok(())
    }

    /// Convert a row to an EntityRecord.
    fn row_to_record(category: Category, row: &Row) -> rusqlite::Result<EntityRecord> {
        let sex: Option<String> = row.get(9)?;
        let attributes_json: String = row.get(10)?;

        let id: i64 = row.get(0)?;

        let attributes: Attributes = match serde_json::from_str(&attributes_json) {
            Ok(attributes) => attributes,
            Err(e) => {
                warn!("Ignoring unreadable attributes of {} #{}: {}", category, id, e);
                Attributes::new()
            }
        };

        Ok(EntityRecord {
            id,
            category,
            name_common: row.get(1)?,
            name_scientific: row.get(2)?,
            size_min: row.get(3)?,
            size_max: row.get(4)?,
            color: row.get(5)?,
            habitat: row.get(6)?,
            season: row.get(7)?,
            description: row.get(8)?,
            sex: sex.and_then(|s| s.parse::<Sex>().ok()),
            attributes,
            image: row.get(11)?,
        })
    }

    /// Run a single-column text query and collect non-empty values.
    fn collect_strings(conn: &Connection, sql: &str) -> Result<Vec<String>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, Option<String>>(0))?;

        let mut values = Vec::new();
        for row in rows {
            if let Some(value) = row? {
                if !value.trim().is_empty() {
                    values.push(value);
                }
            }
        }
        Ok(values)
    }
}

impl RecordStore for SqliteStore {
    fn query(&self, category: Category, predicates: &[Predicate]) -> Result<Vec<EntityRecord>> {
        let start = Instant::now();
        let conn = self.connect()?;

        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();
        let clause = where_clause(predicates, &mut params_vec);
        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY id",
            RECORD_COLUMNS,
            category.table_name(),
            clause
        );

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let rows = stmt.query_map(params_refs.as_slice(), |row| Self::row_to_record(category, row))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }

        debug!(
            "Queried {} with {} predicates: {} rows in {:.2}ms",
            category.table_name(),
            predicates.len(),
            records.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(records)
    }

    fn insert(&self, category: Category, entity: &NewEntity) -> Result<EntityRecord> {
        let mut record = build_record(0, category, entity)?;
        let attributes_json = serde_json::to_string(&record.attributes)?;

        let conn = self.connect()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (name_common, name_scientific, size_min, size_max, color,
                                 habitat, season, description, sex, attributes_json, image)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                category.table_name()
            ),
            params![
                record.name_common,
                record.name_scientific,
                record.size_min,
                record.size_max,
                record.color,
                record.habitat,
                record.season,
                record.description,
                record.sex.map(|s| s.as_str()),
                attributes_json,
                record.image,
            ],
        )?;
        record.id = conn.last_insert_rowid();

        debug!("Inserted {} #{}: {}", category, record.id, record.name_common);
        Ok(record)
    }

    fn distinct_values(&self, category: Category, column: Column) -> Result<Vec<String>> {
        if column.is_numeric() {
            warn!("distinct_values called on numeric column {}", column.as_str());
            return Err(CatalogError::Other(format!(
                "Column {} is not a text column",
                column.as_str()
            )));
        }

        let conn = self.connect()?;
        let sql = format!(
            "SELECT DISTINCT {col} FROM {table}
             WHERE {col} IS NOT NULL AND {col} != ''
             ORDER BY {col}",
            col = column.as_str(),
            table = category.table_name()
        );
        Self::collect_strings(&conn, &sql)
    }

    fn attribute_values(&self, category: Category, key: AttributeKey) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let sql = format!(
            "SELECT DISTINCT json_extract(attributes_json, '$.{key}') FROM {table}
             WHERE json_extract(attributes_json, '$.{key}') IS NOT NULL
             ORDER BY 1",
            key = key.as_str(),
            table = category.table_name()
        );
        Self::collect_strings(&conn, &sql)
    }
}
