use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{Connection, Row, params};

use crate::error::{Error, Result};
use crate::models::{Alert, Direction, normalize_symbol};

/// Durable storage for alerts and key/value settings.
///
/// The connection mutex is the single synchronization point between the
/// command handlers and the poll loop; every operation locks, runs one
/// statement and unlocks, so callers never observe partial writes.
#[derive(Clone)]
pub struct AlertStore {
    conn: Arc<Mutex<Connection>>,
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS alerts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        symbol TEXT NOT NULL,
        strike_price REAL NOT NULL,
        direction TEXT NOT NULL CHECK(direction IN ('touch', 'up', 'down')),
        note TEXT NOT NULL DEFAULT '',
        destination_override TEXT,
        created_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS settings (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
";

impl AlertStore {
    pub fn open(path: &str) -> Result<Self> {
        if let Some(dir) = std::path::Path::new(path).parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)
                    .map_err(|e| Error::Validation(format!("cannot create data dir: {e}")))?;
            }
        }
        Self::init(Connection::open(path)?)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Insert a new alert and return the persisted record (with assigned id).
    pub fn add(
        &self,
        symbol: &str,
        strike_price: f64,
        direction: Direction,
        note: &str,
        destination_override: Option<&str>,
    ) -> Result<Alert> {
        if !strike_price.is_finite() || strike_price <= 0.0 {
            return Err(Error::Validation("strike price must be positive".to_string()));
        }

        let symbol = normalize_symbol(symbol);
        let created_at = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO alerts (symbol, strike_price, direction, note, destination_override, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                symbol,
                strike_price,
                direction.as_str(),
                note,
                destination_override,
                created_at
            ],
        )?;
        let id = conn.last_insert_rowid();

        Ok(Alert {
            id,
            symbol,
            strike_price,
            direction,
            note: note.to_string(),
            destination_override: destination_override.map(str::to_string),
            created_at,
        })
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Alert>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, symbol, strike_price, direction, note, destination_override, created_at
             FROM alerts WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map([id], row_to_alert)?;
        match rows.next() {
            Some(alert) => Ok(Some(alert?)),
            None => Ok(None),
        }
    }

    /// All alerts, ascending id.
    pub fn list_all(&self) -> Result<Vec<Alert>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, symbol, strike_price, direction, note, destination_override, created_at
             FROM alerts ORDER BY id",
        )?;
        let rows = stmt.query_map([], row_to_alert)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    pub fn list_by_symbol(&self, symbol: &str) -> Result<Vec<Alert>> {
        let symbol = normalize_symbol(symbol);
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, symbol, strike_price, direction, note, destination_override, created_at
             FROM alerts WHERE symbol = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([symbol], row_to_alert)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    /// Delete an alert. Returns false when no row existed; that is not an
    /// error, so callers can retire the same id twice safely.
    pub fn remove(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM alerts WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }

    /// Symbols that have at least one active alert; drives the polling scope.
    pub fn distinct_symbols(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT DISTINCT symbol FROM alerts ORDER BY symbol")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
        let mut rows = stmt.query_map([key], |row| row.get::<_, String>(0))?;
        match rows.next() {
            Some(value) => Ok(Some(value?)),
            None => Ok(None),
        }
    }

    /// Last write wins.
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

fn row_to_alert(row: &Row<'_>) -> rusqlite::Result<Alert> {
    let direction: String = row.get(3)?;
    Ok(Alert {
        id: row.get(0)?,
        symbol: row.get(1)?,
        strike_price: row.get(2)?,
        // CHECK constraint keeps this in the three-value set
        direction: Direction::parse(&direction).map_err(|_| rusqlite::Error::InvalidQuery)?,
        note: row.get(4)?,
        destination_override: row.get(5)?,
        created_at: row.get(6)?,
    })
}
