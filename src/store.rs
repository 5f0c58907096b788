//! ==============================================================================
//! store.rs - Reading Store
//! ==============================================================================
//!
//! purpose:
//!     owns the sqlx pool for the readings table. the hub treats the
//!     database as an external collaborator: one table, two queries,
//!     consistency delegated entirely to the engine.
//!
//! schema:
//! ```text
//! sensor_readings(id, temperature, humidity, co2, lux,
//!                 air_quality, created_at)
//! ```
//!
//! created_at is assigned by the store at millisecond precision;
//! retrieval orders by created_at then id so same-millisecond
//! inserts still come back in strict reverse insertion order.
//!
//! ==============================================================================

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::domain::{NewReading, Reading};

/// readings returned per query, newest first
pub const RECENT_LIMIT: i64 = 50;

/// cloneable handle to the readings table
#[derive(Clone)]
pub struct ReadingStore {
    pool: SqlitePool,
}

impl ReadingStore {
    /// connect to the configured database and make sure the schema exists
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// in-memory store for tests; a single connection keeps the whole
    /// pool on one sqlite memory database
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// idempotent schema bootstrap, applied once on startup
    async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sensor_readings (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                temperature REAL,
                humidity    REAL,
                co2         REAL,
                lux         REAL,
                air_quality TEXT,
                created_at  TEXT NOT NULL
                    DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_sensor_readings_created_at
                ON sensor_readings (created_at);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// append one reading; created_at is assigned here, never by the client
    pub async fn insert(&self, reading: &NewReading) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO sensor_readings (temperature, humidity, co2, lux, air_quality)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(reading.temperature)
        .bind(reading.humidity)
        .bind(reading.co2)
        .bind(reading.lux)
        .bind(reading.air_quality.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// the 50 most recent readings, newest first; empty vec on an empty table
    pub async fn recent(&self) -> Result<Vec<Reading>, sqlx::Error> {
        sqlx::query_as::<_, Reading>(
            r#"
            SELECT id, temperature, humidity, co2, lux, air_quality, created_at
            FROM sensor_readings
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            "#,
        )
        .bind(RECENT_LIMIT)
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature: f64) -> NewReading {
        NewReading {
            temperature: Some(temperature),
            humidity: Some(40.0),
            co2: Some(450.0),
            lux: Some(300.0),
            air_quality: Some("Good".into()),
        }
    }

    #[tokio::test]
    async fn empty_store_returns_empty_vec() {
        let store = ReadingStore::in_memory().await.unwrap();
        assert!(store.recent().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recent_is_reverse_insertion_order() {
        let store = ReadingStore::in_memory().await.unwrap();
        for i in 1..=10 {
            store.insert(&reading(i as f64)).await.unwrap();
        }

        let rows = store.recent().await.unwrap();
        let temps: Vec<f64> = rows.iter().filter_map(|r| r.temperature).collect();
        let expected: Vec<f64> = (1..=10).rev().map(|i| i as f64).collect();
        assert_eq!(temps, expected);
    }

    #[tokio::test]
    async fn recent_caps_at_fifty_newest() {
        let store = ReadingStore::in_memory().await.unwrap();
        for i in 1..=60 {
            store.insert(&reading(i as f64)).await.unwrap();
        }

        let rows = store.recent().await.unwrap();
        assert_eq!(rows.len(), 50);
        assert_eq!(rows.first().unwrap().temperature, Some(60.0));
        assert_eq!(rows.last().unwrap().temperature, Some(11.0));
    }

    #[tokio::test]
    async fn null_fields_round_trip_as_null() {
        let store = ReadingStore::in_memory().await.unwrap();
        store
            .insert(&NewReading {
                temperature: None,
                humidity: Some(40.0),
                co2: None,
                lux: Some(300.0),
                air_quality: None,
            })
            .await
            .unwrap();

        let rows = store.recent().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].temperature, None);
        assert_eq!(rows[0].air_quality, None);
        assert!(!rows[0].created_at.is_empty());
    }
}
