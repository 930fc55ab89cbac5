use crate::models::{Listing, StoredListing};
use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::path::Path;
use tracing::debug;

/// Fixed, well-known database file, created in the working directory.
pub const DB_FILE: &str = "bus_routes.db";

/// SQLite-backed persistence for listings.
///
/// Holds only connection options: every operation opens its own
/// connection and drops it on return, so no handle outlives the call.
/// Storage errors are not retried; they propagate to the caller.
pub struct Store {
    options: SqliteConnectOptions,
}

impl Store {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self { options }
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        self.options
            .connect()
            .await
            .context("Failed to open database")
    }

    /// Create the bus_routes table if it does not exist yet.
    /// Safe to call on every startup.
    pub async fn ensure_schema(&self) -> Result<()> {
        let mut conn = self.connect().await?;
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bus_routes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                route_name TEXT NOT NULL,
                route_link TEXT NOT NULL,
                bus_operator_name TEXT NOT NULL,
                bus_type TEXT NOT NULL,
                departure_time TEXT NOT NULL,
                duration TEXT NOT NULL,
                arrival_time TEXT NOT NULL,
                star_rating REAL NOT NULL,
                price REAL NOT NULL,
                seats_available INTEGER NOT NULL
            )
            "#,
        )
        .execute(&mut conn)
        .await
        .context("Failed to create bus_routes table")?;
        Ok(())
    }

    /// Insert all given listings in one transaction. Ids are assigned by
    /// the store; no duplicate check is made, so re-running a collection
    /// appends the same routes again.
    pub async fn append(&self, listings: &[Listing]) -> Result<()> {
        let mut conn = self.connect().await?;
        let mut tx = conn.begin().await.context("Failed to begin transaction")?;

        for listing in listings {
            sqlx::query(
                r#"
                INSERT INTO bus_routes (
                    route_name, route_link, bus_operator_name, bus_type,
                    departure_time, duration, arrival_time,
                    star_rating, price, seats_available
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&listing.route_name)
            .bind(&listing.route_link)
            .bind(&listing.bus_operator_name)
            .bind(&listing.bus_type)
            .bind(&listing.departure_time)
            .bind(&listing.duration)
            .bind(&listing.arrival_time)
            .bind(listing.star_rating)
            .bind(listing.price)
            .bind(listing.seats_available)
            .execute(&mut *tx)
            .await
            .context("Failed to insert listing")?;
        }

        tx.commit().await.context("Failed to commit listing batch")?;
        debug!("Appended {} rows", listings.len());
        Ok(())
    }

    /// Every stored row, in insertion order (by id).
    pub async fn load_all(&self) -> Result<Vec<StoredListing>> {
        let mut conn = self.connect().await?;
        let rows: Vec<StoredListing> = sqlx::query_as(
            r#"
            SELECT
                id, route_name, route_link, bus_operator_name, bus_type,
                departure_time, duration, arrival_time,
                star_rating, price, seats_available
            FROM bus_routes
            ORDER BY id
            "#,
        )
        .fetch_all(&mut conn)
        .await
        .context("Failed to load listings")?;
        Ok(rows)
    }
}
