//! SQLite key-value store for the heuristic predictor's weight table.
//!
//! Seeding uses `INSERT OR IGNORE`, so concurrent first runs write identical rows and
//! never clobber a weight that was tuned later.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

use crate::error::AppError;
use crate::estimation::predictor::PredictorWeights;

pub async fn init_store(database_url: &str) -> Result<SqlitePool, AppError> {
    info!("Initializing weight store at: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Create the weight table if needed
pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS predictor_weights (
            name TEXT PRIMARY KEY,
            weight INTEGER NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Insert any missing default weights, then read the full table
pub async fn load_or_seed(pool: &SqlitePool) -> Result<PredictorWeights, AppError> {
    seed_defaults(pool).await?;
    load(pool).await
}

async fn seed_defaults(pool: &SqlitePool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for (name, weight) in PredictorWeights::default().entries() {
        sqlx::query("INSERT OR IGNORE INTO predictor_weights (name, weight) VALUES (?, ?)")
            .bind(name)
            .bind(weight)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}

/// Read the stored weights; rows that are missing keep their default
pub async fn load(pool: &SqlitePool) -> Result<PredictorWeights, AppError> {
    let rows: Vec<(String, i64)> =
        sqlx::query_as("SELECT name, weight FROM predictor_weights ORDER BY name")
            .fetch_all(pool)
            .await?;

    let mut weights = PredictorWeights::default();
    for (name, weight) in rows {
        if weights.set(&name, weight).is_err() {
            tracing::warn!("Ignoring unknown stored weight '{}'", name);
        }
    }
    Ok(weights)
}

/// Store one weight, returning the updated table
pub async fn set_weight(pool: &SqlitePool, name: &str, weight: i64) -> Result<PredictorWeights, AppError> {
    // Validates the name before touching the store
    let mut weights = load_or_seed(pool).await?;
    weights.set(name, weight)?;

    sqlx::query(
        r#"
        INSERT INTO predictor_weights (name, weight) VALUES (?, ?)
        ON CONFLICT(name) DO UPDATE SET weight = excluded.weight
        "#,
    )
    .bind(name)
    .bind(weight)
    .execute(pool)
    .await?;

    info!("Predictor weight '{}' set to {}", name, weight);
    Ok(weights)
}

/// Drop all tuned weights and reseed the defaults
pub async fn reset_weights(pool: &SqlitePool) -> Result<PredictorWeights, AppError> {
    sqlx::query("DELETE FROM predictor_weights")
        .execute(pool)
        .await?;
    load_or_seed(pool).await
}
