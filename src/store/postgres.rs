use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::{debug, info};

use crate::models::RejectedAd;

/// PostgreSQL-backed store for production persistence
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given connection string
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        info!("Connected to PostgreSQL");

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;

        info!("Database migrations complete");

        Ok(())
    }

    /// Append the records observed on one run
    pub async fn save(
        &self,
        run_date: NaiveDate,
        team: &str,
        records: &[RejectedAd],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO rejected_ads (run_date, team, campaign, ad_name, reasons)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(run_date)
            .bind(team)
            .bind(&record.campaign)
            .bind(&record.ad_name)
            .bind(&record.reasons)
            .execute(&mut *tx)
            .await
            .context("Failed to save rejected ad")?;
        }

        tx.commit().await?;

        debug!(%run_date, team, saved = records.len(), "Saved rejected ads to database");

        Ok(())
    }

    /// Load the records persisted for a run date and team
    pub async fn query(&self, run_date: NaiveDate, team: &str) -> Result<Vec<RejectedAd>> {
        let rows = sqlx::query(
            r#"
            SELECT campaign, ad_name, reasons
            FROM rejected_ads
            WHERE run_date = $1 AND team = $2
            ORDER BY id
            "#,
        )
        .bind(run_date)
        .bind(team)
        .fetch_all(&self.pool)
        .await
        .context("Failed to query rejected ads")?;

        let records = rows
            .iter()
            .map(|row| RejectedAd {
                campaign: row.get("campaign"),
                ad_name: row.get("ad_name"),
                reasons: row.get("reasons"),
            })
            .collect();

        Ok(records)
    }
}
