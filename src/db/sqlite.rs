use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

use crate::db::models::{DbUser, LeadSummary};
use crate::db::schema::SQLITE_INIT;
use crate::error::VoltError;
use crate::types::LeadSubmission;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct LeadStorage {
    pool: SqlitePool,
}

impl LeadStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Opens (creating if missing) the database and initializes the schema.
    /// Foreign keys are enabled so deleting a lead cascades to consumption.
    pub async fn connect(database_url: &str) -> Result<Self, VoltError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), VoltError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Upsert a panel account by unique email.
    pub async fn upsert_user(&self, email: &str, password_hash: &str) -> Result<(), VoltError> {
        sqlx::query(
            r#"
            INSERT INTO users (email, password_hash) VALUES (?, ?)
            ON CONFLICT(email) DO UPDATE SET password_hash = excluded.password_hash
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<DbUser>, VoltError> {
        let row = sqlx::query("SELECT id, email, password_hash FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Self::row_to_user).transpose()
    }

    /// Inserts the lead and its consumption row in a single transaction.
    /// Returns the new lead id. A failure on either insert rolls both back.
    pub async fn insert_lead(&self, sub: &LeadSubmission) -> Result<i64, VoltError> {
        let mut tx = self.pool.begin().await?;

        let lead_id = sqlx::query("INSERT INTO leads (name, email, phone, cpf) VALUES (?, ?, ?, ?)")
            .bind(&sub.name)
            .bind(&sub.email)
            .bind(&sub.phone)
            .bind(&sub.cpf)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        sqlx::query(
            r#"
            INSERT INTO consumption (lead_id, monthly_bill_value, city, state, supply_type)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(lead_id)
        .bind(sub.consumption.monthly_bill)
        .bind(&sub.consumption.city)
        .bind(&sub.consumption.state)
        .bind(&sub.consumption.supply_type)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(lead_id)
    }

    /// Admin listing: leads joined with consumption, newest first.
    pub async fn list_leads(&self) -> Result<Vec<LeadSummary>, VoltError> {
        let rows = sqlx::query(
            r#"
            SELECT l.id, l.name, c.city, c.state, c.monthly_bill_value AS bill_value
            FROM leads l
            LEFT JOIN consumption c ON l.id = c.lead_id
            ORDER BY l.created_at DESC, l.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_summary).collect()
    }

    /// Returns false when no row matched the id.
    pub async fn delete_lead(&self, id: i64) -> Result<bool, VoltError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_consumption_for_lead(&self, lead_id: i64) -> Result<i64, VoltError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM consumption WHERE lead_id = ?")
            .bind(lead_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    fn row_to_user(row: SqliteRow) -> Result<DbUser, VoltError> {
        Ok(DbUser {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
        })
    }

    fn row_to_summary(row: SqliteRow) -> Result<LeadSummary, VoltError> {
        Ok(LeadSummary {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            bill_value: row.try_get("bill_value")?,
        })
    }
}
