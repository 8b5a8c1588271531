//! Signing secret repository.

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::{Timestamp as SqlxTimestamp, ToSqlx};
use sqlx::{PgPool, Row, postgres::PgRow, query, query_scalar};
use warden::secrets::{Secret, SecretRepository, SecretStoreError, SecretValue};

const INSERT_SECRET_SQL: &str = include_str!("sql/insert_secret.sql");
const LATEST_VALID_KEY_ID_SQL: &str = include_str!("sql/latest_valid_key_id.sql");
const FIND_SECRET_BY_KEY_ID_SQL: &str = include_str!("sql/find_secret_by_key_id.sql");

/// `PostgreSQL` storage for signing secrets.
#[derive(Debug, Clone)]
pub struct PgSecretRepository {
    pool: PgPool,
}

impl PgSecretRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SecretRepository for PgSecretRepository {
    async fn insert(&self, secret: &Secret) -> Result<(), SecretStoreError> {
        query(INSERT_SECRET_SQL)
            .bind(&secret.key_name)
            .bind(&secret.key_id)
            .bind(secret.value.expose())
            .bind(timestamp(secret.created_at)?.to_sqlx())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(())
    }

    async fn latest_valid(
        &self,
        key_name: &str,
        now: i64,
        earliest_valid: i64,
    ) -> Result<Option<String>, SecretStoreError> {
        query_scalar::<_, String>(LATEST_VALID_KEY_ID_SQL)
            .bind(key_name)
            .bind(timestamp(now)?.to_sqlx())
            .bind(timestamp(earliest_valid)?.to_sqlx())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn find_by_key_id(&self, key_id: &str) -> Result<Option<Secret>, SecretStoreError> {
        let row = query(FIND_SECRET_BY_KEY_ID_SQL)
            .bind(key_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        row.as_ref()
            .map(secret_from_row)
            .transpose()
            .map_err(store_error)
    }
}

fn secret_from_row(row: &PgRow) -> sqlx::Result<Secret> {
    Ok(Secret {
        key_name: row.try_get("key_name")?,
        key_id: row.try_get("key_id")?,
        value: SecretValue::new(row.try_get::<String, _>("value")?),
        created_at: row
            .try_get::<SqlxTimestamp, _>("created_at")?
            .to_jiff()
            .as_second(),
    })
}

/// Unix seconds as a timestamp, clamped to the representable range.
fn timestamp(seconds: i64) -> Result<Timestamp, SecretStoreError> {
    let seconds = seconds.clamp(Timestamp::MIN.as_second(), Timestamp::MAX.as_second());

    Timestamp::from_second(seconds).map_err(SecretStoreError::backend)
}

fn store_error(error: sqlx::Error) -> SecretStoreError {
    match error {
        sqlx::Error::Database(database) if database.is_unique_violation() => {
            SecretStoreError::DuplicateKeyId
        }
        error => SecretStoreError::backend(error),
    }
}
