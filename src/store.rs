//! SQLite-backed persistence for rooms.
//!
//! Primary-key and name-uniqueness rules live in the schema; this module only
//! translates constraint failures into [`StoreError::NameTaken`].

use std::{fmt, num::NonZeroU32, str::FromStr};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use serde::Serialize;
use sqlx::{
    pool::PoolConnection,
    sqlite::{SqlitePool, SqlitePoolOptions},
    FromRow, Sqlite,
};
use thiserror::Error;

use crate::{validate::RoomName, AppError};

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("room name '{0}' is already taken")]
    NameTaken(String),

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// How the `name` column compares values for uniqueness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameCollation {
    /// Byte-for-byte, case-sensitive.
    #[default]
    Binary,
    /// ASCII case-insensitive.
    NoCase,
}

impl NameCollation {
    fn as_sql(self) -> &'static str {
        match self {
            NameCollation::Binary => "BINARY",
            NameCollation::NoCase => "NOCASE",
        }
    }
}

impl fmt::Display for NameCollation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for NameCollation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" => Ok(NameCollation::Binary),
            "nocase" => Ok(NameCollation::NoCase),
            other => Err(anyhow::anyhow!(
                "unknown collation '{other}', expected 'binary' or 'nocase'"
            )),
        }
    }
}

/// Handle to the room table. Cheap to clone; shares one pool.
#[derive(Debug, Clone)]
pub struct RoomStore {
    pool: SqlitePool,
    collation: NameCollation,
}

impl RoomStore {
    pub fn new(pool: SqlitePool, collation: NameCollation) -> Self {
        Self { pool, collation }
    }

    pub async fn connect(
        database_url: &str,
        max_connections: NonZeroU32,
        collation: NameCollation,
    ) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.get())
            .connect(database_url)
            .await?;

        let store = Self::new(pool, collation);
        store.create_tables().await?;
        Ok(store)
    }

    /// An ephemeral store. A single connection that never expires keeps the
    /// in-memory database alive for the life of the pool.
    pub async fn in_memory(collation: NameCollation) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let store = Self::new(pool, collation);
        store.create_tables().await?;
        Ok(store)
    }

    /// Creates the room table and its unique name index if they are missing.
    /// An existing table keeps the collation it was created with.
    pub async fn create_tables(&self) -> StoreResult<()> {
        let collation = self.collation;
        let sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS rooms (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL COLLATE {collation}
            );

            CREATE UNIQUE INDEX IF NOT EXISTS ix_rooms_name ON rooms(name COLLATE {collation});
            "#
        );
        sqlx::query(&sql).execute(&self.pool).await?;

        tracing::debug!(%collation, "room table ready");
        Ok(())
    }

    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Checks a connection out of the pool. It goes back when the session drops.
    pub async fn session(&self) -> StoreResult<RoomSession> {
        Ok(RoomSession {
            conn: self.pool.acquire().await?,
        })
    }
}

/// One request's hold on a pooled connection.
pub struct RoomSession {
    conn: PoolConnection<Sqlite>,
}

impl RoomSession {
    pub async fn all(&mut self) -> StoreResult<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>("SELECT id,name FROM rooms ORDER BY id")
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rooms)
    }

    pub async fn get(&mut self, id: i64) -> StoreResult<Option<Room>> {
        let room = sqlx::query_as::<_, Room>("SELECT id,name FROM rooms WHERE id=?")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(room)
    }

    pub async fn insert(&mut self, name: &RoomName) -> StoreResult<Room> {
        sqlx::query_as::<_, Room>("INSERT INTO rooms (name) VALUES (?) RETURNING id,name")
            .bind(&**name)
            .fetch_one(&mut *self.conn)
            .await
            .map_err(|err| name_taken_or(err, name))
    }

    /// Returns false if no room has `id`.
    pub async fn update_name(&mut self, id: i64, name: &RoomName) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE rooms SET name=? WHERE id=?")
            .bind(&**name)
            .bind(id)
            .execute(&mut *self.conn)
            .await
            .map_err(|err| name_taken_or(err, name))?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns false if no room has `id`.
    pub async fn delete(&mut self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id=?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn name_taken_or(err: sqlx::Error, name: &RoomName) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::NameTaken(name.to_string());
        }
    }
    StoreError::Sqlx(err)
}

impl<S> FromRequestParts<S> for RoomSession
where
    RoomStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(RoomStore::from_ref(state).session().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store(collation: NameCollation) -> RoomStore {
        RoomStore::in_memory(collation).await.unwrap()
    }

    fn name(s: &str) -> RoomName {
        RoomName::try_from(s).unwrap()
    }

    #[tokio::test]
    async fn insert_then_get() {
        let store = test_store(NameCollation::Binary).await;
        let mut session = store.session().await.unwrap();

        let room = session.insert(&name("Kitchen")).await.unwrap();
        assert_eq!(room.name, "Kitchen");

        let fetched = session.get(room.id).await.unwrap();
        assert_eq!(fetched, Some(room));
        assert_eq!(session.get(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn all_is_in_creation_order() {
        let store = test_store(NameCollation::Binary).await;
        let mut session = store.session().await.unwrap();

        for n in ["Living Room", "Kitchen", "Attic"] {
            session.insert(&name(n)).await.unwrap();
        }

        let names: Vec<String> = session
            .all()
            .await
            .unwrap()
            .into_iter()
            .map(|room| room.name)
            .collect();
        assert_eq!(names, ["Living Room", "Kitchen", "Attic"]);
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected() {
        let store = test_store(NameCollation::Binary).await;
        let mut session = store.session().await.unwrap();

        session.insert(&name("Kitchen")).await.unwrap();
        let err = session.insert(&name("Kitchen")).await.unwrap_err();
        assert!(matches!(err, StoreError::NameTaken(ref n) if n == "Kitchen"));

        // Binary collation is case-sensitive.
        session.insert(&name("KITCHEN")).await.unwrap();
    }

    #[tokio::test]
    async fn nocase_collation_folds_case() {
        let store = test_store(NameCollation::NoCase).await;
        let mut session = store.session().await.unwrap();

        session.insert(&name("Kitchen")).await.unwrap();
        let err = session.insert(&name("KITCHEN")).await.unwrap_err();
        assert!(matches!(err, StoreError::NameTaken(_)));
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let store = test_store(NameCollation::Binary).await;
        let mut session = store.session().await.unwrap();

        let room = session.insert(&name("Den")).await.unwrap();
        assert!(session.update_name(room.id, &name("Study")).await.unwrap());
        assert_eq!(session.get(room.id).await.unwrap().unwrap().name, "Study");
        assert!(!session.update_name(999, &name("Nope")).await.unwrap());

        assert!(session.delete(room.id).await.unwrap());
        assert!(!session.delete(room.id).await.unwrap());
        assert_eq!(session.get(room.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_to_taken_name_conflicts() {
        let store = test_store(NameCollation::Binary).await;
        let mut session = store.session().await.unwrap();

        session.insert(&name("Kitchen")).await.unwrap();
        let den = session.insert(&name("Den")).await.unwrap();

        let err = session.update_name(den.id, &name("Kitchen")).await.unwrap_err();
        assert!(matches!(err, StoreError::NameTaken(_)));
        assert_eq!(session.get(den.id).await.unwrap().unwrap().name, "Den");

        // Renaming a room to its own name is not a conflict.
        assert!(session.update_name(den.id, &name("Den")).await.unwrap());
    }

    #[tokio::test]
    async fn ids_are_not_reused() {
        let store = test_store(NameCollation::Binary).await;
        let mut session = store.session().await.unwrap();

        let first = session.insert(&name("Garage")).await.unwrap();
        session.delete(first.id).await.unwrap();
        let second = session.insert(&name("Garage")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn parse_collation() {
        assert_eq!("binary".parse::<NameCollation>().unwrap(), NameCollation::Binary);
        assert_eq!("NoCase".parse::<NameCollation>().unwrap(), NameCollation::NoCase);
        assert!("rtrim".parse::<NameCollation>().is_err());
    }
}
