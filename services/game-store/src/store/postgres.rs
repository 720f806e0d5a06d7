//! Postgres-backed implementation of the catalog store.
//!
//! Ids come from `BIGSERIAL` columns; the API never supplies them. Pool
//! sizing and acquire timeouts come from [`PostgresConfig`] so a request
//! never waits unbounded for a connection. Migrations run at startup via
//! `sqlx::migrate!("./migrations")`; if they fail, startup fails.
use super::{CatalogStore, StoreError, StoreResult};
use crate::config::PostgresConfig;
use crate::model::{Console, ConsoleUpdate, Game, GameUpdate, NewConsole, NewGame};
use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use std::time::Duration;

/// Durable catalog store backed by Postgres.
pub struct PostgresStore {
    pool: PgPool,
}

/// Row shape for the `games` table. DB-facing structs are kept separate from
/// the domain types so schema details stay localized to this module.
#[derive(Debug, Clone, FromRow)]
struct DbGame {
    id: i64,
    name: String,
    genre: String,
    console: String,
}

/// Row shape for the `consoles` table.
#[derive(Debug, Clone, FromRow)]
struct DbConsole {
    id: i64,
    name: String,
    company: String,
}

impl From<DbGame> for Game {
    fn from(row: DbGame) -> Self {
        Game {
            id: row.id,
            name: row.name,
            genre: row.genre,
            console: row.console,
        }
    }
}

impl From<DbConsole> for Console {
    fn from(row: DbConsole) -> Self {
        Console {
            id: row.id,
            name: row.name,
            company: row.company,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unexpected(anyhow!(err))
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Unexpected(anyhow!(err))
    }
}

impl PostgresStore {
    /// Connect to Postgres and apply pending migrations.
    pub async fn connect(pg: &PostgresConfig) -> StoreResult<Self> {
        Self::connect_internal(pg, true).await
    }

    /// Connect without running migrations; for tests that manage the schema
    /// externally.
    #[cfg(any(test, feature = "pg-tests"))]
    pub async fn connect_without_migrations(pg: &PostgresConfig) -> StoreResult<Self> {
        Self::connect_internal(pg, false).await
    }

    async fn connect_internal(pg: &PostgresConfig, run_migrations: bool) -> StoreResult<Self> {
        let connect_options = PgConnectOptions::from_str(&pg.url).map_err(sqlx::Error::from)?;
        let pool = PgPoolOptions::new()
            .max_connections(pg.max_connections)
            .acquire_timeout(Duration::from_millis(pg.acquire_timeout_ms))
            .connect_with(connect_options)
            .await?;

        if run_migrations {
            sqlx::migrate!("./migrations").run(&pool).await?;
        }

        Ok(Self { pool })
    }
}

#[async_trait]
impl CatalogStore for PostgresStore {
    async fn list_games(&self) -> StoreResult<Vec<Game>> {
        let rows = sqlx::query_as::<_, DbGame>(
            r#"SELECT id, name, genre, console FROM games ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Game::from).collect())
    }

    async fn get_game(&self, id: i64) -> StoreResult<Game> {
        let row = sqlx::query_as::<_, DbGame>(
            r#"SELECT id, name, genre, console FROM games WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Game::from)
            .ok_or_else(|| StoreError::NotFound(format!("game {id}")))
    }

    async fn create_game(&self, game: NewGame) -> StoreResult<Game> {
        let row = sqlx::query_as::<_, DbGame>(
            r#"INSERT INTO games (name, genre, console) VALUES ($1, $2, $3)
               RETURNING id, name, genre, console"#,
        )
        .bind(&game.name)
        .bind(&game.genre)
        .bind(&game.console)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_game(&self, id: i64, update: GameUpdate) -> StoreResult<Game> {
        let row = sqlx::query_as::<_, DbGame>(
            r#"UPDATE games
               SET name = COALESCE($2, name),
                   genre = COALESCE($3, genre),
                   console = COALESCE($4, console)
               WHERE id = $1
               RETURNING id, name, genre, console"#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.genre)
        .bind(update.console)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Game::from)
            .ok_or_else(|| StoreError::NotFound(format!("game {id}")))
    }

    async fn delete_game(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query(r#"DELETE FROM games WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("game {id}")));
        }
        Ok(())
    }

    async fn list_consoles(&self) -> StoreResult<Vec<Console>> {
        let rows = sqlx::query_as::<_, DbConsole>(
            r#"SELECT id, name, company FROM consoles ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Console::from).collect())
    }

    async fn get_console(&self, id: i64) -> StoreResult<Console> {
        let row = sqlx::query_as::<_, DbConsole>(
            r#"SELECT id, name, company FROM consoles WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Console::from)
            .ok_or_else(|| StoreError::NotFound(format!("console {id}")))
    }

    async fn create_console(&self, console: NewConsole) -> StoreResult<Console> {
        let row = sqlx::query_as::<_, DbConsole>(
            r#"INSERT INTO consoles (name, company) VALUES ($1, $2)
               RETURNING id, name, company"#,
        )
        .bind(&console.name)
        .bind(&console.company)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_console(&self, id: i64, update: ConsoleUpdate) -> StoreResult<Console> {
        let row = sqlx::query_as::<_, DbConsole>(
            r#"UPDATE consoles
               SET name = COALESCE($2, name), company = COALESCE($3, company)
               WHERE id = $1
               RETURNING id, name, company"#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.company)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Console::from)
            .ok_or_else(|| StoreError::NotFound(format!("console {id}")))
    }

    async fn delete_console(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query(r#"DELETE FROM consoles WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("console {id}")));
        }
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
