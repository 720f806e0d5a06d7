use crate::model::{Console, ConsoleUpdate, Game, GameUpdate, NewConsole, NewGame};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence boundary for the catalog service.
///
/// Handlers receive this trait object through `AppState`. Both backends assign
/// sequential ids so the API surface is identical regardless of durability.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_games(&self) -> StoreResult<Vec<Game>>;
    async fn get_game(&self, id: i64) -> StoreResult<Game>;
    async fn create_game(&self, game: NewGame) -> StoreResult<Game>;
    async fn update_game(&self, id: i64, update: GameUpdate) -> StoreResult<Game>;
    async fn delete_game(&self, id: i64) -> StoreResult<()>;

    async fn list_consoles(&self) -> StoreResult<Vec<Console>>;
    async fn get_console(&self, id: i64) -> StoreResult<Console>;
    async fn create_console(&self, console: NewConsole) -> StoreResult<Console>;
    async fn update_console(&self, id: i64, update: ConsoleUpdate) -> StoreResult<Console>;
    async fn delete_console(&self, id: i64) -> StoreResult<()>;

    async fn health_check(&self) -> StoreResult<()>;
    fn is_durable(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}
