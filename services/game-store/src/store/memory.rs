//! In-memory implementation of the catalog store.
//!
//! Implements [`CatalogStore`] with `HashMap`s behind `tokio::sync::RwLock`
//! for local development and tests. State is lost on restart; each table
//! carries its own `next_id` counter starting at 1 to match the serial
//! primary keys of the Postgres backend. Listings come back sorted by id.
use super::{CatalogStore, StoreError, StoreResult};
use crate::model::{Console, ConsoleUpdate, Game, GameUpdate, NewConsole, NewGame};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keyed table with a sequential id counter.
#[derive(Debug)]
struct Table<T> {
    next_id: i64,
    rows: HashMap<i64, T>,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            next_id: 1,
            rows: HashMap::new(),
        }
    }

    fn insert(&mut self, build: impl FnOnce(i64) -> T) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, build(id));
        id
    }
}

pub struct InMemoryStore {
    games: Arc<RwLock<Table<Game>>>,
    consoles: Arc<RwLock<Table<Console>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            games: Arc::new(RwLock::new(Table::new())),
            consoles: Arc::new(RwLock::new(Table::new())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_by_id<T: Clone>(rows: &HashMap<i64, T>) -> Vec<T> {
    let mut ids: Vec<i64> = rows.keys().copied().collect();
    ids.sort_unstable();
    ids.iter().map(|id| rows[id].clone()).collect()
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn list_games(&self) -> StoreResult<Vec<Game>> {
        let games = self.games.read().await;
        Ok(sorted_by_id(&games.rows))
    }

    async fn get_game(&self, id: i64) -> StoreResult<Game> {
        let games = self.games.read().await;
        games
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("game {id}")))
    }

    async fn create_game(&self, game: NewGame) -> StoreResult<Game> {
        let mut games = self.games.write().await;
        let id = games.insert(|id| Game {
            id,
            name: game.name.clone(),
            genre: game.genre.clone(),
            console: game.console.clone(),
        });
        Ok(games.rows[&id].clone())
    }

    async fn update_game(&self, id: i64, update: GameUpdate) -> StoreResult<Game> {
        let mut games = self.games.write().await;
        let game = games
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("game {id}")))?;
        if let Some(name) = update.name {
            game.name = name;
        }
        if let Some(genre) = update.genre {
            game.genre = genre;
        }
        if let Some(console) = update.console {
            game.console = console;
        }
        Ok(game.clone())
    }

    async fn delete_game(&self, id: i64) -> StoreResult<()> {
        let mut games = self.games.write().await;
        games
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("game {id}")))
    }

    async fn list_consoles(&self) -> StoreResult<Vec<Console>> {
        let consoles = self.consoles.read().await;
        Ok(sorted_by_id(&consoles.rows))
    }

    async fn get_console(&self, id: i64) -> StoreResult<Console> {
        let consoles = self.consoles.read().await;
        consoles
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("console {id}")))
    }

    async fn create_console(&self, console: NewConsole) -> StoreResult<Console> {
        let mut consoles = self.consoles.write().await;
        let id = consoles.insert(|id| Console {
            id,
            name: console.name.clone(),
            company: console.company.clone(),
        });
        Ok(consoles.rows[&id].clone())
    }

    async fn update_console(&self, id: i64, update: ConsoleUpdate) -> StoreResult<Console> {
        let mut consoles = self.consoles.write().await;
        let console = consoles
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("console {id}")))?;
        if let Some(name) = update.name {
            console.name = name;
        }
        if let Some(company) = update.company {
            console.company = company;
        }
        Ok(console.clone())
    }

    async fn delete_console(&self, id: i64) -> StoreResult<()> {
        let mut consoles = self.consoles.write().await;
        consoles
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("console {id}")))
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
