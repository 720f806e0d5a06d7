//! Postgres-backed implementation of the check-in store.
//!
//! # What this module is
//! Implements the [`CheckinStore`] trait using Postgres (via `sqlx`) as a
//! durable backing store for owners, pets, and appointments.
//!
//! # Key invariants
//! - Ids come from `BIGSERIAL` columns; the API never supplies them.
//! - Appointments reference owners and pets with `ON DELETE CASCADE`, so
//!   deleting either side removes the bookings that depend on it.
//!
//! # Concurrency model
//! - The store is shared across async handlers; `sqlx::PgPool` manages
//!   connection concurrency. Pool sizing and acquire timeouts come from
//!   [`PostgresConfig`] because hanging forever on DB failures is unacceptable
//!   for a request-serving service.
//!
//! # Operational notes
//! - Migrations run at startup via `sqlx::migrate!("./migrations")` so
//!   handlers can assume the schema exists. If migrations fail, startup fails.
//! - Database URLs may contain credentials; they are never logged.
use super::{CheckinStore, StoreError, StoreResult};
use crate::config::PostgresConfig;
use crate::model::{
    Appointment, AppointmentUpdate, NewAppointment, NewOwner, NewPet, Owner, OwnerUpdate, Pet,
    PetUpdate,
};
use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use std::time::Duration;

/// Durable check-in store backed by Postgres.
pub struct PostgresStore {
    pool: PgPool,
}

/// Row shape for the `owners` table.
///
/// DB-facing structs are kept separate from the domain types so schema details
/// stay localized to this module.
#[derive(Debug, Clone, FromRow)]
struct DbOwner {
    id: i64,
    name: String,
    phone: String,
}

/// Row shape for the `pets` table.
#[derive(Debug, Clone, FromRow)]
struct DbPet {
    id: i64,
    name: String,
    species: String,
    breed: String,
}

/// Row shape for the `appointments` table.
#[derive(Debug, Clone, FromRow)]
struct DbAppointment {
    id: i64,
    date: String,
    time: String,
    pet_id: i64,
    owner_id: i64,
}

impl From<DbOwner> for Owner {
    fn from(row: DbOwner) -> Self {
        Owner {
            id: row.id,
            name: row.name,
            phone: row.phone,
        }
    }
}

impl From<DbPet> for Pet {
    fn from(row: DbPet) -> Self {
        Pet {
            id: row.id,
            name: row.name,
            species: row.species,
            breed: row.breed,
        }
    }
}

impl From<DbAppointment> for Appointment {
    fn from(row: DbAppointment) -> Self {
        Appointment {
            id: row.id,
            date: row.date,
            time: row.time,
            pet_id: row.pet_id,
            owner_id: row.owner_id,
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
        // `max_connections` caps concurrent DB work; `acquire_timeout` bounds
        // how long a request waits for a pooled connection before failing.
        let connect_options = PgConnectOptions::from_str(&pg.url).map_err(sqlx::Error::from)?;
        let pool = PgPoolOptions::new()
            .max_connections(pg.max_connections)
            .acquire_timeout(Duration::from_millis(pg.acquire_timeout_ms))
            .connect_with(connect_options)
            .await?;

        if run_migrations {
            // Migrations run before serving requests; a failed migration is a
            // failed startup, not a degraded service.
            sqlx::migrate!("./migrations").run(&pool).await?;
        }

        Ok(Self { pool })
    }
}

#[async_trait]
impl CheckinStore for PostgresStore {
    async fn list_owners(&self) -> StoreResult<Vec<Owner>> {
        let rows =
            sqlx::query_as::<_, DbOwner>(r#"SELECT id, name, phone FROM owners ORDER BY id"#)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Owner::from).collect())
    }

    async fn get_owner(&self, id: i64) -> StoreResult<Owner> {
        let row =
            sqlx::query_as::<_, DbOwner>(r#"SELECT id, name, phone FROM owners WHERE id = $1"#)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(Owner::from)
            .ok_or_else(|| StoreError::NotFound(format!("owner {id}")))
    }

    async fn create_owner(&self, owner: NewOwner) -> StoreResult<Owner> {
        let row = sqlx::query_as::<_, DbOwner>(
            r#"INSERT INTO owners (name, phone) VALUES ($1, $2) RETURNING id, name, phone"#,
        )
        .bind(&owner.name)
        .bind(&owner.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_owner(&self, id: i64, update: OwnerUpdate) -> StoreResult<Owner> {
        let row = sqlx::query_as::<_, DbOwner>(
            r#"UPDATE owners
               SET name = COALESCE($2, name), phone = COALESCE($3, phone)
               WHERE id = $1
               RETURNING id, name, phone"#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.phone)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Owner::from)
            .ok_or_else(|| StoreError::NotFound(format!("owner {id}")))
    }

    async fn delete_owner(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query(r#"DELETE FROM owners WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("owner {id}")));
        }
        Ok(())
    }

    async fn list_pets(&self) -> StoreResult<Vec<Pet>> {
        let rows = sqlx::query_as::<_, DbPet>(
            r#"SELECT id, name, species, breed FROM pets ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Pet::from).collect())
    }

    async fn get_pet(&self, id: i64) -> StoreResult<Pet> {
        let row = sqlx::query_as::<_, DbPet>(
            r#"SELECT id, name, species, breed FROM pets WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Pet::from)
            .ok_or_else(|| StoreError::NotFound(format!("pet {id}")))
    }

    async fn create_pet(&self, pet: NewPet) -> StoreResult<Pet> {
        let row = sqlx::query_as::<_, DbPet>(
            r#"INSERT INTO pets (name, species, breed) VALUES ($1, $2, $3)
               RETURNING id, name, species, breed"#,
        )
        .bind(&pet.name)
        .bind(&pet.species)
        .bind(&pet.breed)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_pet(&self, id: i64, update: PetUpdate) -> StoreResult<Pet> {
        let row = sqlx::query_as::<_, DbPet>(
            r#"UPDATE pets
               SET name = COALESCE($2, name),
                   species = COALESCE($3, species),
                   breed = COALESCE($4, breed)
               WHERE id = $1
               RETURNING id, name, species, breed"#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.species)
        .bind(update.breed)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Pet::from)
            .ok_or_else(|| StoreError::NotFound(format!("pet {id}")))
    }

    async fn delete_pet(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query(r#"DELETE FROM pets WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("pet {id}")));
        }
        Ok(())
    }

    async fn list_appointments(&self) -> StoreResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, DbAppointment>(
            r#"SELECT id, date, time, pet_id, owner_id FROM appointments ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn get_appointment(&self, id: i64) -> StoreResult<Appointment> {
        let row = sqlx::query_as::<_, DbAppointment>(
            r#"SELECT id, date, time, pet_id, owner_id FROM appointments WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Appointment::from)
            .ok_or_else(|| StoreError::NotFound(format!("appointment {id}")))
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> StoreResult<Appointment> {
        let row = sqlx::query_as::<_, DbAppointment>(
            r#"INSERT INTO appointments (date, time, pet_id, owner_id)
               VALUES ($1, $2, $3, $4)
               RETURNING id, date, time, pet_id, owner_id"#,
        )
        .bind(&appointment.date)
        .bind(&appointment.time)
        .bind(appointment.pet_id)
        .bind(appointment.owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_appointment(
        &self,
        id: i64,
        update: AppointmentUpdate,
    ) -> StoreResult<Appointment> {
        let row = sqlx::query_as::<_, DbAppointment>(
            r#"UPDATE appointments
               SET date = COALESCE($2, date), time = COALESCE($3, time)
               WHERE id = $1
               RETURNING id, date, time, pet_id, owner_id"#,
        )
        .bind(id)
        .bind(update.date)
        .bind(update.time)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Appointment::from)
            .ok_or_else(|| StoreError::NotFound(format!("appointment {id}")))
    }

    async fn delete_appointment(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query(r#"DELETE FROM appointments WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("appointment {id}")));
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
