//! In-memory implementation of the check-in store.
//!
//! # Purpose
//! Implements [`CheckinStore`] entirely in memory using `HashMap`s guarded by
//! `tokio::sync::RwLock`. It exists for:
//! - local development and tests (no external dependencies)
//! - deployments where durability is not required
//!
//! # Durability and consistency
//! - **Not durable**: all state is lost on process restart.
//! - **Single-process consistency**: write locks serialize mutations; reads
//!   proceed concurrently under read locks.
//!
//! # Id assignment
//! Each table carries its own `next_id` counter starting at 1, mirroring the
//! serial primary keys of the Postgres backend so API responses look the same
//! on both stores. Listings are returned sorted by id to keep ordering
//! deterministic.
use super::{CheckinStore, StoreError, StoreResult};
use crate::model::{
    Appointment, AppointmentUpdate, NewAppointment, NewOwner, NewPet, Owner, OwnerUpdate, Pet,
    PetUpdate,
};
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

/// In-memory check-in store.
///
/// Tables are wrapped in `Arc<RwLock<...>>` so the store can be shared across
/// async request handlers.
pub struct InMemoryStore {
    owners: Arc<RwLock<Table<Owner>>>,
    pets: Arc<RwLock<Table<Pet>>>,
    appointments: Arc<RwLock<Table<Appointment>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            owners: Arc::new(RwLock::new(Table::new())),
            pets: Arc::new(RwLock::new(Table::new())),
            appointments: Arc::new(RwLock::new(Table::new())),
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
impl CheckinStore for InMemoryStore {
    async fn list_owners(&self) -> StoreResult<Vec<Owner>> {
        let owners = self.owners.read().await;
        Ok(sorted_by_id(&owners.rows))
    }

    async fn get_owner(&self, id: i64) -> StoreResult<Owner> {
        let owners = self.owners.read().await;
        owners
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("owner {id}")))
    }

    async fn create_owner(&self, owner: NewOwner) -> StoreResult<Owner> {
        let mut owners = self.owners.write().await;
        let id = owners.insert(|id| Owner {
            id,
            name: owner.name.clone(),
            phone: owner.phone.clone(),
        });
        Ok(owners.rows[&id].clone())
    }

    async fn update_owner(&self, id: i64, update: OwnerUpdate) -> StoreResult<Owner> {
        let mut owners = self.owners.write().await;
        let owner = owners
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("owner {id}")))?;
        if let Some(name) = update.name {
            owner.name = name;
        }
        if let Some(phone) = update.phone {
            owner.phone = phone;
        }
        Ok(owner.clone())
    }

    async fn delete_owner(&self, id: i64) -> StoreResult<()> {
        let mut owners = self.owners.write().await;
        owners
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("owner {id}")))
    }

    async fn list_pets(&self) -> StoreResult<Vec<Pet>> {
        let pets = self.pets.read().await;
        Ok(sorted_by_id(&pets.rows))
    }

    async fn get_pet(&self, id: i64) -> StoreResult<Pet> {
        let pets = self.pets.read().await;
        pets.rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("pet {id}")))
    }

    async fn create_pet(&self, pet: NewPet) -> StoreResult<Pet> {
        let mut pets = self.pets.write().await;
        let id = pets.insert(|id| Pet {
            id,
            name: pet.name.clone(),
            species: pet.species.clone(),
            breed: pet.breed.clone(),
        });
        Ok(pets.rows[&id].clone())
    }

    async fn update_pet(&self, id: i64, update: PetUpdate) -> StoreResult<Pet> {
        let mut pets = self.pets.write().await;
        let pet = pets
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("pet {id}")))?;
        if let Some(name) = update.name {
            pet.name = name;
        }
        if let Some(species) = update.species {
            pet.species = species;
        }
        if let Some(breed) = update.breed {
            pet.breed = breed;
        }
        Ok(pet.clone())
    }

    async fn delete_pet(&self, id: i64) -> StoreResult<()> {
        let mut pets = self.pets.write().await;
        pets.rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("pet {id}")))
    }

    async fn list_appointments(&self) -> StoreResult<Vec<Appointment>> {
        let appointments = self.appointments.read().await;
        Ok(sorted_by_id(&appointments.rows))
    }

    async fn get_appointment(&self, id: i64) -> StoreResult<Appointment> {
        let appointments = self.appointments.read().await;
        appointments
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("appointment {id}")))
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> StoreResult<Appointment> {
        let mut appointments = self.appointments.write().await;
        let id = appointments.insert(|id| Appointment {
            id,
            date: appointment.date.clone(),
            time: appointment.time.clone(),
            pet_id: appointment.pet_id,
            owner_id: appointment.owner_id,
        });
        Ok(appointments.rows[&id].clone())
    }

    async fn update_appointment(
        &self,
        id: i64,
        update: AppointmentUpdate,
    ) -> StoreResult<Appointment> {
        let mut appointments = self.appointments.write().await;
        let appointment = appointments
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("appointment {id}")))?;
        if let Some(date) = update.date {
            appointment.date = date;
        }
        if let Some(time) = update.time {
            appointment.time = time;
        }
        Ok(appointment.clone())
    }

    async fn delete_appointment(&self, id: i64) -> StoreResult<()> {
        let mut appointments = self.appointments.write().await;
        appointments
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("appointment {id}")))
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
