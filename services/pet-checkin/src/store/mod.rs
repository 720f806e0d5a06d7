use crate::model::{
    Appointment, AppointmentUpdate, NewAppointment, NewOwner, NewPet, Owner, OwnerUpdate, Pet,
    PetUpdate,
};
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

/// Persistence boundary for the check-in service.
///
/// Handlers receive this trait object through `AppState` rather than touching
/// a process-wide database handle. Both backends assign sequential ids so the
/// API surface is identical regardless of durability.
#[async_trait]
pub trait CheckinStore: Send + Sync {
    async fn list_owners(&self) -> StoreResult<Vec<Owner>>;
    async fn get_owner(&self, id: i64) -> StoreResult<Owner>;
    async fn create_owner(&self, owner: NewOwner) -> StoreResult<Owner>;
    async fn update_owner(&self, id: i64, update: OwnerUpdate) -> StoreResult<Owner>;
    async fn delete_owner(&self, id: i64) -> StoreResult<()>;

    async fn list_pets(&self) -> StoreResult<Vec<Pet>>;
    async fn get_pet(&self, id: i64) -> StoreResult<Pet>;
    async fn create_pet(&self, pet: NewPet) -> StoreResult<Pet>;
    async fn update_pet(&self, id: i64, update: PetUpdate) -> StoreResult<Pet>;
    async fn delete_pet(&self, id: i64) -> StoreResult<()>;

    async fn list_appointments(&self) -> StoreResult<Vec<Appointment>>;
    async fn get_appointment(&self, id: i64) -> StoreResult<Appointment>;
    async fn create_appointment(&self, appointment: NewAppointment) -> StoreResult<Appointment>;
    async fn update_appointment(
        &self,
        id: i64,
        update: AppointmentUpdate,
    ) -> StoreResult<Appointment>;
    async fn delete_appointment(&self, id: i64) -> StoreResult<()>;

    async fn health_check(&self) -> StoreResult<()>;
    fn is_durable(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}
