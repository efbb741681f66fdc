use async_trait::async_trait;

use super::domain::{CarId, CarInput, CarModel};
use crate::context::Context;
use crate::errors::CarError;

/// Storage contract for car records.
///
/// Implementations must be safe to share between concurrent requests and
/// must observe the deadline and cancel signal carried by `ctx`.
/// `create` and `update` validate their input before any write, so a call
/// either fully succeeds or writes nothing.
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// All records in the store's natural order.
    async fn list(&self, ctx: &Context) -> Result<Vec<CarModel>, CarError>;
    async fn get(&self, ctx: &Context, id: CarId) -> Result<CarModel, CarError>;
    async fn create(&self, ctx: &Context, input: CarInput) -> Result<CarModel, CarError>;
    /// Replace every mutable field of record `id`; `NotFound` writes nothing.
    async fn update(&self, ctx: &Context, id: CarId, input: CarInput) -> Result<CarModel, CarError>;
    async fn delete(&self, ctx: &Context, id: CarId) -> Result<(), CarError>;
    /// Release store resources. Safe to call more than once.
    async fn close(&self) -> Result<(), CarError>;
}

/// In-memory store, handy for tests and local runs without PostgreSQL.
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Inner {
        rows: BTreeMap<CarId, CarModel>,
        last_id: CarId,
    }

    /// Ids start at 1 and are never reused, even after a delete.
    #[derive(Default)]
    pub struct MemoryCarRepository {
        inner: Mutex<Inner>,
    }

    impl MemoryCarRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn len(&self) -> usize {
            self.lock().map(|inner| inner.rows.len()).unwrap_or(0)
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn lock(&self) -> Result<MutexGuard<'_, Inner>, CarError> {
            self.inner
                .lock()
                .map_err(|_| CarError::Storage("memory store lock poisoned".into()))
        }
    }

    #[async_trait]
    impl CarRepository for MemoryCarRepository {
        async fn list(&self, ctx: &Context) -> Result<Vec<CarModel>, CarError> {
            ctx.run(async { Ok(self.lock()?.rows.values().cloned().collect()) }).await
        }

        async fn get(&self, ctx: &Context, id: CarId) -> Result<CarModel, CarError> {
            ctx.run(async { self.lock()?.rows.get(&id).cloned().ok_or(CarError::NotFound(id)) })
                .await
        }

        async fn create(&self, ctx: &Context, input: CarInput) -> Result<CarModel, CarError> {
            input.validate()?;
            ctx.run(async {
                let mut inner = self.lock()?;
                inner.last_id += 1;
                let car = input.into_car(inner.last_id);
                inner.rows.insert(car.id, car.clone());
                Ok(car)
            })
            .await
        }

        async fn update(&self, ctx: &Context, id: CarId, input: CarInput) -> Result<CarModel, CarError> {
            input.validate()?;
            ctx.run(async {
                let mut inner = self.lock()?;
                let slot = inner.rows.get_mut(&id).ok_or(CarError::NotFound(id))?;
                *slot = input.into_car(id);
                Ok(slot.clone())
            })
            .await
        }

        async fn delete(&self, ctx: &Context, id: CarId) -> Result<(), CarError> {
            ctx.run(async {
                self.lock()?.rows.remove(&id).map(|_| ()).ok_or(CarError::NotFound(id))
            })
            .await
        }

        async fn close(&self) -> Result<(), CarError> {
            Ok(())
        }
    }
}
