use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, instrument};

use models::car_model;

use crate::car::domain::{CarId, CarInput, CarModel};
use crate::car::repository::CarRepository;
use crate::context::Context;
use crate::errors::CarError;

/// PostgreSQL-backed storage via SeaORM.
///
/// Every statement is parameterised by SeaORM's query builder; update and
/// delete are single conditional statements checked by affected-row count.
pub struct SeaOrmCarRepository {
    db: DatabaseConnection,
}

impl SeaOrmCarRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn active_model(input: CarInput) -> car_model::ActiveModel {
    car_model::ActiveModel {
        id: NotSet,
        brand: Set(input.brand),
        model: Set(input.model),
        price: Set(input.price),
        status: Set(input.status),
        mileage: Set(input.mileage),
    }
}

#[async_trait]
impl CarRepository for SeaOrmCarRepository {
    #[instrument(skip_all)]
    async fn list(&self, ctx: &Context) -> Result<Vec<CarModel>, CarError> {
        ctx.run(async {
            let rows = car_model::Entity::find()
                .order_by_asc(car_model::Column::Id)
                .all(&self.db)
                .await
                .map_err(CarError::storage)?;
            debug!(count = rows.len(), "listed car models");
            Ok(rows.into_iter().map(CarModel::from).collect::<Vec<_>>())
        })
        .await
    }

    #[instrument(skip(self, ctx))]
    async fn get(&self, ctx: &Context, id: CarId) -> Result<CarModel, CarError> {
        ctx.run(async {
            car_model::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(CarError::storage)?
                .map(CarModel::from)
                .ok_or(CarError::NotFound(id))
        })
        .await
    }

    #[instrument(skip(self, ctx, input), fields(brand = %input.brand, model = %input.model))]
    async fn create(&self, ctx: &Context, input: CarInput) -> Result<CarModel, CarError> {
        input.validate()?;
        ctx.run(async {
            let created = active_model(input)
                .insert(&self.db)
                .await
                .map_err(CarError::storage)?;
            debug!(id = created.id, "inserted car model");
            Ok(CarModel::from(created))
        })
        .await
    }

    #[instrument(skip(self, ctx, input), fields(brand = %input.brand, model = %input.model))]
    async fn update(&self, ctx: &Context, id: CarId, input: CarInput) -> Result<CarModel, CarError> {
        input.validate()?;
        ctx.run(async {
            let res = car_model::Entity::update_many()
                .set(active_model(input.clone()))
                .filter(car_model::Column::Id.eq(id))
                .exec(&self.db)
                .await
                .map_err(CarError::storage)?;
            if res.rows_affected == 0 {
                return Err(CarError::NotFound(id));
            }
            Ok(input.into_car(id))
        })
        .await
    }

    #[instrument(skip(self, ctx))]
    async fn delete(&self, ctx: &Context, id: CarId) -> Result<(), CarError> {
        ctx.run(async {
            let res = car_model::Entity::delete_by_id(id)
                .exec(&self.db)
                .await
                .map_err(CarError::storage)?;
            if res.rows_affected == 0 {
                return Err(CarError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn close(&self) -> Result<(), CarError> {
        if let DatabaseConnection::SqlxPostgresPoolConnection(_) = &self.db {
            self.db.get_postgres_connection_pool().close().await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Status;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn row(id: CarId) -> car_model::Model {
        car_model::Model {
            id,
            brand: "Skoda".into(),
            model: "Octavia".into(),
            price: 20_000,
            status: Status::InStock,
            mileage: 15,
        }
    }

    fn input() -> CarInput {
        CarInput {
            brand: "Skoda".into(),
            model: "Octavia".into(),
            price: 20_000,
            status: Status::InStock,
            mileage: 15,
        }
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult { last_insert_id: 0, rows_affected }
    }

    #[tokio::test]
    async fn list_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1), row(2)]])
            .into_connection();
        let repo = SeaOrmCarRepository::new(db);

        let cars = repo.list(&Context::background()).await.unwrap();
        assert_eq!(cars.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(cars[0].status, Status::InStock);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<car_model::Model>::new()])
            .into_connection();
        let repo = SeaOrmCarRepository::new(db);

        assert_eq!(repo.get(&Context::background(), 9).await, Err(CarError::NotFound(9)));
    }

    #[tokio::test]
    async fn create_returns_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(5)]])
            .into_connection();
        let repo = SeaOrmCarRepository::new(db);

        let car = repo.create(&Context::background(), input()).await.unwrap();
        assert_eq!(car, input().into_car(5));
    }

    #[tokio::test]
    async fn create_rejects_before_touching_store() {
        // No results queued: any statement would fail with a storage error.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = SeaOrmCarRepository::new(db);
        let ctx = Context::background();

        let bad_price = CarInput { price: -1, mileage: -1, ..input() };
        assert_eq!(repo.create(&ctx, bad_price).await, Err(CarError::BadPrice));
        let bad_mileage = CarInput { mileage: -5, ..input() };
        assert_eq!(repo.create(&ctx, bad_mileage).await, Err(CarError::BadMileage));
        assert_eq!(
            repo.update(&ctx, 1, CarInput { price: -1, ..input() }).await,
            Err(CarError::BadPrice)
        );
    }

    #[tokio::test]
    async fn update_checks_affected_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(1), exec(0)])
            .into_connection();
        let repo = SeaOrmCarRepository::new(db);
        let ctx = Context::background();

        let changed = CarInput { model: "Superb".into(), status: Status::Sold, ..input() };
        let car = repo.update(&ctx, 3, changed.clone()).await.unwrap();
        assert_eq!(car, changed.clone().into_car(3));
        assert_eq!(car.model, "Superb");

        assert_eq!(repo.update(&ctx, 4, changed).await, Err(CarError::NotFound(4)));
    }

    #[tokio::test]
    async fn delete_checks_affected_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(1), exec(0)])
            .into_connection();
        let repo = SeaOrmCarRepository::new(db);
        let ctx = Context::background();

        assert_eq!(repo.delete(&ctx, 1).await, Ok(()));
        assert_eq!(repo.delete(&ctx, 1).await, Err(CarError::NotFound(1)));
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_storage_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = SeaOrmCarRepository::new(db);

        let err = repo.list(&Context::background()).await.unwrap_err();
        assert!(matches!(err, CarError::Storage(_)), "{err:?}");
    }

    #[tokio::test]
    async fn expired_context_skips_statement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1)]])
            .into_connection();
        let repo = SeaOrmCarRepository::new(db);
        let ctx = Context::with_deadline(tokio::time::Instant::now() - std::time::Duration::from_millis(1));

        assert_eq!(repo.get(&ctx, 1).await, Err(CarError::DeadlineExceeded));
    }
}
