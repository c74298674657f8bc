use std::sync::Arc;

use entity::employees;
use sea_orm::{ActiveModelTrait, ActiveValue, DbErr, EntityTrait, Value};

use crate::{DbError, DbPool, DbResult};

/// Fields required to insert a new employee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub salary: i32,
    pub age: i32,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub salary: Option<i32>,
    pub age: Option<i32>,
}

/// Thin facade over the `employees` table. Every method is one storage call.
#[derive(Clone)]
pub struct EmployeeStore {
    db: Arc<DbPool>,
}

impl EmployeeStore {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &DbPool {
        self.db.as_ref()
    }

    pub async fn create(&self, new: NewEmployee) -> DbResult<employees::Model> {
        let model = employees::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(new.name),
            salary: ActiveValue::Set(new.salary),
            age: ActiveValue::Set(new.age),
        };
        Ok(model.insert(self.pool()).await?)
    }

    pub async fn find_all(&self) -> DbResult<Vec<employees::Model>> {
        Ok(employees::Entity::find().all(self.pool()).await?)
    }

    pub async fn find_by_id(&self, id: i32) -> DbResult<Option<employees::Model>> {
        Ok(employees::Entity::find_by_id(id).one(self.pool()).await?)
    }

    /// Apply `changes` to employee `id`, returning the stored row afterwards.
    pub async fn update(&self, id: i32, changes: EmployeeChanges) -> DbResult<employees::Model> {
        let model = employees::ActiveModel {
            id: ActiveValue::Unchanged(id),
            name: set_if_present(changes.name),
            salary: set_if_present(changes.salary),
            age: set_if_present(changes.age),
        };
        model.update(self.pool()).await.map_err(missing_as_not_found)
    }

    pub async fn delete(&self, id: i32) -> DbResult<()> {
        let result = employees::Entity::delete_by_id(id)
            .exec(self.pool())
            .await?;
        if result.rows_affected == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}

fn set_if_present<V>(value: Option<V>) -> ActiveValue<V>
where
    V: Into<Value>,
{
    match value {
        Some(value) => ActiveValue::Set(value),
        None => ActiveValue::NotSet,
    }
}

// An update against a missing row surfaces as RecordNotUpdated, or as
// RecordNotFound when there was nothing to set and the row is re-read.
fn missing_as_not_found(err: DbErr) -> DbError {
    match err {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => DbError::NotFound,
        other => DbError::Db(other),
    }
}
