use anyhow::{Context, Result};
use async_trait::async_trait;
use entity::employees;
use platform_db::DbPool;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseBackend, EntityTrait, Set, Statement,
};
use uuid::Uuid;

/// Persistence seam for employee records. Each call maps to a single
/// atomic statement; there are no multi-record transaction semantics.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<employees::Model>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<employees::Model>>;
    /// Persists the record, assigning a fresh id when the incoming id is
    /// nil; an existing id overwrites that row.
    async fn save(&self, employee: employees::Model) -> Result<employees::Model>;
    async fn delete(&self, employee: &employees::Model) -> Result<()>;
    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<()>;
}

/// Sea-orm backed store.
pub struct OrmEmployeeStore {
    pool: DbPool,
}

impl OrmEmployeeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for OrmEmployeeStore {
    async fn find_all(&self) -> Result<Vec<employees::Model>> {
        employees::Entity::find()
            .all(&self.pool)
            .await
            .context("failed to list employees")
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<employees::Model>> {
        employees::Entity::find_by_id(id)
            .one(&self.pool)
            .await
            .context("failed to load employee")
    }

    async fn save(&self, employee: employees::Model) -> Result<employees::Model> {
        if employee.id.is_nil() {
            let active = employees::ActiveModel {
                id: Set(Uuid::new_v4()),
                first_name: Set(employee.first_name),
                last_name: Set(employee.last_name),
                email: Set(employee.email),
                department: Set(employee.department),
                salary: Set(employee.salary),
            };
            return active.insert(&self.pool).await.context("failed to insert employee");
        }

        let active = employees::ActiveModel {
            id: Set(employee.id),
            first_name: Set(employee.first_name),
            last_name: Set(employee.last_name),
            email: Set(employee.email),
            department: Set(employee.department),
            salary: Set(employee.salary),
        };
        active.update(&self.pool).await.context("failed to update employee")
    }

    async fn delete(&self, employee: &employees::Model) -> Result<()> {
        employees::Entity::delete_by_id(employee.id)
            .exec(&self.pool)
            .await
            .context("failed to delete employee")?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.pool
            .execute(Statement::from_string(
                DatabaseBackend::Postgres,
                "SELECT 1".to_string(),
            ))
            .await
            .context("database ping failed")?;
        Ok(())
    }
}
