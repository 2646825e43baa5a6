//! Persistent person store implementation using PostgreSQL.

use crate::domain::{Person, PersonChanges};
use crate::storage::{PersonStore, StoreError, UnitOfWork};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

const PERSON_COLUMNS: &str = "id, name, age, email, phone";

/// A person store that uses a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresPersonStore {
    pool: PgPool,
}

impl PostgresPersonStore {
    /// Connects and makes sure the `persons` table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: PgPool) -> anyhow::Result<Self> {
        let store = Self { pool };
        store.ensure_table().await?;
        Ok(store)
    }

    async fn ensure_table(&self) -> anyhow::Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS persons (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                age INTEGER NOT NULL,
                email TEXT NOT NULL UNIQUE,
                phone TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS ix_persons_name ON persons (name)")
            .execute(&self.pool)
            .await?;

        tracing::debug!("persons table ready");
        Ok(())
    }

    /// Deletes every row. Used by tests to start from a clean table.
    pub async fn clear(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM persons").execute(&self.pool).await?;
        Ok(())
    }
}

fn map_write_error(err: sqlx::Error, email: Option<&str>) -> StoreError {
    if let (sqlx::Error::Database(db), Some(email)) = (&err, email) {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::DuplicateEmail(email.to_string());
        }
    }
    StoreError::from(err)
}

#[async_trait]
impl PersonStore for PostgresPersonStore {
    async fn insert(&self, person: Person) -> Result<Person, StoreError> {
        let mut uow = UnitOfWork::begin(&self.pool, "insert").await?;
        let sql = format!(
            "INSERT INTO persons ({cols}) VALUES ($1, $2, $3, $4, $5) RETURNING {cols}",
            cols = PERSON_COLUMNS
        );
        let stored = sqlx::query_as::<_, Person>(&sql)
            .bind(person.id)
            .bind(&person.name)
            .bind(person.age)
            .bind(&person.email)
            .bind(&person.phone)
            .fetch_one(uow.conn())
            .await
            .map_err(|e| map_write_error(e, Some(person.email.as_str())))?;
        uow.commit().await?;
        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<Person>, StoreError> {
        let mut uow = UnitOfWork::begin(&self.pool, "find_all").await?;
        let sql = format!("SELECT {} FROM persons", PERSON_COLUMNS);
        let persons = sqlx::query_as::<_, Person>(&sql)
            .fetch_all(uow.conn())
            .await?;
        uow.commit().await?;
        Ok(persons)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>, StoreError> {
        let mut uow = UnitOfWork::begin(&self.pool, "find_by_id").await?;
        let sql = format!("SELECT {} FROM persons WHERE id = $1", PERSON_COLUMNS);
        let person = sqlx::query_as::<_, Person>(&sql)
            .bind(id)
            .fetch_optional(uow.conn())
            .await?;
        uow.commit().await?;
        Ok(person)
    }

    async fn apply_update(
        &self,
        id: Uuid,
        changes: &PersonChanges,
    ) -> Result<Option<Person>, StoreError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE persons SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(name) = &changes.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(age) = changes.age {
                set.push("age = ").push_bind_unseparated(age);
            }
            if let Some(email) = &changes.email {
                set.push("email = ").push_bind_unseparated(email.clone());
            }
            if let Some(phone) = &changes.phone {
                set.push("phone = ").push_bind_unseparated(phone.clone());
            }
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(PERSON_COLUMNS);

        let mut uow = UnitOfWork::begin(&self.pool, "apply_update").await?;
        let updated = qb
            .build_query_as::<Person>()
            .fetch_optional(uow.conn())
            .await
            .map_err(|e| map_write_error(e, changes.email.as_deref()))?;

        match updated {
            Some(person) => {
                uow.commit().await?;
                Ok(Some(person))
            }
            None => {
                uow.rollback().await?;
                Ok(None)
            }
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut uow = UnitOfWork::begin(&self.pool, "remove").await?;
        let result = sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id)
            .execute(uow.conn())
            .await?;
        if result.rows_affected() == 0 {
            uow.rollback().await?;
            return Ok(false);
        }
        uow.commit().await?;
        Ok(true)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
