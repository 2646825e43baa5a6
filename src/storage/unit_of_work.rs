//! Scoped transactional handle used by the PostgreSQL store.
//!
//! A [`UnitOfWork`] owns one pooled connection inside a transaction. Calling
//! [`UnitOfWork::commit`] makes the work durable; any other exit path (an `?` on a failed
//! query, an early return, a panic unwinding through the caller) drops the inner
//! `sqlx::Transaction`, which rolls back and hands the connection back to the pool.

use sqlx::{PgConnection, PgPool, Postgres, Transaction};

pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
    label: &'static str,
}

impl UnitOfWork {
    pub async fn begin(pool: &PgPool, label: &'static str) -> Result<Self, sqlx::Error> {
        let tx = pool.begin().await?;
        tracing::trace!(unit_of_work = label, "begin");
        Ok(Self { tx, label })
    }

    /// Connection to run statements on.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await?;
        tracing::trace!(unit_of_work = self.label, "commit");
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), sqlx::Error> {
        self.tx.rollback().await?;
        tracing::debug!(unit_of_work = self.label, "rollback");
        Ok(())
    }
}
