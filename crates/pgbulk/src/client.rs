//! Minimal driver capability the bulk writer depends on.
//!
//! The writer needs exactly three things from a connection: prepare a
//! statement from SQL text, execute a prepared statement with positional
//! parameters, and execute one-shot SQL with positional parameters — each
//! reporting the affected-row count. Everything else (pooling, transactions,
//! retries, cancellation) belongs to the caller and the driver.

use crate::error::{BulkError, BulkResult};
use tokio_postgres::Statement;
use tokio_postgres::types::ToSql;

/// A connection-like handle that can prepare and execute statements.
///
/// Implemented for `tokio_postgres::Client` and `Transaction`, for the
/// deadpool-postgres wrappers behind the `pool` feature, and for `&C`.
/// The prepared-statement handle is an associated type so callers can
/// substitute their own adapter.
pub trait BulkClient: Send + Sync {
    /// Prepared statement handle produced by [`BulkClient::prepare`].
    type Statement: Send + Sync;

    /// Prepare a statement from SQL text.
    fn prepare(
        &self,
        sql: &str,
    ) -> impl std::future::Future<Output = BulkResult<Self::Statement>> + Send;

    /// Execute a prepared statement, returning the affected-row count.
    fn execute_prepared(
        &self,
        statement: &Self::Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BulkResult<u64>> + Send;

    /// Execute one-shot SQL text, returning the affected-row count.
    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BulkResult<u64>> + Send;
}

impl BulkClient for tokio_postgres::Client {
    type Statement = Statement;

    async fn prepare(&self, sql: &str) -> BulkResult<Statement> {
        tokio_postgres::Client::prepare(self, sql)
            .await
            .map_err(BulkError::statement)
    }

    async fn execute_prepared(
        &self,
        statement: &Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> BulkResult<u64> {
        tokio_postgres::Client::execute(self, statement, params)
            .await
            .map_err(BulkError::execution)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BulkResult<u64> {
        tokio_postgres::Client::execute(self, sql, params)
            .await
            .map_err(BulkError::execution)
    }
}

impl BulkClient for tokio_postgres::Transaction<'_> {
    type Statement = Statement;

    async fn prepare(&self, sql: &str) -> BulkResult<Statement> {
        tokio_postgres::Transaction::prepare(self, sql)
            .await
            .map_err(BulkError::statement)
    }

    async fn execute_prepared(
        &self,
        statement: &Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> BulkResult<u64> {
        tokio_postgres::Transaction::execute(self, statement, params)
            .await
            .map_err(BulkError::execution)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BulkResult<u64> {
        tokio_postgres::Transaction::execute(self, sql, params)
            .await
            .map_err(BulkError::execution)
    }
}

impl<C: BulkClient> BulkClient for &C {
    type Statement = C::Statement;

    fn prepare(
        &self,
        sql: &str,
    ) -> impl std::future::Future<Output = BulkResult<Self::Statement>> + Send {
        (*self).prepare(sql)
    }

    fn execute_prepared(
        &self,
        statement: &Self::Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BulkResult<u64>> + Send {
        (*self).execute_prepared(statement, params)
    }

    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BulkResult<u64>> + Send {
        (*self).execute(sql, params)
    }
}

// ===== deadpool-postgres support =====

#[cfg(feature = "pool")]
impl BulkClient for deadpool_postgres::ClientWrapper {
    type Statement = Statement;

    async fn prepare(&self, sql: &str) -> BulkResult<Statement> {
        BulkClient::prepare(&**self, sql).await
    }

    async fn execute_prepared(
        &self,
        statement: &Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> BulkResult<u64> {
        BulkClient::execute_prepared(&**self, statement, params).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BulkResult<u64> {
        BulkClient::execute(&**self, sql, params).await
    }
}

#[cfg(feature = "pool")]
impl BulkClient for deadpool_postgres::Client {
    type Statement = Statement;

    async fn prepare(&self, sql: &str) -> BulkResult<Statement> {
        BulkClient::prepare(&**self, sql).await
    }

    async fn execute_prepared(
        &self,
        statement: &Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> BulkResult<u64> {
        BulkClient::execute_prepared(&**self, statement, params).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BulkResult<u64> {
        BulkClient::execute(&**self, sql, params).await
    }
}

#[cfg(feature = "pool")]
impl BulkClient for deadpool_postgres::Transaction<'_> {
    type Statement = Statement;

    async fn prepare(&self, sql: &str) -> BulkResult<Statement> {
        BulkClient::prepare(&**self, sql).await
    }

    async fn execute_prepared(
        &self,
        statement: &Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> BulkResult<u64> {
        BulkClient::execute_prepared(&**self, statement, params).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BulkResult<u64> {
        BulkClient::execute(&**self, sql, params).await
    }
}
