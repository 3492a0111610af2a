//! The buffering core: accumulate records, dispatch full batches.
//!
//! A [`BulkWriter`] queues operation records into an in-memory buffer and,
//! whenever the buffer reaches the configured batch size, executes one
//! multi-row statement covering the whole batch through its prepared
//! full-batch statement. [`BulkWriter::flush`] forces a partial batch out
//! with a statement sized exactly to the pending count.
//!
//! Callers must `flush()` once after the last `queue()`, or pending records
//! are silently dropped when the writer goes away.

use crate::client::BulkClient;
use crate::config::BulkConfig;
use crate::error::{BulkError, BulkResult};
use crate::record::Record;
use crate::render;
use crate::statement::{DeleteStatement, InsertStatement, StatementBuilder, UpsertStatement};
use crate::value::Value;
use tokio_postgres::types::ToSql;

/// Where dispatched batches go: the database, or an in-memory log.
///
/// Chosen once at construction; `queue` and `flush` dispatch through it
/// uniformly.
enum Sink {
    /// Execute batches against the database.
    Execute,
    /// Render batches into a query log instead of executing (debug mode).
    Capture { queries: Vec<String> },
}

/// Batches row-level write operations into multi-row statements.
///
/// # Example
/// ```ignore
/// use pgbulk::{BulkConfig, BulkWriter, Record};
///
/// let config = BulkConfig::new("accounts", ["id", "name"]).batch_size(500);
/// let mut writer = BulkWriter::insert(&client, config).await?;
///
/// for account in accounts {
///     writer.queue(&Record::new().set("id", account.id).set("name", account.name)).await?;
/// }
/// writer.flush().await?;
/// ```
pub struct BulkWriter<'a, C: BulkClient> {
    client: &'a C,
    builder: Box<dyn StatementBuilder>,
    fields: Vec<String>,
    batch_size: usize,
    /// SQL for a full-size batch, kept alongside its prepared handle.
    full_sql: String,
    statement: C::Statement,
    sink: Sink,
    /// Buffered values, record-major, field-minor.
    buffer: Vec<Value>,
    total_operations: u64,
    affected_rows: u64,
}

impl<'a, C: BulkClient> std::fmt::Debug for BulkWriter<'a, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkWriter")
            .field("fields", &self.fields)
            .field("batch_size", &self.batch_size)
            .field("full_sql", &self.full_sql)
            .field("total_operations", &self.total_operations)
            .field("affected_rows", &self.affected_rows)
            .finish_non_exhaustive()
    }
}

impl<'a, C: BulkClient> BulkWriter<'a, C> {
    /// Create a writer that batches plain inserts.
    pub async fn insert(client: &'a C, config: BulkConfig) -> BulkResult<Self> {
        config.validate()?;
        let builder = InsertStatement::new(config.table.as_str(), config.fields.clone())?;
        Self::with_builder(client, config, Box::new(builder)).await
    }

    /// Create a writer that batches upserts. Requires
    /// [`BulkConfig::key_fields`] naming the conflict target.
    pub async fn upsert(client: &'a C, config: BulkConfig) -> BulkResult<Self> {
        config.validate()?;
        let builder = UpsertStatement::new(
            config.table.as_str(),
            config.fields.clone(),
            config.key_fields.clone(),
        )?;
        Self::with_builder(client, config, Box::new(builder)).await
    }

    /// Create a writer that batches deletes; the configured fields are the
    /// key fields matched against each buffered record.
    pub async fn delete(client: &'a C, config: BulkConfig) -> BulkResult<Self> {
        config.validate()?;
        let builder = DeleteStatement::new(config.table.as_str(), config.fields.clone())?;
        Self::with_builder(client, config, Box::new(builder)).await
    }

    /// Create a writer around any [`StatementBuilder`].
    pub async fn with_builder(
        client: &'a C,
        config: BulkConfig,
        builder: Box<dyn StatementBuilder>,
    ) -> BulkResult<Self> {
        config.validate()?;
        // The full-batch statement is prepared eagerly and reused for every
        // full batch; only partial flushes build fresh statements.
        let full_sql = builder.build(config.batch_size);
        let statement = client.prepare(&full_sql).await?;
        let sink = if config.debug {
            Sink::Capture {
                queries: Vec::new(),
            }
        } else {
            Sink::Execute
        };
        Ok(Self {
            client,
            builder,
            fields: config.fields,
            batch_size: config.batch_size,
            full_sql,
            statement,
            sink,
            buffer: Vec::new(),
            total_operations: 0,
            affected_rows: 0,
        })
    }

    /// Queue one record. Returns `true` when this call completed a full
    /// batch (which was dispatched and cleared), `false` otherwise.
    ///
    /// Fails with [`BulkError::MissingField`] if any configured field is
    /// absent from the record; presence is checked before any state changes,
    /// so a rejected record is a strict no-op. A present-but-NULL value is
    /// valid. Extra fields are ignored.
    pub async fn queue(&mut self, record: &Record) -> BulkResult<bool> {
        let mut row = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            match record.get(field) {
                Some(value) => row.push(value.clone()),
                None => return Err(BulkError::missing_field(field.as_str())),
            }
        }
        self.buffer.append(&mut row);
        self.total_operations += 1;

        if self.pending_records() == self.batch_size {
            self.dispatch_full().await?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Force out the pending partial batch. No-op returning 0 on an empty
    /// buffer; otherwise returns the affected-row count of this flush.
    ///
    /// Must be called once after the last [`queue`](Self::queue), or pending
    /// records are lost.
    pub async fn flush(&mut self) -> BulkResult<u64> {
        let pending = self.pending_records();
        if pending == 0 {
            return Ok(0);
        }
        // Sized to the pending count, so the cached full-batch statement
        // does not apply here.
        let sql = self.builder.build(pending);
        let affected = match &mut self.sink {
            Sink::Capture { queries } => {
                queries.push(render::render(&sql, &self.buffer));
                0
            }
            Sink::Execute => {
                let params = params_refs(&self.buffer);
                let affected = self.client.execute(&sql, &params).await?;
                self.affected_rows += affected;
                tracing::debug!(rows = pending, affected, "flushed partial batch");
                affected
            }
        };
        self.buffer.clear();
        Ok(affected)
    }

    /// Clear buffer, counters, and the debug log. Configuration and the
    /// prepared full-batch statement are untouched.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.total_operations = 0;
        self.affected_rows = 0;
        if let Sink::Capture { queries } = &mut self.sink {
            queries.clear();
        }
    }

    /// Total records ever queued (reset only by [`reset`](Self::reset)).
    pub fn total_operations(&self) -> u64 {
        self.total_operations
    }

    /// Records already written out in dispatched batches.
    pub fn flushed_operations(&self) -> u64 {
        self.total_operations - self.pending_operations()
    }

    /// Records currently buffered and awaiting dispatch.
    pub fn pending_operations(&self) -> u64 {
        self.pending_records() as u64
    }

    /// Affected-row total accumulated from executed batches.
    pub fn affected_rows(&self) -> u64 {
        self.affected_rows
    }

    /// Configured batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Rendered queries logged in debug mode, one per dispatched batch.
    /// Empty outside debug mode.
    pub fn debug_queries(&self) -> &[String] {
        match &self.sink {
            Sink::Capture { queries } => queries,
            Sink::Execute => &[],
        }
    }

    /// Render the statement the pending buffer would execute, with values
    /// substituted as literals. Returns an empty string when nothing is
    /// pending. Does not consume or mutate the buffer.
    pub fn queued_query(&self) -> String {
        let pending = self.pending_records();
        if pending == 0 {
            return String::new();
        }
        render::render(&self.builder.build(pending), &self.buffer)
    }

    fn pending_records(&self) -> usize {
        self.buffer.len() / self.fields.len()
    }

    /// Dispatch the full buffer through the prepared full-batch statement.
    ///
    /// On error the buffer is left intact and no counters advance, so the
    /// failed batch stays pending for a caller-driven retry.
    async fn dispatch_full(&mut self) -> BulkResult<()> {
        match &mut self.sink {
            Sink::Capture { queries } => {
                queries.push(render::render(&self.full_sql, &self.buffer));
            }
            Sink::Execute => {
                let params = params_refs(&self.buffer);
                let affected = self
                    .client
                    .execute_prepared(&self.statement, &params)
                    .await?;
                self.affected_rows += affected;
                tracing::debug!(rows = self.batch_size, affected, "executed full batch");
            }
        }
        self.buffer.clear();
        Ok(())
    }
}

/// Parameter refs compatible with `tokio-postgres`.
fn params_refs(values: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
    values
        .iter()
        .map(|v| v as &(dyn ToSql + Sync))
        .collect()
}
