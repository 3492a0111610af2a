//! # pgbulk
//!
//! Batched multi-row writes for PostgreSQL.
//!
//! pgbulk buffers row-level insert, upsert, and delete operations and turns
//! them into fewer, larger SQL statements, trading memory for round-trip
//! reduction.
//!
//! ## Features
//!
//! - **One statement per batch**: a full batch executes through a statement
//!   prepared once at construction; partial flushes build SQL sized exactly
//!   to the pending count
//! - **Three statement shapes**: multi-row `INSERT`, `INSERT ... ON CONFLICT
//!   DO UPDATE` overwriting every tracked field, and row-value `DELETE ...
//!   WHERE (...) IN (...)`
//! - **Debug mode**: batches render into an in-memory query log with values
//!   substituted as literals instead of executing
//! - **Driver-agnostic core**: the writer only needs [`BulkClient`]
//!   (prepare/execute/affected-rows); implemented for `tokio_postgres`
//!   clients, transactions, and pooled deadpool-postgres handles
//!
//! ## Example
//!
//! ```ignore
//! use pgbulk::{BulkConfig, BulkWriter, Record};
//!
//! let config = BulkConfig::new("accounts", ["id", "name"]).batch_size(500);
//! let mut writer = BulkWriter::insert(&client, config).await?;
//!
//! for (id, name) in rows {
//!     let completed_batch = writer
//!         .queue(&Record::new().set("id", id).set("name", name))
//!         .await?;
//!     if completed_batch {
//!         println!("{} rows written", writer.flushed_operations());
//!     }
//! }
//! writer.flush().await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod record;
pub mod render;
pub mod statement;
pub mod value;
pub mod writer;

mod ident;

pub use client::BulkClient;
pub use config::{BulkConfig, DEFAULT_BATCH_SIZE};
pub use error::{BulkError, BulkResult, DriverError};
pub use record::Record;
pub use statement::{DeleteStatement, InsertStatement, StatementBuilder, UpsertStatement};
pub use value::Value;
pub use writer::BulkWriter;
