//! Bulk insert: load many rows with few round trips.
//!
//! ```bash
//! createdb pgbulk_demo
//! psql pgbulk_demo -c "CREATE TABLE accounts (id BIGINT PRIMARY KEY, username TEXT, email TEXT)"
//! cargo run --example bulk_insert
//! ```

use pgbulk::{BulkConfig, BulkWriter, Record};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (client, connection) = tokio_postgres::connect(
        "host=localhost user=postgres dbname=pgbulk_demo",
        tokio_postgres::NoTls,
    )
    .await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("connection error: {e}");
        }
    });

    let config = BulkConfig::new("accounts", ["id", "username", "email"]).batch_size(500);
    let mut writer = BulkWriter::insert(&client, config).await?;

    for i in 0..2_000_i64 {
        let completed_batch = writer
            .queue(
                &Record::new()
                    .set("id", i)
                    .set("username", format!("user{i}"))
                    .set("email", format!("user{i}@example.com")),
            )
            .await?;
        if completed_batch {
            println!("{} rows written so far", writer.flushed_operations());
        }
    }
    writer.flush().await?;

    println!(
        "queued {} rows, {} affected",
        writer.total_operations(),
        writer.affected_rows()
    );
    Ok(())
}
