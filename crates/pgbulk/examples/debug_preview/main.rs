//! Debug mode: preview the batched statements instead of executing them.

use pgbulk::{BulkConfig, BulkWriter, Record, Value};

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

    let config = BulkConfig::new("accounts", ["id", "username", "email"])
        .batch_size(2)
        .key_fields(["id"])
        .debug(true);
    let mut writer = BulkWriter::upsert(&client, config).await?;

    writer
        .queue(
            &Record::new()
                .set("id", 1_i64)
                .set("username", "alice")
                .set("email", "alice@example.com"),
        )
        .await?;
    writer
        .queue(
            &Record::new()
                .set("id", 2_i64)
                .set("username", "bob")
                .set("email", Value::Null),
        )
        .await?;
    writer.queue(
        &Record::new()
            .set("id", 3_i64)
            .set("username", "carol")
            .set("email", "carol@example.com"),
    )
    .await?;

    // The third record is still buffered; preview it without flushing.
    println!("pending: {}", writer.queued_query());

    writer.flush().await?;

    println!("captured queries:");
    for query in writer.debug_queries() {
        println!("  {query}");
    }
    Ok(())
}
