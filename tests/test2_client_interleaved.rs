#![cfg(feature = "sqlite")]

use std::sync::Arc;

use sql_relay::prelude::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_are_routed_by_id() -> Result<(), RelayError> {
    let client = Arc::new(RelayClient::new(Relay::sqlite_builder().build()?)?);
    client.init().await?;
    client.execute("CREATE TABLE t(k INT PRIMARY KEY, v TEXT)").await?;

    let mut tasks = Vec::new();
    for i in 0..32_i64 {
        let client = Arc::clone(&client);
        tasks.push(tokio::spawn(async move {
            client
                .execute(format!("INSERT INTO t VALUES ({i}, 'v{i}')"))
                .await?;
            let rows = client
                .query(format!("SELECT k, v FROM t WHERE k = {i}"))
                .await?;
            Ok::<_, RelayError>((i, rows))
        }));
    }

    for task in tasks {
        let (i, rows) = task
            .await
            .map_err(|err| RelayError::ExecutionError(err.to_string()))??;
        let first = rows.first().ok_or(RelayError::ExecutionError("no rows".into()))?;
        assert_eq!(first.get(0, "k"), Some(&CellValue::Int(i)));
        assert_eq!(first.get(0, "v"), Some(&CellValue::Text(format!("v{i}"))));
    }

    let count = client.query("SELECT count(*) FROM t").await?;
    assert_eq!(count.statements[0].values, vec![vec![CellValue::Int(32)]]);
    Ok(())
}

#[tokio::test]
async fn client_surfaces_engine_errors() -> Result<(), RelayError> {
    let client = RelayClient::new(Relay::sqlite_builder().build()?)?;
    client.init().await?;

    match client.query("SELECT * FROM nosuchtable").await {
        Err(RelayError::Engine(message)) => assert!(message.contains("nosuchtable")),
        other => panic!("expected engine error, got {other:?}"),
    }

    let empty = client.query("SELECT 1 WHERE 0").await?;
    assert!(empty.is_empty());
    Ok(())
}

#[tokio::test]
async fn client_init_sql_is_applied() -> Result<(), RelayError> {
    let relay = Relay::sqlite_builder()
        .init_sql("PRAGMA foreign_keys = ON")
        .build()?;
    let client = RelayClient::new(relay)?;
    client.init().await?;

    client
        .execute(
            "CREATE TABLE parent(id INTEGER PRIMARY KEY);
             CREATE TABLE child(pid INTEGER REFERENCES parent(id));",
        )
        .await?;
    let err = client
        .execute("INSERT INTO child VALUES (42)")
        .await
        .expect_err("foreign key violation should fail");
    assert!(err.to_string().to_lowercase().contains("foreign key"));
    Ok(())
}
