use serde_json::Value;
use sql_relay::RelayError;
use sql_relay::protocol::Response;
use sql_relay::relay::Relay;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Pump request lines from `input` into the relay and response lines to `output`.
///
/// Returns once `input` hits EOF and every response to the lines read so far is written.
pub(crate) async fn run<R, W>(relay: Relay, input: R, mut output: W) -> Result<(), RelayError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (sender, mut responses) = relay.into_parts();
    let mut lines = input.split(b'\n');
    let mut input_open = true;
    let mut posted: u64 = 0;

    loop {
        tokio::select! {
            line = lines.next_segment(), if input_open => {
                match line.map_err(io_error)? {
                    Some(line) if line.trim_ascii().is_empty() => {}
                    Some(line) => match serde_json::from_slice::<Value>(&line) {
                        Ok(message) => {
                            sender.post(message)?;
                            posted += 1;
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "unparseable request line");
                            let rejected = Response::error(Value::Null, &RelayError::from(err));
                            write_response(&mut output, &rejected).await?;
                        }
                    },
                    None => {
                        tracing::debug!(posted, "input closed");
                        input_open = false;
                    }
                }
            }
            response = responses.recv() => {
                let Some(response) = response else { break };
                write_response(&mut output, &response).await?;
                posted = posted.saturating_sub(1);
            }
        }

        if !input_open && posted == 0 {
            break;
        }
    }

    drop(sender);
    output.flush().await.map_err(io_error)?;
    Ok(())
}

async fn write_response<W>(output: &mut W, response: &Response) -> Result<(), RelayError>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(response)?;
    line.push(b'\n');
    output.write_all(&line).await.map_err(io_error)?;
    output.flush().await.map_err(io_error)
}

fn io_error(err: std::io::Error) -> RelayError {
    RelayError::ConnectionError(format!("host I/O error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn relays_lines_until_eof() {
        let relay = Relay::sqlite_builder().build().unwrap();
        let input = concat!(
            "{\"id\":1,\"method\":\"init\"}\n",
            "\n",
            "not json\n",
            "{\"id\":2,\"method\":\"execute\",\"sql\":\"CREATE TABLE t(x INT); INSERT INTO t VALUES (5)\"}\n",
            "{\"id\":3,\"method\":\"query\",\"sql\":\"SELECT x FROM t\"}\n",
        );
        let mut output = Vec::new();
        run(relay, input.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.contains(&json!({"id": 1, "result": true})));
        assert!(lines.contains(&json!({"id": 2, "result": true})));
        assert!(lines.contains(&json!({"id": 3, "result": [{"columns": ["x"], "values": [[5]]}]})));
        assert!(lines.iter().any(|line| line["id"].is_null() && line["error"].is_string()));
    }

    #[tokio::test]
    async fn invalid_utf8_line_gets_an_error_and_the_rest_still_run() {
        let relay = Relay::sqlite_builder().build().unwrap();
        let mut input = Vec::new();
        input.extend_from_slice(b"{\"id\":1,\"method\":\"init\"}\n");
        input.extend_from_slice(b"\xff\xfe garbage\n");
        input.extend_from_slice(b"{\"id\":2,\"method\":\"query\",\"sql\":\"SELECT 7 AS n\"}\r\n");
        let mut output = Vec::new();
        run(relay, input.as_slice(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.contains(&json!({"id": 1, "result": true})));
        assert!(lines.contains(&json!({"id": 2, "result": [{"columns": ["n"], "values": [[7]]}]})));
        let rejected: Vec<&Value> = lines.iter().filter(|line| line["id"].is_null()).collect();
        assert_eq!(rejected.len(), 1);
        assert!(!rejected[0]["error"].as_str().unwrap().is_empty());
    }
}
