use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::handlers::Dispatcher;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Maximum bytes per JSON-RPC message (1 MiB).
const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Meetup API server speaking newline-delimited JSON-RPC 2.0.
pub struct MeetupServer {
    dispatcher: Dispatcher,
}

impl MeetupServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Serve stdin/stdout until stdin closes.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let reader = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.serve(reader, &mut stdout).await
    }

    /// Serve one request per line from `reader`, writing responses to `writer`.
    pub async fn serve<R, W>(&self, mut reader: R, writer: &mut W) -> Result<(), Box<dyn std::error::Error>>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut raw = Vec::new();

        loop {
            raw.clear();
            // Never buffer more than one byte past the limit.
            let n = (&mut reader)
                .take(MAX_MESSAGE_BYTES as u64 + 1)
                .read_until(b'\n', &mut raw)
                .await?;
            if n == 0 {
                tracing::debug!("input closed, shutting down");
                break;
            }

            if n > MAX_MESSAGE_BYTES {
                if raw.last() != Some(&b'\n') {
                    skip_line(&mut reader).await?;
                }
                tracing::warn!(limit = MAX_MESSAGE_BYTES, "message too large");
                write_response(writer, &JsonRpcResponse::error(None, JsonRpcError::parse_error())).await?;
                continue;
            }

            let trimmed = match std::str::from_utf8(&raw) {
                Ok(s) => s.trim(),
                Err(_) => {
                    write_response(writer, &JsonRpcResponse::error(None, JsonRpcError::parse_error())).await?;
                    continue;
                }
            };

            if trimmed.is_empty() {
                continue;
            }

            let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(error = %e, "parse error");
                    write_response(writer, &JsonRpcResponse::error(None, JsonRpcError::parse_error())).await?;
                    continue;
                }
            };

            // Validate jsonrpc version
            if req.jsonrpc != "2.0" {
                write_response(
                    writer,
                    &JsonRpcResponse::error(req.response_id(), JsonRpcError::invalid_request()),
                )
                .await?;
                continue;
            }

            if let Some(resp) = self.dispatcher.dispatch(&req).await {
                write_response(writer, &resp).await?;
            }
        }

        Ok(())
    }
}

/// Discard input up to and including the next newline (or EOF).
async fn skip_line<R>(reader: &mut R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let (used, found) = {
            let buf = reader.fill_buf().await?;
            if buf.is_empty() {
                return Ok(());
            }
            match buf.iter().position(|b| *b == b'\n') {
                Some(pos) => (pos + 1, true),
                None => (buf.len(), false),
            }
        };
        reader.consume(used);
        if found {
            return Ok(());
        }
    }
}

async fn write_response<W>(writer: &mut W, resp: &JsonRpcResponse) -> Result<(), Box<dyn std::error::Error>>
where
    W: AsyncWrite + Unpin,
{
    let out = serde_json::to_string(resp)?;
    writer.write_all(out.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
