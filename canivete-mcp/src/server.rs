//! Line-delimited stdio loop

use std::io::{self, BufRead, Write};
use crate::config::ServerConfig;
use crate::handlers::handle_request;
use crate::protocol::{McpError, McpRequest, McpResponse, PARSE_ERROR};

/// Read one JSON-RPC message per line until EOF, writing one response line
/// per request. Returns when the input closes or the output fails.
pub fn serve<R: BufRead, W: Write>(mut reader: R, mut writer: W, config: &ServerConfig) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        // Undecodable bytes are a bad message, not a broken channel
        let line = match std::str::from_utf8(&buf) {
            Ok(text) => text.trim(),
            Err(e) => {
                tracing::warn!(error = %e, "request is not valid UTF-8");
                let response = McpResponse::failure(None, McpError::new(PARSE_ERROR, format!("Parse error: {}", e)));
                write_response(&mut writer, &response)?;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        tracing::debug!(bytes = line.len(), "received");

        let request: McpRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "error parsing request");
                let response = McpResponse::failure(None, McpError::new(PARSE_ERROR, format!("Parse error: {}", e)));
                write_response(&mut writer, &response)?;
                continue;
            }
        };

        let response = handle_request(config, &request);

        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification processed (no response)");
            continue;
        }

        write_response(&mut writer, &response)?;
        tracing::debug!(method = %request.method, "sent response");
    }

    tracing::info!("client disconnected (EOF)");
    Ok(())
}

fn write_response<W: Write>(writer: &mut W, response: &McpResponse) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, response)?;
    writer.write_all(b"\n")?;
    writer.flush()
}
