//! Browser native messaging host for the extension worker.
//!
//! Each message is a little-endian `u32` byte length followed by that many
//! bytes of JSON, in both directions. Logs go to stderr; stdout carries only
//! framed replies.

use std::io::{self, Read, Write};

use serde_json::json;
use tracing_subscriber::EnvFilter;
use veriqo_sdk::VeriqoSdk;

/// Browsers refuse host replies larger than this.
const MAX_REPLY: usize = 1024 * 1024;

fn read_frame(input: &mut impl Read) -> io::Result<Option<Vec<u8>>> {
    let mut len = [0u8; 4];
    match input.read_exact(&mut len) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }
    let mut buf = vec![0u8; u32::from_le_bytes(len) as usize];
    input.read_exact(&mut buf)?;
    Ok(Some(buf))
}

fn write_frame(output: &mut impl Write, payload: &[u8]) -> io::Result<()> {
    output.write_all(&(payload.len() as u32).to_le_bytes())?;
    output.write_all(payload)?;
    output.flush()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let sdk = VeriqoSdk::builder()
        .build()
        .expect("Failed to initialize Veriqo SDK");
    let worker = sdk
        .extension_worker()
        .expect("Failed to open extension storage");
    tracing::info!(store = ?worker.store().path(), "extension host ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    while let Some(frame) = read_frame(&mut input).expect("stdin closed unexpectedly") {
        let raw = String::from_utf8_lossy(&frame);
        let reply = match worker.dispatch_json(&raw) {
            Ok(reply) => reply,
            Err(e) => json!({ "success": false, "error": e.user_message() }).to_string(),
        };
        if reply.len() > MAX_REPLY {
            tracing::warn!(bytes = reply.len(), "reply too large for the browser; dropped");
            let err = json!({ "success": false, "error": "Response too large" }).to_string();
            write_frame(&mut output, err.as_bytes()).expect("stdout closed");
            continue;
        }
        write_frame(&mut output, reply.as_bytes()).expect("stdout closed");
    }
}
