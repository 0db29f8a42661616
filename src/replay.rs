//! Replay Reporter Module
//!
//! Reconstructs the recorded call history of an operation as an ordered,
//! human-readable transcript.

use std::fmt::Write as _;

use crate::client::KvClient;
use crate::error::Result;
use crate::trace::{input_key, output_key, CallRecord, ResultRecord};

// == Replay ==
/// Renders the call history of `op_name` as a transcript.
///
/// The first line reports the total call count (the length of the inputs
/// log); each following line renders one input/output pair as
/// `"<name>(*<args>) -> <output>"`, in call order.
///
/// The reporter never fails on a malformed log: if the two logs differ in
/// length only matched pairs are rendered, and an entry that does not decode
/// as a history record is rendered as lossy raw text.
pub async fn replay(kv: &dyn KvClient, op_name: &str) -> Result<String> {
    let inputs = kv.lrange(&input_key(op_name), 0, -1).await?;
    let outputs = kv.lrange(&output_key(op_name), 0, -1).await?;

    let mut transcript = format!("{} was called {} times:\n", op_name, inputs.len());

    for (input, output) in inputs.iter().zip(outputs.iter()) {
        let args = render_args(input);
        let result = render_result(output);
        // Infallible: writing to a String cannot fail
        let _ = writeln!(transcript, "{op_name}(*{args}) -> {result}");
    }

    Ok(transcript)
}

/// Renders a recorded argument tuple as its canonical JSON array.
fn render_args(raw: &[u8]) -> String {
    match CallRecord::decode(raw) {
        Ok(record) => serde_json::to_string(&record.args)
            .unwrap_or_else(|_| String::from_utf8_lossy(raw).into_owned()),
        Err(_) => String::from_utf8_lossy(raw).into_owned(),
    }
}

/// Renders a recorded result as the bare returned key.
fn render_result(raw: &[u8]) -> String {
    match ResultRecord::decode(raw) {
        Ok(record) => record.result,
        Err(_) => String::from_utf8_lossy(raw).into_owned(),
    }
}
