use serde_json::Value;

use crate::error::FetchFailure;
use crate::node::NodeId;

/// Extract the `neighbors` array from a payload.
///
/// An empty body, `{}` or `[]` means "no neighbors" and is not parsed.
/// Non-string entries of the array are skipped.
pub fn decode_neighbors(payload: &str) -> Result<Vec<NodeId>, FetchFailure> {
    let payload = payload.trim();
    if payload.is_empty() || payload == "{}" || payload == "[]" {
        return Ok(Vec::new());
    }

    let document: Value =
        serde_json::from_str(payload).map_err(|e| FetchFailure::Malformed(e.to_string()))?;

    let neighbors = document
        .get("neighbors")
        .and_then(Value::as_array)
        .ok_or(FetchFailure::MissingNeighbors)?;

    Ok(neighbors
        .iter()
        .filter_map(Value::as_str)
        .map(NodeId::from)
        .collect())
}
