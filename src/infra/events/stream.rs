//! Decoding of `gerrit stream-events` output (one JSON object per line).

use crate::domain::{CommentAdded, EventError, GerritEvent, GerritEventKind};
use serde_json::Value;

pub fn parse_stream_event(line: &str) -> Result<GerritEvent, EventError> {
    let value: Value = serde_json::from_str(line.trim())?;
    let kind_name = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(EventError::MissingType)?;
    let kind: GerritEventKind = kind_name
        .parse()
        .map_err(|_| EventError::UnknownType(kind_name.to_string()))?;

    match kind {
        GerritEventKind::CommentAdded => {
            let event: CommentAdded = serde_json::from_value(value)?;
            Ok(GerritEvent::CommentAdded(event))
        }
        other => Ok(GerritEvent::Other { kind: other }),
    }
}

/// Parses every non-blank line, pairing each result with its 1-based line number.
pub fn parse_stream_events(input: &str) -> Vec<(usize, Result<GerritEvent, EventError>)> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, parse_stream_event(line)))
        .collect()
}
