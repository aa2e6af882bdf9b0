//! Event annotation parsing.
//!
//! The event file uses a simpler grammar than the sample log: records are
//! separated by whitespace or `#`, with a header row naming `Event_Name`
//! and `startTime` among its fields.

use contracts::{EventMarker, EventTable, SessionError, SessionResult};
use tracing::{debug, instrument};

/// Name field in the event header
pub const EVENT_NAME_COLUMN: &str = "Event_Name";

/// Start-time field in the event header
pub const START_TIME_COLUMN: &str = "startTime";

/// Split an event record line on whitespace and `#`.
fn tokenize(line: &str) -> Vec<&str> {
    line.split(|c: char| c.is_whitespace() || c == '#')
        .filter(|token| !token.is_empty())
        .collect()
}

/// Parse a raw event annotation file into an [`EventTable`].
#[instrument(level = "debug", skip(raw), fields(bytes = raw.len()))]
pub fn parse_events(raw: &[u8]) -> SessionResult<EventTable> {
    let text = String::from_utf8_lossy(raw);
    let mut lines = text.lines().enumerate();

    let (_, header) = lines
        .by_ref()
        .find(|(_, line)| !tokenize(line).is_empty())
        .ok_or_else(|| SessionError::empty_stream("simulator event log"))?;

    let fields = tokenize(header);
    let name_idx = fields
        .iter()
        .position(|f| *f == EVENT_NAME_COLUMN)
        .ok_or_else(|| {
            SessionError::Other(format!(
                "event log header has no '{EVENT_NAME_COLUMN}' field: {fields:?}"
            ))
        })?;
    let time_idx = fields
        .iter()
        .position(|f| *f == START_TIME_COLUMN)
        .ok_or_else(|| {
            SessionError::Other(format!(
                "event log header has no '{START_TIME_COLUMN}' field: {fields:?}"
            ))
        })?;

    let mut events = Vec::new();
    for (line_no, line) in lines {
        let tokens = tokenize(line);
        if tokens.is_empty() {
            continue;
        }

        if tokens.len() != fields.len() {
            return Err(SessionError::MalformedLogLine {
                line: line_no + 1,
                content: line.to_string(),
            });
        }

        let start_time: f64 = tokens[time_idx].parse().map_err(|_| {
            SessionError::MalformedLogLine {
                line: line_no + 1,
                content: line.to_string(),
            }
        })?;

        events.push(EventMarker {
            name: tokens[name_idx].to_string(),
            start_time,
        });
    }

    debug!(events = events.len(), "event log parsed");

    Ok(EventTable { events })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENTS: &str = "Event_Name#startTime#endTime\n\
                          LaneChange#10.0#12.0\n\
                          ReferencePointStart#42.0#42.5\n\
                          ReferencePointEnd#80.0#80.5\n";

    #[test]
    fn test_parse_hash_separated() {
        let table = parse_events(EVENTS.as_bytes()).unwrap();
        assert_eq!(table.events.len(), 3);
        assert_eq!(table.events[1].name, "ReferencePointStart");
        assert_eq!(table.events[1].start_time, 42.0);
    }

    #[test]
    fn test_parse_whitespace_separated() {
        let text = "Event_Name startTime\nReferencePointStart 42.0\n";
        let table = parse_events(text.as_bytes()).unwrap();
        assert_eq!(table.events[0].start_time, 42.0);
    }

    #[test]
    fn test_mixed_separators() {
        let text = "Event_Name#startTime\nReferencePointStart 42.0\n";
        let table = parse_events(text.as_bytes()).unwrap();
        assert_eq!(table.events.len(), 1);
    }

    #[test]
    fn test_reference_lookup_through_table() {
        let table = parse_events(EVENTS.as_bytes()).unwrap();
        let event = table.first_matching("ReferencePoint").unwrap();
        assert_eq!(event.start_time, 42.0);
    }

    #[test]
    fn test_unparseable_start_time() {
        let text = "Event_Name#startTime\nReferencePointStart#not_a_number\n";
        let err = parse_events(text.as_bytes()).unwrap_err();
        assert!(matches!(err, SessionError::MalformedLogLine { line: 2, .. }));
    }

    #[test]
    fn test_missing_header_field() {
        let text = "Name#startTime\nReferencePointStart#42.0\n";
        assert!(parse_events(text.as_bytes()).is_err());
    }
}
