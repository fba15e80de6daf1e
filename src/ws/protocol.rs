//! JSON wire protocol and per-connection dispatch.
//!
//! Frames are tagged envelopes: `{"event": "...", "data": ...}`.
//!
//! Inbound:
//! - `submitName` with `{"name": "<requested>"}` — claim a display name.
//! - `drawing` with a stroke object, by convention
//!   `{x0, y0, x1, y1, thickness, userId}`. The relay only checks that the
//!   payload is a JSON object; field types and the `userId` attribution are
//!   NOT validated, and the payload is forwarded verbatim.
//!
//! Outbound:
//! - `nameAssigned` with the assigned name string (unicast to the requester).
//! - `drawingData` with the stroke object (broadcast to every peer except the
//!   sender, at-most-once, no retry).
//!
//! Frames that fail to parse, carry an unknown event, or carry a non-object
//! drawing payload are dropped silently; no error goes back to the sender.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;
use crate::ws::broadcast;
use crate::ws::ConnectionSender;

/// Events accepted from clients.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    SubmitName(SubmitName),
    Drawing(serde_json::Value),
}

#[derive(Debug, Deserialize)]
pub struct SubmitName {
    pub name: String,
}

/// Events sent to clients.
#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    NameAssigned(String),
    DrawingData(serde_json::Value),
}

/// Per-connection state record, owned by the connection's actor for its whole
/// lifetime. `assigned_name` is `None` until a name claim succeeds.
pub struct ConnState {
    pub id: Uuid,
    pub tx: ConnectionSender,
    pub assigned_name: Option<String>,
}

/// Handle one inbound text frame: decode the envelope and dispatch.
pub fn handle_text_message(text: &str, conn: &mut ConnState, state: &AppState) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(conn_id = %conn.id, error = %e, "Dropping unparseable frame");
            return;
        }
    };

    match event {
        ClientEvent::SubmitName(req) => handle_submit_name(req.name, conn, state),
        ClientEvent::Drawing(data) => handle_drawing(data, conn, state),
    }
}

/// Claim a display name and reply with the assignment (unicast, never broadcast).
/// A repeat claim on the same connection replaces the previous name, releasing
/// its registry entry first so the old name becomes claimable again.
fn handle_submit_name(requested: String, conn: &mut ConnState, state: &AppState) {
    if let Some(previous) = conn.assigned_name.take() {
        state.names.release(&previous);
    }

    let assigned = state.names.claim(&requested, conn.id);
    conn.assigned_name = Some(assigned.clone());

    tracing::info!(
        conn_id = %conn.id,
        name = %assigned,
        active_users = state.names.len(),
        "Name assigned"
    );

    broadcast::send_to(&conn.tx, &ServerEvent::NameAssigned(assigned));
}

/// Forward a stroke payload to every other connection. The payload is relayed
/// verbatim; only non-object payloads are rejected (silently, matching the
/// drop-and-ignore contract above).
fn handle_drawing(data: serde_json::Value, conn: &ConnState, state: &AppState) {
    if !data.is_object() {
        tracing::debug!(conn_id = %conn.id, "Dropping non-object drawing payload");
        return;
    }

    broadcast::broadcast_to_peers(&state.connections, conn.id, &ServerEvent::DrawingData(data));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submit_name_envelope_parses() {
        let frame = r#"{"event":"submitName","data":{"name":"Alex"}}"#;
        match serde_json::from_str::<ClientEvent>(frame).expect("parse") {
            ClientEvent::SubmitName(req) => assert_eq!(req.name, "Alex"),
            other => panic!("expected SubmitName, got {:?}", other),
        }
    }

    #[test]
    fn drawing_envelope_keeps_payload_verbatim() {
        let frame =
            r#"{"event":"drawing","data":{"x0":0,"y0":0,"x1":100,"y1":100,"thickness":5,"userId":"Alex"}}"#;
        match serde_json::from_str::<ClientEvent>(frame).expect("parse") {
            ClientEvent::Drawing(data) => {
                assert_eq!(data["thickness"], 5);
                assert_eq!(data["userId"], "Alex");
            }
            other => panic!("expected Drawing, got {:?}", other),
        }
    }

    #[test]
    fn unknown_event_fails_to_parse() {
        let frame = r#"{"event":"shutdown","data":{}}"#;
        assert!(serde_json::from_str::<ClientEvent>(frame).is_err());
    }

    #[test]
    fn server_events_serialize_with_original_event_names() {
        let assigned = serde_json::to_value(ServerEvent::NameAssigned("Alex".into())).unwrap();
        assert_eq!(assigned, json!({"event": "nameAssigned", "data": "Alex"}));

        let stroke = serde_json::to_value(ServerEvent::DrawingData(json!({"x0": 1}))).unwrap();
        assert_eq!(stroke, json!({"event": "drawingData", "data": {"x0": 1}}));
    }
}
