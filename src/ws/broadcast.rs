//! Fan-out helpers for server events.
//!
//! Delivery is fire-and-forget: events are pushed into each connection's
//! outbound channel and send errors are ignored, so a closed or slow peer never
//! blocks or fails delivery to the others. No ordering is guaranteed across
//! recipients.

use axum::extract::ws::Message;
use uuid::Uuid;

use super::{ConnectionRegistry, ConnectionSender};
use crate::ws::protocol::ServerEvent;

/// Send an event to a single connection.
pub fn send_to(tx: &ConnectionSender, event: &ServerEvent) {
    if let Ok(text) = serde_json::to_string(event) {
        let _ = tx.send(Message::Text(text.into()));
    }
}

/// Broadcast an event to every connection except the sender.
pub fn broadcast_to_peers(registry: &ConnectionRegistry, sender_id: Uuid, event: &ServerEvent) {
    let Ok(text) = serde_json::to_string(event) else {
        return;
    };
    let msg = Message::Text(text.into());

    for entry in registry.iter() {
        if *entry.key() == sender_id {
            continue;
        }
        let _ = entry.value().send(msg.clone());
    }
}
