//! Server → client WebSocket messages.
//!
//! After every successful save the web layer pushes the new record and a
//! fresh [`FormSnapshot`](crate::snapshot::FormSnapshot) to all connected
//! clients through a `tokio::sync::broadcast` channel, so open pages refresh
//! without polling.

use kcal_rs::daily::Diagnosis;
use kcal_rs::record::Record;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use crate::snapshot::FormSnapshot;

/// A message sent from the server to WebSocket clients.
///
/// Discriminated on the `type` field when serialized to JSON.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// Full state snapshot (sent on connect, after a save, and on resync).
    Snapshot { data: serde_json::Value },
    /// A day was appended to the history.
    RecordSaved {
        record: Record,
        diagnosis: Diagnosis,
    },
}

impl WsMessage {
    pub fn snapshot(snapshot: &FormSnapshot) -> Self {
        Self::Snapshot {
            data: serde_json::to_value(snapshot).unwrap_or_default(),
        }
    }
}

/// Broadcast a message to all connected clients.
///
/// Silently ignores send errors (no subscribers is fine).
pub fn publish(sender: &broadcast::Sender<WsMessage>, msg: WsMessage) {
    if sender.send(msg).is_err() {
        debug!("No WebSocket subscribers");
    }
}

/// Announce a saved record followed by the refreshed snapshot.
pub fn broadcast_saved(
    sender: &broadcast::Sender<WsMessage>,
    record: Record,
    diagnosis: Diagnosis,
    snapshot: &FormSnapshot,
) {
    publish(sender, WsMessage::RecordSaved { record, diagnosis });
    publish(sender, WsMessage::snapshot(snapshot));
}

#[cfg(test)]
mod tests {
    use super::*;
    use kcal_rs::daily::diagnose;
    use kcal_rs::form::FormView;
    use kcal_rs::ui::tracing::LogBuffer;
    use kcal_rs::{KcalConfig, Summary};

    #[test]
    fn record_saved_serializes_with_type_tag() {
        let msg = WsMessage::RecordSaved {
            record: Record::new(2000.0, 1800.0),
            diagnosis: diagnose(2000.0, 1800.0),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "record_saved");
        assert_eq!(json["record"]["limit"], 2000.0);
        assert_eq!(json["diagnosis"]["outcome"]["kind"], "under_limit");
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let (tx, _) = broadcast::channel::<WsMessage>(4);
        publish(
            &tx,
            WsMessage::Snapshot {
                data: serde_json::Value::Null,
            },
        );
    }

    #[test]
    fn saved_sends_record_then_snapshot() {
        let (tx, mut rx) = broadcast::channel::<WsMessage>(4);
        let view = FormView {
            summary: Summary::default(),
            records: Vec::new(),
            notices: Vec::new(),
        };
        let snapshot = FormSnapshot::from_view(&view, &KcalConfig::default(), &LogBuffer::default());
        broadcast_saved(
            &tx,
            Record::new(1100.0, 1500.0),
            diagnose(1100.0, 1500.0),
            &snapshot,
        );

        assert!(matches!(rx.try_recv().unwrap(), WsMessage::RecordSaved { .. }));
        assert!(matches!(rx.try_recv().unwrap(), WsMessage::Snapshot { .. }));
    }
}
