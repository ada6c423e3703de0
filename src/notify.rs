//! Notification sink: surfaces status transitions to the storefront UI.
//!
//! Toasts fan out over an in-process broadcast channel; every toast is also
//! mirrored to the log so headless runs keep a trace.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, Serialize)]
pub struct Toast {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ToastKind,
    pub message: String,
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, kind: ToastKind, message: &str);
}

pub struct BroadcastSink {
    tx: broadcast::Sender<Toast>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.tx.subscribe()
    }
}

impl NotificationSink for BroadcastSink {
    fn notify(&self, kind: ToastKind, message: &str) {
        let toast = Toast {
            id: Uuid::new_v4().simple().to_string(),
            kind,
            message: message.to_string(),
        };
        tracing::info!(kind = ?kind, message, "toast");
        // No listeners is fine; the log line above already happened.
        let _ = self.tx.send(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_toasts() {
        let sink = BroadcastSink::new(4);
        let mut rx = sink.subscribe();
        sink.notify(ToastKind::Success, "Order ord_abc confirmed");

        let toast = rx.recv().await.unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.message, "Order ord_abc confirmed");
    }

    #[test]
    fn test_notify_without_subscribers_is_fine() {
        let sink = BroadcastSink::new(4);
        sink.notify(ToastKind::Info, "nobody listening");
    }
}
