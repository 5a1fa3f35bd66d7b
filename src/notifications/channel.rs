//! Channel-backed notifier for UI consumers.

use tokio::sync::mpsc;

use crate::notifications::{Notification, Notifier};

/// Forwards notifications into an unbounded channel.
///
/// A dropped receiver silently discards further notifications.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiver the UI reads from.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_arrive_in_order() {
        let (notifier, mut rx) = ChannelNotifier::new();
        notifier.notify(Notification::info("first", "a"));
        notifier.notify(Notification::error("second", "b"));

        assert_eq!(rx.try_recv().unwrap().title, "first");
        assert_eq!(rx.try_recv().unwrap().title, "second");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);
        notifier.notify(Notification::info("nobody", "listening"));
    }
}
