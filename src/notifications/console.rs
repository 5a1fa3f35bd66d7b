//! Console notifier used by the command-line front end.

use crate::notifications::{Notification, Notifier, Severity};

/// Prints notifications as `title: description` lines on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => println!("{}", notification),
            Severity::Error => println!("! {}", notification),
        }
    }
}
