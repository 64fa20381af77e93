// src/notify.rs
//! User-visible transient notifications ("toasts")

use std::sync::Mutex;

use crate::app_log;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn success(description: &str) -> Self {
        Self {
            title: "Success".to_string(),
            description: description.to_string(),
            variant: Variant::Success,
        }
    }

    pub fn error(description: &str) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.to_string(),
            variant: Variant::Destructive,
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Prints notifications to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            Variant::Success => {
                app_log!(info, "{}: {}", notification.title, notification.description)
            }
            Variant::Destructive => {
                app_log!(warn, "{}: {}", notification.title, notification.description)
            }
        }
        eprintln!("{}: {}", notification.title, notification.description);
    }
}

/// Keeps every notification, for embedding and tests.
#[derive(Default)]
pub struct CollectingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(|n| n.variant == Variant::Destructive)
            .collect()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(notification);
        }
    }
}
