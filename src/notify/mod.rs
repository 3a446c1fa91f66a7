//! # Notifications
//!
//! Fire-and-forget user feedback. Form sessions report through the
//! [`Notifier`] trait; the dashboard renders [`Toasts`].

use std::collections::VecDeque;

use tracing::{info, warn};

/// Maximum number of toasts to retain.
const MAX_TOASTS: usize = 20;

pub trait Notifier {
    fn notify_error(&mut self, message: &str);
    fn notify_success(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Most recent first; the oldest toast is evicted past the cap.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    entries: VecDeque<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        if self.entries.len() >= MAX_TOASTS {
            self.entries.pop_back();
        }
        self.next_id += 1;
        self.entries.push_front(Toast {
            id: self.next_id,
            kind,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &VecDeque<Toast> {
        &self.entries
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|toast| toast.id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replay toasts raised elsewhere, keeping their relative order.
    pub fn absorb(&mut self, other: Toasts) {
        for toast in other.entries.into_iter().rev() {
            self.push(toast.kind, toast.message);
        }
    }
}

impl Notifier for Toasts {
    fn notify_error(&mut self, message: &str) {
        warn!("{message}");
        self.push(ToastKind::Error, message);
    }

    fn notify_success(&mut self, message: &str) {
        info!("{message}");
        self.push(ToastKind::Success, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first() {
        let mut toasts = Toasts::new();
        toasts.notify_success("Endpoint created");
        toasts.notify_error("Duplicate values");

        assert_eq!(toasts.entries().len(), 2);
        assert_eq!(toasts.entries()[0].kind, ToastKind::Error);
        assert_eq!(toasts.entries()[1].message, "Endpoint created");
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut toasts = Toasts::new();
        for i in 0..MAX_TOASTS + 3 {
            toasts.notify_success(&format!("toast {i}"));
        }
        assert_eq!(toasts.entries().len(), MAX_TOASTS);
        assert_eq!(toasts.entries()[0].message, format!("toast {}", MAX_TOASTS + 2));
        assert_eq!(toasts.entries()[MAX_TOASTS - 1].message, "toast 3");
    }

    #[test]
    fn dismiss_removes_only_that_toast() {
        let mut toasts = Toasts::new();
        toasts.notify_success("a");
        toasts.notify_success("b");
        let first_id = toasts.entries()[1].id;

        toasts.dismiss(first_id);
        assert_eq!(toasts.entries().len(), 1);
        assert_eq!(toasts.entries()[0].message, "b");

        toasts.clear();
        assert!(toasts.entries().is_empty());
    }

    #[test]
    fn absorb_keeps_order() {
        let mut toasts = Toasts::new();
        toasts.notify_success("loaded");

        let mut background = Toasts::new();
        background.notify_success("Endpoint created");
        background.notify_error("refresh failed");
        toasts.absorb(background);

        let messages: Vec<_> = toasts.entries().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["refresh failed", "Endpoint created", "loaded"]);
    }
}
