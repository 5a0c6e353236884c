use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Toast severity; errors never escalate beyond a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// Explicitly passed notification queue, constructed once at the application
/// root; replaces ambient/global toast state. The view layer drains it each
/// frame.
#[derive(Clone, Default)]
pub struct Notifications {
    queue: Arc<Mutex<VecDeque<Toast>>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: ToastLevel, message: impl Into<String>) {
        self.queue.lock().expect("toast queue lock").push_back(Toast {
            level,
            message: message.into(),
        });
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message);
    }

    /// Removes and returns all pending toasts, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        self.queue.lock().expect("toast queue lock").drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().expect("toast queue lock").is_empty()
    }
}
