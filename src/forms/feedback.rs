//! Operator feedback: toasts, banners and confirmation prompts

use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Receives toasts raised by form controllers
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that writes toasts to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!(message = %notice.message, "notice"),
            NoticeLevel::Error => tracing::warn!(message = %notice.message, "notice"),
        }
    }
}

/// Notifier that keeps every toast, for inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<RwLock<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.read().map(|n| n.clone()).unwrap_or_default()
    }

    /// Messages of the error toasts, oldest first
    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(Notice::is_error)
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.write() {
            notices.push(notice);
        }
    }
}

/// Blocking yes/no prompt shown before destructive actions
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirmer for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_splits_errors() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notice::success("Saved"));
        notifier.notify(Notice::error("Upload failed"));

        assert_eq!(notifier.notices().len(), 2);
        assert_eq!(notifier.errors(), vec!["Upload failed"]);
    }

    #[test]
    fn test_closure_confirmer() {
        let yes = |_: &str| true;
        let only_faq = |prompt: &str| prompt.contains("FAQ");
        assert!(yes.confirm("Delete?"));
        assert!(only_faq.confirm("Delete this FAQ?"));
        assert!(!only_faq.confirm("Delete this mentor?"));
    }
}
