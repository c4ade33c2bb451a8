//! User-facing notifications raised by the session.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Ok,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Ok,
            message: message.into(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warn,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Sink for toast-style messages (the presentation layer decides how to show them).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Routes notices into the `tracing` pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Warn => tracing::warn!("{}", notice.message),
            NoticeLevel::Info | NoticeLevel::Ok => tracing::info!("{}", notice.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_constructors_set_level() {
        assert_eq!(Notice::info("a").level, NoticeLevel::Info);
        assert_eq!(Notice::ok("b").level, NoticeLevel::Ok);
        let warn = Notice::warn(String::from("Sync failed"));
        assert_eq!(warn.level, NoticeLevel::Warn);
        assert_eq!(warn.to_string(), "Sync failed");
    }

    #[test]
    fn tracing_notifier_is_object_safe() {
        let notifier: Box<dyn Notifier> = Box::new(TracingNotifier);
        notifier.notify(Notice::ok("Quote added."));
    }
}
