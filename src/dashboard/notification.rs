use std::time::Duration;

/// How long a notification stays visible.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub icon: &'static str,
    pub expires_at: Duration,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, icon: &'static str, at: Duration) -> Self {
        Notification {
            title: title.into(),
            message: message.into(),
            icon,
            expires_at: at + NOTIFICATION_DURATION,
        }
    }

    pub fn is_expired(&self, at: Duration) -> bool {
        at >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_five_seconds_after_it_was_raised() {
        let notification = Notification::new("Report shared", "/tmp/report.txt", "📄", Duration::from_secs(2));

        assert_eq!(notification.expires_at, Duration::from_secs(7));
        assert!(!notification.is_expired(Duration::from_millis(6_999)));
        assert!(notification.is_expired(Duration::from_secs(7)));
    }
}
