//! 一時的なステータス通知
//!
//! 表示中の通知は新しい通知で上書きされる（キューなし）。
//! 時刻は呼び出し側から渡す。

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct StatusNotifier {
    current: Option<Notice>,
}

impl StatusNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, message: impl Into<String>, duration: Duration, now: Instant) {
        self.current = Some(Notice {
            message: message.into(),
            expires_at: now + duration,
        });
    }

    /// 期限内の通知
    pub fn current(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|n| now < n.expires_at)
            .map(|n| n.message.as_str())
    }

    /// 期限切れなら消去
    pub fn tick(&mut self, now: Instant) {
        if self.current.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.current = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires() {
        let now = Instant::now();
        let mut notifier = StatusNotifier::new();
        notifier.notify("✅ Sauvegardé", Duration::from_millis(800), now);
        assert_eq!(notifier.current(now), Some("✅ Sauvegardé"));
        assert_eq!(notifier.current(now + Duration::from_millis(799)), Some("✅ Sauvegardé"));
        notifier.tick(now + Duration::from_millis(800));
        assert_eq!(notifier.current(now), None);
    }

    #[test]
    fn test_last_write_wins() {
        let now = Instant::now();
        let mut notifier = StatusNotifier::new();
        notifier.notify("premier", Duration::from_secs(3), now);
        notifier.notify("second", Duration::from_millis(100), now);
        assert_eq!(notifier.current(now), Some("second"));
        // 上書きされた通知の期限は残らない
        assert_eq!(notifier.current(now + Duration::from_millis(200)), None);
    }
}
