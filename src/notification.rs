//! 单槽通知队列
//!
//! 任意时刻最多只有一条可见通知。新通知会替换旧通知并取消旧的过期计时器；
//! 每个计时器都携带代号（generation），触发时代号不匹配则忽略。
//!
//! `show` 会在当前 Tokio 运行时中派生计时任务，必须在运行时内调用。

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::trace;

/// 通知级别，只影响展示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub ttl: Duration,
}

struct Slot {
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

struct Inner {
    slot: Mutex<Slot>,
    state: watch::Sender<Option<Notification>>,
}

impl Inner {
    /// 计时器触发：仅当代号仍然匹配时才清空
    fn expire(&self, generation: u64) {
        let mut slot = self.slot.lock();
        if slot.generation != generation {
            trace!(
                "Ignoring stale notification timer (gen {} != {})",
                generation, slot.generation
            );
            return;
        }
        slot.timer = None;
        self.state.send_replace(None);
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(timer) = self.slot.get_mut().timer.take() {
            timer.abort();
        }
    }
}

/// 单槽、自动过期的通知通道
#[derive(Clone)]
pub struct NotificationQueue {
    inner: Arc<Inner>,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationQueue {
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                slot: Mutex::new(Slot {
                    generation: 0,
                    timer: None,
                }),
                state,
            }),
        }
    }

    /// 显示通知，替换当前通知（后写者胜）
    pub fn show(&self, message: impl Into<String>, level: NotificationLevel, ttl: Duration) {
        let notification = Notification {
            message: message.into(),
            level,
            ttl,
        };

        let mut slot = self.inner.slot.lock();
        slot.generation += 1;
        let generation = slot.generation;
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }

        trace!("Showing notification (gen {}): {}", generation, notification.message);
        self.inner.state.send_replace(Some(notification));

        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(inner) = inner.upgrade() {
                inner.expire(generation);
            }
        }));
    }

    /// 手动关闭；空闲时为空操作
    pub fn dismiss(&self) {
        let mut slot = self.inner.slot.lock();
        if self.inner.state.borrow().is_none() {
            return;
        }
        slot.generation += 1;
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        self.inner.state.send_replace(None);
    }

    /// 当前可见的通知
    pub fn current(&self) -> Option<Notification> {
        self.inner.state.borrow().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.state.borrow().is_some()
    }

    /// 订阅通知状态变化
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.inner.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    const TTL: Duration = Duration::from_millis(3000);

    #[tokio::test(start_paused = true)]
    async fn test_show_then_expire() {
        let queue = NotificationQueue::new();
        assert!(!queue.is_visible());

        queue.show("hello", NotificationLevel::Info, TTL);
        assert_eq!(queue.current().unwrap().message, "hello");

        sleep(TTL - Duration::from_millis(1)).await;
        assert!(queue.is_visible());

        sleep(Duration::from_millis(10)).await;
        assert!(!queue.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_show_supersedes() {
        let queue = NotificationQueue::new();
        queue.show("first", NotificationLevel::Info, TTL);
        queue.show("second", NotificationLevel::Error, TTL);

        let current = queue.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.level, NotificationLevel::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_timer_does_not_clear_new_message() {
        let queue = NotificationQueue::new();
        queue.show("first", NotificationLevel::Info, Duration::from_millis(1000));
        sleep(Duration::from_millis(800)).await;
        queue.show("second", NotificationLevel::Info, Duration::from_millis(1000));

        // 第一条的过期时间已过，第二条仍应可见
        sleep(Duration::from_millis(500)).await;
        assert_eq!(queue.current().unwrap().message, "second");

        sleep(Duration::from_millis(600)).await;
        assert!(!queue.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_generation_is_ignored() {
        let queue = NotificationQueue::new();
        queue.show("first", NotificationLevel::Info, TTL);
        let stale = queue.inner.slot.lock().generation;
        queue.show("second", NotificationLevel::Info, TTL);

        queue.inner.expire(stale);
        assert_eq!(queue.current().unwrap().message, "second");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss() {
        let queue = NotificationQueue::new();
        // 空闲时 dismiss 为空操作
        queue.dismiss();
        assert!(!queue.is_visible());

        queue.show("bye", NotificationLevel::Success, TTL);
        queue.dismiss();
        assert!(!queue.is_visible());

        queue.show("again", NotificationLevel::Success, TTL);
        assert_eq!(queue.current().unwrap().message, "again");
        sleep(TTL + Duration::from_millis(10)).await;
        assert!(!queue.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribe_sees_changes() {
        let queue = NotificationQueue::new();
        let mut rx = queue.subscribe();

        queue.show("watch me", NotificationLevel::Info, TTL);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().unwrap().message, "watch me");

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }
}
