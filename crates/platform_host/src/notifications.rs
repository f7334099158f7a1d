//! Notification service contracts and no-op adapter.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`NotificationService`].
pub type NotificationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for toast/banner notifications raised outside the shell's own banner layer.
pub trait NotificationService {
    /// Dispatches a notification message.
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op notification service for unsupported targets.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn notify<'a>(
        &'a self,
        _title: &'a str,
        _body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Notification service that records every `(title, body)` pair it receives.
pub struct MemoryNotificationService {
    sent: Rc<RefCell<Vec<(String, String)>>>,
}

impl MemoryNotificationService {
    /// Returns the notifications delivered so far, oldest first.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.borrow().clone()
    }
}

impl NotificationService for MemoryNotificationService {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.sent
                .borrow_mut()
                .push((title.to_string(), body.to_string()));
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_notification_service_records_in_order() {
        let service = MemoryNotificationService::default();
        let service_obj: &dyn NotificationService = &service;
        block_on(service_obj.notify("Welcome", "Signed in")).expect("first");
        block_on(service_obj.notify("Music", "")).expect("second");

        assert_eq!(
            service.sent(),
            vec![
                ("Welcome".to_string(), "Signed in".to_string()),
                ("Music".to_string(), String::new()),
            ]
        );
    }
}
