//! Browser notification adapter.

use platform_host::{NotificationFuture, NotificationService};

/// Joins a title and optional body the way toasts render them.
pub fn render_notification_text(title: &str, body: &str) -> String {
    if body.trim().is_empty() {
        title.to_string()
    } else {
        format!("{title}: {body}")
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser notification adapter backed by the Web Notifications API.
///
/// When the page has not been granted notification permission the message is dropped; the shell
/// still shows its own in-page banner.
pub struct WebNotificationService;

impl NotificationService for WebNotificationService {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                use wasm_bindgen::JsValue;
                if web_sys::Notification::permission() != web_sys::NotificationPermission::Granted
                {
                    return Ok(());
                }
                let rendered = render_notification_text(title, body);
                return web_sys::Notification::new(&rendered)
                    .map(|_| ())
                    .map_err(|err: JsValue| format!("notification dispatch failed: {err:?}"));
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (title, body);
                Ok(())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_renders_title_only() {
        assert_eq!(render_notification_text("Music", "  "), "Music");
        assert_eq!(
            render_notification_text("Music", "Now playing"),
            "Music: Now playing"
        );
    }
}
