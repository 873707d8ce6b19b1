//! Transient notifications (toasts) shown in the corner of the app.

use contracts::shared::ui_config::NOTIFICATION_TTL_MS;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::shared::icons::icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

impl NotificationLevel {
    fn class(&self) -> &'static str {
        match self {
            Self::Success => "notification notification--success",
            Self::Info => "notification notification--info",
            Self::Error => "notification notification--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub text: String,
}

/// App-wide notification stack.
///
/// Every entry is dismissed automatically after `NOTIFICATION_TTL_MS`.
#[derive(Clone, Copy)]
pub struct NotificationService {
    items: RwSignal<Vec<Notification>>,
    next_id: RwSignal<u64>,
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    pub fn push(&self, level: NotificationLevel, text: impl Into<String>) -> u64 {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        let text = text.into();
        match level {
            NotificationLevel::Error => log::warn!("notification: {}", text),
            _ => log::debug!("notification: {}", text),
        }
        self.items.update(|items| items.push(Notification { id, level, text }));

        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(NOTIFICATION_TTL_MS).await;
            svc.dismiss(id);
        });
        id
    }

    pub fn success(&self, text: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Success, text)
    }

    pub fn info(&self, text: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Info, text)
    }

    pub fn error(&self, text: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Error, text)
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|items| items.retain(|n| n.id != id));
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>()
        .expect("NotificationService not provided in context (provide it in app root)")
}

/// Renders the notification stack. Mount once at the app root.
#[component]
pub fn NotificationHost() -> impl IntoView {
    let svc = use_notifications();

    view! {
        <div class="notification-host" role="status" aria-live="polite">
            <For
                each=move || svc.items.get()
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.level.class()>
                            <span class="notification__text">{n.text}</span>
                            <button
                                class="notification__close"
                                aria-label="Dismiss"
                                on:click=move |_| svc.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
